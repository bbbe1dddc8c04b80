use jobpulse_engine::Engine;
use jobpulse_engine::cv::render_cv;
use jobpulse_test::{long_profile, sample_profile};

#[test]
fn long_experience_list_spills_onto_more_pages() {
    let profile = long_profile(14);
    let doc = render_cv(&profile, "Data Analyst");
    assert!(doc.page_count() >= 2, "got {} page(s)", doc.page_count());

    for index in 0..14 {
        let (company_page, company) = doc
            .find_text(&format!("ENTREPRISE {index}"))
            .expect("company line drawn");
        let (role_page, role) = doc.find_text(&format!("Poste {index}")).expect("role line drawn");
        assert_eq!(company_page, role_page, "entry {index} split across pages");
        assert!(role.y > company.y);
    }
}

#[test]
fn current_position_shows_present_instead_of_end_date() {
    let doc = render_cv(&sample_profile(), "Data Analyst");
    assert!(doc.contains_text("2025-01 - Présent"));
    assert!(!doc.contains_text("2025-06"));
}

#[test]
fn contact_block_formats_phone_and_email() {
    let doc = render_cv(&sample_profile(), "Data Analyst");
    assert!(doc.contains_text("tél : +33 605961489"));
    assert!(doc.contains_text("email : zoe.martin@example.com"));
    assert!(doc.contains_text("github : zoemartin"));
    let links: Vec<_> = doc.pages[0].links().map(|link| link.url.as_str()).collect();
    assert!(links.contains(&"https://github.com/zoemartin/"));
}

#[test]
fn written_cv_reads_back_with_the_same_pages() -> anyhow::Result<()> {
    let engine = Engine::new();
    let pdf = engine.render_cv(&long_profile(14), "Data Analyst")?;
    let dir = tempfile::tempdir()?;
    let path = engine.write(dir.path(), &pdf)?;
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("CV_Zo__Martin_Elite.pdf"));

    let summary = engine.inspect(&path)?;
    assert_eq!(summary.page_count(), pdf.page_count);
    assert_eq!(summary.page_of("ZOÉ MARTIN"), Some(0));
    assert!(summary.page_of("LANGUES & INTÉRÊTS").is_some_and(|page| page >= 1));
    Ok(())
}
