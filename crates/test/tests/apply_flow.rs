use chrono::NaiveDate;
use jobpulse_application::{FileGenerator, GenerationState, Session};
use jobpulse_core::ApplicationType;
use jobpulse_engine::Engine;
use jobpulse_test::{sample_profile, sample_response};

#[test]
fn saved_response_is_merged_and_rendered() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let response = dir.path().join("response.json");
    std::fs::write(&response, sample_response())?;

    let stored = sample_profile();
    let mut session = Session::new(Some(stored.clone()), ApplicationType::Alternance)
        .with_job_text("Alternance Data Analyst, Lyon");
    session.generate(&FileGenerator::new(&response))?;
    let package = session.package().expect("package ready");

    let profile = &package.optimized_profile;
    assert_eq!(profile.skills, "Docker, Python, SQL");
    assert_eq!(profile.experiences, stored.experiences);
    assert_eq!(profile.certifications, stored.certifications);
    assert_eq!(profile.languages, stored.languages);
    assert_eq!(profile.bio, "Candidate pour une alternance de 24 mois.");

    let engine = Engine::new();
    let date = NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date");
    let letter = engine.render_letter(
        profile,
        &package.extracted_company,
        &package.extracted_job_title,
        &package.cover_letter,
        date,
    )?;
    let path = engine.write(dir.path(), &letter)?;
    let summary = engine.inspect(&path)?;
    let lines = &summary.pages[0];

    assert!(lines.iter().any(|l| l == "BANQUE POPULAIRE"));
    assert!(lines.iter().any(|l| l == "À Lyon, le 5 mars 2026"));
    assert!(lines.iter().any(|l| l == "Objet : Candidature au poste de Data Analyst"));
    assert!(lines.iter().any(|l| l.contains("septembre 2026")));
    assert_eq!(lines.iter().filter(|l| l.starts_with("Objet")).count(), 1);
    assert_eq!(lines.iter().filter(|l| l.starts_with("Cordialement")).count(), 1);
    Ok(())
}

#[test]
fn malformed_response_leaves_session_retryable() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let response = dir.path().join("response.json");
    std::fs::write(&response, "```json\n{\"matchScore\": 40}\n```")?;

    let mut session =
        Session::new(Some(sample_profile()), ApplicationType::Stage).with_job_text("Stage");
    let generator = FileGenerator::new(&response);
    assert!(session.generate(&generator).is_err());
    assert!(matches!(session.state(), GenerationState::Failed(_)));

    std::fs::write(&response, sample_response())?;
    session.generate(&generator)?;
    assert!(session.package().is_some());
    Ok(())
}
