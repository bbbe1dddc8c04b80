//! CV layout.

use jobpulse_core::ProfileRecord;

use crate::cursor::{Align, LayoutCursor};
use crate::document::{Document, TextStyle};
use crate::fonts::FontFace;
use crate::geometry::{Color, PageGeometry};
use crate::text::{clean_text, format_phone, measure_width, safe_file_stem};

pub const CV_MARGIN: f32 = 12.0;
pub const CV_LINE_HEIGHT: f32 = 1.1;

/// Where the body starts on the first page, below the header block.
const BODY_TOP: f32 = 40.0;
const CONTACT_STEP: f32 = 3.5;
const BULLET_LINE: f32 = 3.8;
const SKILL_COLUMNS: usize = 3;
const SKILL_ROW: f32 = 4.0;
const MAX_PROJECTS: usize = 3;

const NAME: TextStyle = TextStyle::new(FontFace::Bold, 22.0, Color::BLACK);
const TITLE: TextStyle = TextStyle::new(FontFace::Bold, 11.0, Color::ACCENT);
const CONTACT: TextStyle = TextStyle::new(FontFace::Regular, 8.0, Color::TEXT);
const CONTACT_LINK: TextStyle = TextStyle::new(FontFace::Regular, 8.0, Color::ACCENT);
const BODY: TextStyle = TextStyle::new(FontFace::Regular, 9.0, Color::TEXT);
const DATES: TextStyle = TextStyle::new(FontFace::Regular, 8.0, Color::BLACK);
const LABEL: TextStyle = TextStyle::new(FontFace::Bold, 9.0, Color::BLACK);

pub fn cv_file_name(profile: &ProfileRecord) -> String {
    format!("CV_{}_Elite.pdf", safe_file_stem(&profile.full_name))
}

/// Lays out the CV for `profile`, titled with the job being applied for.
pub fn render_cv(profile: &ProfileRecord, target_job_title: &str) -> Document {
    let mut cursor = LayoutCursor::new(PageGeometry::a4(CV_MARGIN));

    header(&mut cursor, profile, target_job_title);
    summary(&mut cursor, profile);
    education(&mut cursor, profile);
    experience(&mut cursor, profile);
    skills(&mut cursor, profile);
    projects(&mut cursor, profile);
    certifications(&mut cursor, profile);
    languages_and_interests(&mut cursor, profile);

    let doc = cursor.finish();
    tracing::debug!(pages = doc.page_count(), "rendered cv");
    doc
}

fn header(cursor: &mut LayoutCursor, profile: &ProfileRecord, target_job_title: &str) {
    let geometry = cursor.geometry();
    let top = cursor.y();

    cursor.text_at(
        geometry.margin,
        top + 5.0,
        &clean_text(&profile.full_name).to_uppercase(),
        &NAME,
    );
    cursor.text_at(geometry.margin, top + 10.0, &clean_text(target_job_title), &TITLE);

    let mut contact_y = top + 1.5;
    let github = github_user(&profile.github);
    let lines: [(&str, String, Option<&str>); 5] = [
        ("email", profile.email.clone(), None),
        ("tél", format_phone(&profile.phone), None),
        ("adresse", profile.location.clone(), None),
        ("linkedin", profile.full_name.clone(), Some(profile.linkedin.as_str())),
        ("github", github.to_string(), Some(profile.github.as_str())),
    ];
    for (label, value, url) in lines {
        if value.is_empty() {
            continue;
        }
        let url = url.filter(|u| !u.is_empty());
        let style = if url.is_some() { &CONTACT_LINK } else { &CONTACT };
        let text = format!("{} : {}", label.to_lowercase(), value.to_lowercase());
        let width = measure_width(&text, style.face, style.size);
        let x = geometry.right() - width;
        cursor.text_at(x, contact_y, &text, style);
        if let Some(url) = url {
            cursor.link(x, contact_y - 3.0, width, 4.0, url);
        }
        contact_y += CONTACT_STEP;
    }

    cursor.set_y(BODY_TOP);
}

/// Last non-empty path segment of a profile URL.
fn github_user(url: &str) -> &str {
    url.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or("")
}

fn summary(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    if profile.bio.trim().is_empty() {
        return;
    }
    cursor.section_header("Profil Professionnel");

    let geometry = cursor.geometry();
    let width = geometry.content_width();
    let lines = cursor.wrap(&clean_text(&profile.bio), width, &BODY);
    cursor.flow_lines(
        geometry.margin,
        &lines,
        &BODY,
        CV_LINE_HEIGHT,
        Align::Justify,
        width,
        4.0 * CV_LINE_HEIGHT,
    );
    cursor.advance(1.0);
}

fn education(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    if profile.education.is_empty() {
        return;
    }
    cursor.section_header("Formation");

    let margin = cursor.geometry().margin;
    for edu in &profile.education {
        cursor.ensure_space(10.0);
        let y = cursor.y();
        cursor.text_at(
            margin,
            y,
            &clean_text(&edu.school),
            &TextStyle::new(FontFace::Bold, 9.5, Color::BLACK),
        );
        cursor.text_right(&edu.date_range(), &DATES);
        cursor.advance(3.8);
        let y = cursor.y();
        cursor.text_at(
            margin,
            y,
            &clean_text(&edu.degree),
            &TextStyle::new(FontFace::Regular, 9.0, Color::ACCENT),
        );
        cursor.advance(5.0);
    }
}

fn experience(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    if profile.experiences.is_empty() {
        return;
    }
    cursor.section_header("Expérience Professionnelle");

    let geometry = cursor.geometry();
    let bullet_width = geometry.content_width() - 4.0;
    for exp in &profile.experiences {
        // Company line and role line are checked together.
        cursor.ensure_space(18.0);
        let y = cursor.y();
        cursor.text_at(
            geometry.margin,
            y,
            &clean_text(&exp.company).to_uppercase(),
            &TextStyle::new(FontFace::Bold, 10.0, Color::BLACK),
        );
        cursor.text_right(&exp.date_range(), &DATES);
        cursor.advance(3.8);
        let y = cursor.y();
        cursor.text_at(
            geometry.margin,
            y,
            &clean_text(&exp.role),
            &TextStyle::new(FontFace::Bold, 9.0, Color::ACCENT),
        );
        cursor.advance(4.5);

        for line in clean_text(&exp.description).lines() {
            let Some(bullet) = bullet_text(line) else {
                continue;
            };
            let wrapped = cursor.wrap(&bullet, bullet_width, &BODY);
            cursor.flow_lines(
                geometry.margin + 3.0,
                &wrapped,
                &BODY,
                CV_LINE_HEIGHT,
                Align::Left,
                bullet_width,
                BULLET_LINE,
            );
        }
        cursor.advance(1.0);
    }
}

/// Normalizes one description line to a single leading bullet. Blank lines yield nothing.
fn bullet_text(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let body = match line.strip_prefix(['•', '-', '*']) {
        Some(rest) => rest.trim_start(),
        None => line,
    };
    Some(format!("• {body}"))
}

fn skills(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    cursor.section_header("Compétences Techniques");

    let geometry = cursor.geometry();
    let column_width = geometry.content_width() / SKILL_COLUMNS as f32;
    let skills = profile.skill_list();
    // Skill i lands on row i / 3, column i % 3.
    for row in skills.chunks(SKILL_COLUMNS) {
        cursor.ensure_space(SKILL_ROW);
        let y = cursor.y();
        for (column, skill) in row.iter().enumerate() {
            let x = geometry.margin + column as f32 * column_width;
            cursor.text_at(x, y, &format!("• {skill}"), &BODY);
        }
        cursor.advance(SKILL_ROW);
    }
    cursor.advance(3.0);
}

fn projects(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    if profile.projects.is_empty() {
        return;
    }
    cursor.section_header("Projets Réalisés");

    let geometry = cursor.geometry();
    let description = TextStyle::new(FontFace::Regular, 8.5, Color::TEXT);
    let width = geometry.content_width() - 3.0;
    for project in profile.projects.iter().take(MAX_PROJECTS) {
        cursor.ensure_space(12.0);
        let y = cursor.y();
        cursor.text_at(
            geometry.margin,
            y,
            &clean_text(&project.name),
            &TextStyle::new(FontFace::Bold, 9.5, Color::BLACK),
        );
        cursor.text_right(
            &format!("[ {} ]", project.technologies),
            &TextStyle::new(FontFace::Regular, 7.5, Color::BLACK),
        );
        cursor.advance(3.8);

        let lines = cursor.wrap(&clean_text(&project.description), width, &description);
        cursor.flow_lines(
            geometry.margin,
            &lines,
            &description,
            CV_LINE_HEIGHT,
            Align::Left,
            width,
            BULLET_LINE,
        );
        cursor.advance(1.5);
    }
}

fn certifications(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    if profile.certifications.is_empty() {
        return;
    }
    cursor.section_header("Certifications");

    let margin = cursor.geometry().margin;
    for cert in &profile.certifications {
        cursor.ensure_space(8.0);
        let y = cursor.y();
        cursor.text_at(margin, y, &clean_text(&cert.name), &LABEL);
        cursor.text_right(&cert.date, &DATES);
        cursor.advance(3.5);
        let y = cursor.y();
        cursor.text_at(
            margin,
            y,
            &clean_text(&cert.issuer),
            &TextStyle::new(FontFace::Regular, 8.5, Color::ACCENT),
        );
        cursor.advance(4.0);
    }
}

fn languages_and_interests(cursor: &mut LayoutCursor, profile: &ProfileRecord) {
    cursor.section_header("Langues & Intérêts");
    cursor.ensure_space(12.0);

    let margin = cursor.geometry().margin;
    labeled_line(cursor, margin, "Langues : ", &profile.languages);
    cursor.advance(4.5);
    labeled_line(cursor, margin, "Intérêts : ", &profile.interests);
}

// The value starts exactly where the bold label ends.
fn labeled_line(cursor: &mut LayoutCursor, x: f32, label: &str, value: &str) {
    let y = cursor.y();
    cursor.text_at(x, y, label, &LABEL);
    let value_x = x + measure_width(label, LABEL.face, LABEL.size);
    cursor.text_at(value_x, y, value, &BODY);
}
