//! Cover letter layout and body cleanup.

use std::sync::LazyLock;

use chrono::{Datelike as _, NaiveDate};
use jobpulse_core::ProfileRecord;
use regex::Regex;

use crate::cursor::{Align, LayoutCursor};
use crate::document::{Document, TextStyle};
use crate::fonts::FontFace;
use crate::geometry::{Color, PageGeometry};
use crate::text::{clean_text, format_phone, safe_file_stem};

pub const LETTER_MARGIN: f32 = 20.0;
pub const LETTER_LINE_HEIGHT: f32 = 1.35;

const SENDER_TOP: f32 = 15.0;
const SENDER_STEP: f32 = 4.5;
const RECIPIENT_TOP: f32 = 40.0;
/// Left edge of the right-hand column (recipient, date, signature).
const RIGHT_COLUMN: f32 = 110.0;
const PARAGRAPH_LINE: f32 = 6.0;
const PARAGRAPH_GAP: f32 = 2.0;
const BLANK_LINE: f32 = 6.0;
const BODY_BREAK_AT: f32 = 270.0;
const BODY_RESUME_AT: f32 = 20.0;
const CLOSING_BREAK_AT: f32 = 275.0;
const CLOSING_RESUME_AT: f32 = 30.0;
const DEFAULT_CITY: &str = "Paris";

const HEADER_BOLD: TextStyle = TextStyle::new(FontFace::Bold, 10.0, Color::BLACK);
const HEADER: TextStyle = TextStyle::new(FontFace::Regular, 10.0, Color::BLACK);
const BODY: TextStyle = TextStyle::new(FontFace::Regular, 10.5, Color::TEXT);
const CLOSING: TextStyle = TextStyle::new(FontFace::Bold, 10.5, Color::TEXT);

/// Valedictions that mark the start of a signature block.
pub const VALEDICTIONS: [&str; 5] = [
    "Cordialement",
    "Sincèrement",
    "Bien à vous",
    "Je vous prie d'agréer",
    "Salutations",
];

static SUBJECT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^Objet\s*:.*$").expect("subject regex"));
static RECIPIENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^À l'attention.*$").expect("recipient regex"));
static SIGNATURE_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VALEDICTIONS
        .iter()
        .map(|keyword| {
            Regex::new(&format!(r"(?is)\n\s*{}.*$", regex::escape(keyword)))
                .expect("valediction regex")
        })
        .collect()
});

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

pub fn letter_file_name(profile: &ProfileRecord) -> String {
    format!("Lettre_Motivation_{}.pdf", safe_file_stem(&profile.full_name))
}

/// Long French date, e.g. "5 mars 2026".
pub fn french_long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// City part of a "City, Country" location, falling back to Paris.
fn city(location: &str) -> &str {
    let city = location.split(',').next().unwrap_or("").trim();
    if city.is_empty() { DEFAULT_CITY } else { city }
}

/// Strips what the letter skeleton already prints from generated body text.
///
/// Markdown marks, echoed subject and recipient lines, everything from a
/// valediction onwards and a trailing line holding only part of the sender's
/// name are removed. This is a best-effort filter.
pub fn sanitize_letter_body(content: &str, full_name: &str) -> String {
    let text = clean_text(content);
    let text = SUBJECT_LINE.replace_all(&text, "");
    let text = RECIPIENT_LINE.replace_all(&text, "");
    let mut text = text.trim().to_string();

    for signature in SIGNATURE_BLOCKS.iter() {
        text = signature.replace(&text, "").into_owned();
    }

    for part in full_name.split(' ') {
        if part.chars().count() <= 2 {
            continue;
        }
        let pattern = format!(r"(?i)\n\s*{}\s*$", regex::escape(part));
        if let Ok(name_line) = Regex::new(&pattern) {
            text = name_line.replace(&text, "").into_owned();
        }
    }

    text.trim().to_string()
}

/// Lays out the cover letter. `date` is printed in the place/date line.
pub fn render_letter(
    profile: &ProfileRecord,
    company: &str,
    job_title: &str,
    content: &str,
    date: NaiveDate,
) -> Document {
    let mut cursor = LayoutCursor::new(PageGeometry::a4(LETTER_MARGIN));
    let geometry = cursor.geometry();
    let margin = geometry.margin;

    cursor.set_y(SENDER_TOP);
    let sender = [
        (clean_text(&profile.full_name), &HEADER_BOLD),
        (clean_text(&profile.location), &HEADER),
        (format_phone(&profile.phone), &HEADER),
        (profile.email.to_lowercase(), &HEADER),
    ];
    for (index, (line, style)) in sender.iter().enumerate() {
        if index > 0 {
            cursor.advance(SENDER_STEP);
        }
        let y = cursor.y();
        cursor.text_at(margin, y, line, style);
    }

    cursor.set_y(RECIPIENT_TOP);
    let y = cursor.y();
    cursor.text_at(
        RIGHT_COLUMN,
        y,
        "À l'attention du Responsable Recrutement",
        &HEADER_BOLD,
    );
    cursor.advance(5.0);
    let y = cursor.y();
    cursor.text_at(RIGHT_COLUMN, y, &clean_text(company).to_uppercase(), &HEADER_BOLD);
    cursor.advance(15.0);

    let place_and_date = format!(
        "À {}, le {}",
        city(&profile.location),
        french_long_date(date)
    );
    let y = cursor.y();
    cursor.text_at(RIGHT_COLUMN, y, &place_and_date, &HEADER);
    cursor.advance(20.0);

    let subject = format!("Objet : Candidature au poste de {}", clean_text(job_title));
    let y = cursor.y();
    cursor.text_at(margin, y, &subject, &HEADER_BOLD);
    cursor.advance(12.0);

    let width = geometry.content_width();
    let body = sanitize_letter_body(content, &profile.full_name);
    for paragraph in body.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            cursor.advance(BLANK_LINE);
            continue;
        }

        let lines = cursor.wrap(paragraph, width, &BODY);
        cursor.flow_lines(
            margin,
            &lines,
            &BODY,
            LETTER_LINE_HEIGHT,
            Align::Justify,
            width,
            PARAGRAPH_LINE,
        );
        cursor.advance(PARAGRAPH_GAP);
        cursor.break_past(BODY_BREAK_AT, BODY_RESUME_AT);
    }

    cursor.advance(10.0);
    cursor.break_past(CLOSING_BREAK_AT, CLOSING_RESUME_AT);
    let y = cursor.y();
    cursor.text_at(RIGHT_COLUMN, y, "Cordialement,", &CLOSING);
    cursor.advance(7.0);
    let y = cursor.y();
    cursor.text_at(RIGHT_COLUMN, y, &clean_text(&profile.full_name), &CLOSING);

    let doc = cursor.finish();
    tracing::debug!(pages = doc.page_count(), "rendered letter");
    doc
}
