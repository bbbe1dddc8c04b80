//! Text shaping: measuring, wrapping and the small string cleanups both renderers share.

use std::sync::LazyLock;

use regex::Regex;

use crate::fonts::{self, FontFace};
use crate::geometry::pt_to_mm;

static HEADING_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+\s").expect("heading regex"));

/// Width of `text` in millimetres at `size` points.
pub fn measure_width(text: &str, face: FontFace, size: f32) -> f32 {
    fonts::text_units(text, face) as f32 / 1000.0 * pt_to_mm(size)
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Explicit line breaks always start a new line, words wider than a whole line
/// are broken between characters, and empty input yields one empty line.
pub fn wrap(text: &str, max_width: f32, face: FontFace, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        wrap_line(hard_line.trim_end_matches('\r'), max_width, face, size, &mut lines);
    }
    lines
}

fn wrap_line(line: &str, max_width: f32, face: FontFace, size: f32, out: &mut Vec<String>) {
    let fits = |candidate: &str| measure_width(candidate, face, size) <= max_width;
    let mut current = String::new();

    for word in line.split(' ').filter(|w| !w.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            current.push(ch);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                out.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    out.push(current);
}

/// Extra space per inter-word gap that stretches `line` to `max_width`.
pub fn justify_spacing(line: &str, max_width: f32, face: FontFace, size: f32) -> f32 {
    let gaps = line.chars().filter(|ch| *ch == ' ').count();
    if gaps == 0 {
        return 0.0;
    }
    let slack = max_width - measure_width(line, face, size);
    (slack / gaps as f32).max(0.0)
}

/// Drops markdown emphasis and heading marks left over from generated text.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("**", "").replace("__", "");
    HEADING_MARKS.replace_all(&text, "").trim().to_string()
}

/// Removes whitespace and rewrites a national number starting with 0 as +33.
pub fn format_phone(phone: &str) -> String {
    let compact: String = phone.chars().filter(|ch| !ch.is_whitespace()).collect();
    match compact.strip_prefix('0') {
        Some(rest) => format!("+33 {rest}"),
        None => compact,
    }
}

/// File-name-safe version of a person's name: every non ASCII alphanumeric becomes `_`.
pub fn safe_file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_size() {
        let w10 = measure_width("Hello", FontFace::Regular, 10.0);
        let w20 = measure_width("Hello", FontFace::Regular, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
        // 2278 units at 10pt.
        assert!((w10 - 2.278 * 10.0 * 25.4 / 72.0).abs() < 1e-3);
    }

    #[test]
    fn bold_is_wider() {
        assert!(
            measure_width("Rust engineer", FontFace::Bold, 9.0)
                > measure_width("Rust engineer", FontFace::Regular, 9.0)
        );
    }

    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(8);
        let lines = wrap(&text, 60.0, FontFace::Regular, 9.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure_width(line, FontFace::Regular, 9.0) <= 60.0);
        }
        assert_eq!(lines.join(" "), text.trim_end());
    }

    #[test]
    fn wrap_honours_line_breaks() {
        let lines = wrap("one\ntwo", 100.0, FontFace::Regular, 9.0);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn wrap_breaks_long_words() {
        let word = "x".repeat(200);
        let lines = wrap(&word, 30.0, FontFace::Regular, 9.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(measure_width(line, FontFace::Regular, 9.0) <= 30.0);
        }
    }

    #[test]
    fn wrap_empty_is_single_empty_line() {
        assert_eq!(wrap("", 50.0, FontFace::Regular, 9.0), vec![String::new()]);
    }

    #[test]
    fn wrap_is_restartable() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        assert_eq!(
            wrap(text, 25.0, FontFace::Bold, 10.0),
            wrap(text, 25.0, FontFace::Bold, 10.0)
        );
    }

    #[test]
    fn justify_fills_the_line() {
        let line = "a b c";
        let spacing = justify_spacing(line, 50.0, FontFace::Regular, 10.0);
        let filled = measure_width(line, FontFace::Regular, 10.0) + spacing * 2.0;
        assert!((filled - 50.0).abs() < 1e-3);
        assert_eq!(justify_spacing("single", 50.0, FontFace::Regular, 10.0), 0.0);
    }

    #[test]
    fn clean_text_strips_markdown() {
        assert_eq!(clean_text("  **Bold** __under__\n## Title\n#no-space "), "Bold under\nTitle\n#no-space");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn phone_leading_zero_becomes_country_code() {
        assert_eq!(format_phone("0605961489"), "+33 605961489");
        assert_eq!(format_phone("06 05 96 14 89"), "+33 605961489");
        assert_eq!(format_phone("+33 605961489"), "+33605961489");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn safe_stem_replaces_each_character() {
        assert_eq!(safe_file_stem("Jean-Luc Picard"), "Jean_Luc_Picard");
        assert_eq!(safe_file_stem("Zoé  Ä"), "Zo____");
    }
}
