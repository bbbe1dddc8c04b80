//! Reads a written PDF back: page count and the text drawn on each page.

use std::path::Path;

use anyhow::Context as _;
use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;

use crate::winansi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfSummary {
    /// One entry per page, each holding the text lines in drawing order.
    pub pages: Vec<Vec<String>>,
}

impl PdfSummary {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the first page with a line containing `needle`.
    pub fn page_of(&self, needle: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|lines| lines.iter().any(|line| line.contains(needle)))
    }
}

pub fn inspect_pdf(path: &Path) -> anyhow::Result<PdfSummary> {
    let file = FileOptions::cached()
        .open(path)
        .with_context(|| format!("open pdf {}", path.display()))?;
    let resolver = file.resolver();

    let mut pages = Vec::new();
    for index in 0..file.num_pages() {
        let page = file
            .get_page(index)
            .with_context(|| format!("read page {}", index + 1))?;
        let lines = match &page.contents {
            Some(content) => ops_to_lines(&content.operations(&resolver)?),
            None => Vec::new(),
        };
        pages.push(lines);
    }
    Ok(PdfSummary { pages })
}

fn ops_to_lines(ops: &[Op]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for op in ops {
        match op {
            Op::TextDraw { text } => current.push_str(&winansi::decode(text.as_bytes())),
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    if let TextDrawAdjusted::Text(text) = item {
                        current.push_str(&winansi::decode(text.as_bytes()));
                    }
                }
            }
            Op::EndText | Op::TextNewline => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::LayoutCursor;
    use crate::document::TextStyle;
    use crate::encode::{DocumentInfo, encode_pdf};
    use crate::fonts::FontFace;
    use crate::geometry::{Color, PageGeometry};

    #[test]
    fn reads_back_text_per_page() -> anyhow::Result<()> {
        let style = TextStyle::new(FontFace::Regular, 10.0, Color::TEXT);
        let mut cursor = LayoutCursor::new(PageGeometry::a4(20.0));
        cursor.text_at(20.0, 20.0, "Objet : Candidature", &style);
        cursor.text_at(20.0, 30.0, "• Présent – Lyon", &style);
        cursor.set_y(290.0);
        cursor.ensure_space(10.0);
        cursor.text_at(20.0, 20.0, "Zoé Martin", &style);
        let bytes = encode_pdf(&cursor.finish(), &DocumentInfo::default())?;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, bytes)?;

        let summary = inspect_pdf(&path)?;
        assert_eq!(summary.page_count(), 2);
        assert_eq!(summary.pages[0], vec!["Objet : Candidature", "• Présent – Lyon"]);
        assert_eq!(summary.page_of("Zoé Martin"), Some(1));
        assert_eq!(summary.page_of("absent"), None);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(inspect_pdf(Path::new("/nonexistent/file.pdf")).is_err());
    }
}
