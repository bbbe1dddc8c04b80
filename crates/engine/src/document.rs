//! Paginated draw instructions produced by the renderers.
//!
//! Coordinates are millimetres from the top-left corner of the page; text is
//! anchored at its baseline.

use crate::fonts::FontFace;
use crate::geometry::{Color, PageGeometry};

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Color) -> Self {
        Self { face, size, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
    /// Extra millimetres added at every space, used for justified lines.
    pub word_spacing: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

/// Clickable area pointing at an external URL.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Rule(Rule),
    Link(LinkArea),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkArea> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Link(link) => Some(link),
            _ => None,
        })
    }

    /// First text run whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&TextRun> {
        self.texts().find(|run| run.text == text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl Document {
    /// A document always starts with one blank page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub(crate) fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Page index and run for the first text equal to `text`.
    pub fn find_text(&self, text: &str) -> Option<(usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .find_map(|(index, page)| page.find_text(text).map(|run| (index, run)))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.pages
            .iter()
            .flat_map(Page::texts)
            .any(|run| run.text.contains(needle))
    }

    /// All text of page `index`, one run per line.
    #[cfg(test)]
    pub(crate) fn page_text(&self, index: usize) -> String {
        self.pages
            .get(index)
            .map(|page| {
                page.texts()
                    .map(|run| run.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

/// A rendered document ready to be written to disk.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}
