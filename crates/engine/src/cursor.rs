//! Vertical layout cursor.
//!
//! The cursor owns the page sequence it writes into. Pagination is decided
//! before each block is drawn, top-down in a single pass: a block that does not
//! fit starts a new page, nothing is ever moved back. A section header and the
//! first block under it are checked separately, so a header can end up alone at
//! the bottom of a page.

use crate::document::{Document, DrawOp, LinkArea, Rule, TextRun, TextStyle};
use crate::fonts::FontFace;
use crate::geometry::{Color, PageGeometry, pt_to_mm};
use crate::text::{justify_spacing, measure_width, wrap};

const SECTION_HEADER_SPACE: f32 = 12.0;
const SECTION_TITLE: TextStyle = TextStyle::new(FontFace::Bold, 10.0, Color::PRIMARY);
const SECTION_RULE_WIDTH: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Justify,
}

#[derive(Debug)]
pub struct LayoutCursor {
    doc: Document,
    y: f32,
}

impl LayoutCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            doc: Document::new(geometry),
            y: geometry.margin,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.doc.geometry
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    #[cfg(test)]
    pub(crate) fn page_index(&self) -> usize {
        self.doc.page_count() - 1
    }

    pub fn would_overflow(&self, height: f32) -> bool {
        self.y + height > self.doc.geometry.bottom()
    }

    /// Starts a new page when `height` does not fit. Returns whether a page was added.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if !self.would_overflow(height) {
            return false;
        }
        self.new_page(self.doc.geometry.margin);
        true
    }

    /// Starts a new page at `resume_at` once the cursor has passed `limit`.
    pub fn break_past(&mut self, limit: f32, resume_at: f32) -> bool {
        if self.y <= limit {
            return false;
        }
        self.new_page(resume_at);
        true
    }

    fn new_page(&mut self, resume_at: f32) {
        self.doc.add_page();
        self.y = resume_at;
        tracing::debug!(page = self.doc.page_count(), "page break");
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn section_header(&mut self, title: &str) {
        self.ensure_space(SECTION_HEADER_SPACE);
        self.advance(3.0);
        let margin = self.doc.geometry.margin;
        self.text_at(margin, self.y, &title.to_uppercase(), &SECTION_TITLE);
        self.advance(1.0);
        let right = self.doc.geometry.right();
        self.rule(margin, self.y, right, self.y, SECTION_RULE_WIDTH, Color::RULE);
        self.advance(4.0);
    }

    pub fn text_at(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        self.push(DrawOp::Text(TextRun {
            x,
            y,
            text: text.to_string(),
            style: style.clone(),
            word_spacing: 0.0,
        }));
    }

    /// Draws `text` at the cursor's line with its right edge on the right margin.
    pub fn text_right(&mut self, text: &str, style: &TextStyle) {
        let x = self.doc.geometry.right() - measure_width(text, style.face, style.size);
        self.text_at(x, self.y, text, style);
    }

    /// Draws pre-wrapped lines starting at the cursor's line without moving the cursor.
    ///
    /// Lines are `size × line_height` points apart. Justified blocks stretch every
    /// line except the last to `max_width`.
    pub fn lines_at(
        &mut self,
        x: f32,
        lines: &[String],
        style: &TextStyle,
        line_height: f32,
        align: Align,
        max_width: f32,
    ) {
        self.draw_lines(x, lines, style, line_height, align, max_width, true);
    }

    /// Draws a wrapped block that takes `step` millimetres per line and moves the
    /// cursor below it.
    ///
    /// A block that fits on one page is kept together, starting a new page if
    /// needed. A taller block fills the rest of the current page and continues on
    /// the following ones.
    #[allow(clippy::too_many_arguments)]
    pub fn flow_lines(
        &mut self,
        x: f32,
        lines: &[String],
        style: &TextStyle,
        line_height: f32,
        align: Align,
        max_width: f32,
        step: f32,
    ) {
        let geometry = self.doc.geometry;
        let height = lines.len() as f32 * step;
        if height <= geometry.bottom() - geometry.margin {
            self.ensure_space(height);
            self.lines_at(x, lines, style, line_height, align, max_width);
            self.advance(height);
            return;
        }

        let mut rest = lines;
        while !rest.is_empty() {
            let room = ((geometry.bottom() - self.y) / step).floor().max(0.0) as usize;
            if room == 0 && self.y > geometry.margin {
                self.new_page(geometry.margin);
                continue;
            }
            let (chunk, tail) = rest.split_at(room.clamp(1, rest.len()));
            self.draw_lines(x, chunk, style, line_height, align, max_width, tail.is_empty());
            self.advance(chunk.len() as f32 * step);
            rest = tail;
        }
    }

    // `ends_block` is false when the block continues on the next page, so its
    // last line here is still justified.
    #[allow(clippy::too_many_arguments)]
    fn draw_lines(
        &mut self,
        x: f32,
        lines: &[String],
        style: &TextStyle,
        line_height: f32,
        align: Align,
        max_width: f32,
        ends_block: bool,
    ) {
        let pitch = pt_to_mm(style.size * line_height);
        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let word_spacing = match align {
                Align::Justify if index < last || !ends_block => {
                    justify_spacing(line, max_width, style.face, style.size)
                }
                _ => 0.0,
            };
            self.push(DrawOp::Text(TextRun {
                x,
                y: self.y + pitch * index as f32,
                text: line.clone(),
                style: style.clone(),
                word_spacing,
            }));
        }
    }

    /// Wraps `text` to `max_width` with the style's font.
    pub fn wrap(&self, text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
        wrap(text, max_width, style.face, style.size)
    }

    pub fn rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.push(DrawOp::Rule(Rule {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        }));
    }

    pub fn link(&mut self, x: f32, y: f32, width: f32, height: f32, url: &str) {
        self.push(DrawOp::Link(LinkArea {
            x,
            y,
            width,
            height,
            url: url.to_string(),
        }));
    }

    fn push(&mut self, op: DrawOp) {
        self.doc.current_page().ops.push(op);
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: TextStyle = TextStyle::new(FontFace::Regular, 9.0, Color::TEXT);

    #[test]
    fn overflow_is_strictly_past_bottom_margin() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.set_y(280.0);
        assert!(!cursor.would_overflow(5.0));
        assert!(cursor.would_overflow(5.1));
    }

    #[test]
    fn ensure_space_adds_page_and_resets_y() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.set_y(250.0);
        assert!(!cursor.ensure_space(10.0));
        assert_eq!(cursor.page_index(), 0);

        cursor.set_y(280.0);
        assert!(cursor.ensure_space(10.0));
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(cursor.y(), 12.0);
    }

    #[test]
    fn break_past_uses_its_own_threshold() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(20.0));
        cursor.set_y(270.0);
        assert!(!cursor.break_past(270.0, 20.0));
        cursor.advance(0.5);
        assert!(cursor.break_past(270.0, 20.0));
        assert_eq!(cursor.y(), 20.0);
        assert_eq!(cursor.finish().page_count(), 2);
    }

    fn words(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("ligne {i}")).collect()
    }

    #[test]
    fn block_that_fits_a_page_moves_whole() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.set_y(280.0);
        cursor.flow_lines(12.0, &words(3), &BODY, 1.1, Align::Left, 100.0, 4.0);
        assert_eq!(cursor.y(), 24.0);

        let doc = cursor.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].texts().count(), 0);
        assert_eq!(doc.pages[1].texts().count(), 3);
    }

    #[test]
    fn tall_block_continues_on_following_pages() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.set_y(200.0);
        cursor.flow_lines(12.0, &words(40), &BODY, 1.1, Align::Justify, 100.0, 10.0);
        assert_eq!(cursor.page_index(), 2);
        assert_eq!(cursor.y(), 62.0);

        let doc = cursor.finish();
        let counts: Vec<usize> = doc.pages.iter().map(|page| page.texts().count()).collect();
        assert_eq!(counts, vec![8, 27, 5]);
        for page in &doc.pages {
            for run in page.texts() {
                assert!(run.y <= 285.0, "{} at {}", run.text, run.y);
            }
        }

        // Only the very last line of the block is left unjustified.
        let runs: Vec<&TextRun> = doc.pages.iter().flat_map(|page| page.texts()).collect();
        assert!(runs[7].word_spacing > 0.0);
        assert!(runs[34].word_spacing > 0.0);
        assert_eq!(runs[39].word_spacing, 0.0);
    }

    #[test]
    fn section_header_draws_title_and_rule() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.set_y(40.0);
        cursor.section_header("Formation");
        assert_eq!(cursor.y(), 48.0);

        let doc = cursor.finish();
        let page = &doc.pages[0];
        let title = page.find_text("FORMATION").expect("title drawn");
        assert_eq!(title.y, 43.0);
        assert_eq!(title.style.color, Color::PRIMARY);
        assert!(page.ops.iter().any(|op| matches!(
            op,
            DrawOp::Rule(rule) if rule.x1 == 12.0 && rule.x2 == 198.0 && rule.y1 == 44.0
        )));
    }

    #[test]
    fn section_header_near_bottom_moves_to_next_page() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.set_y(280.0);
        cursor.section_header("Projets");
        let doc = cursor.finish();
        assert_eq!(doc.find_text("PROJETS").map(|(i, _)| i), Some(1));
    }

    #[test]
    fn text_right_ends_on_margin() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        cursor.text_right("2024 - 2025", &BODY);
        let doc = cursor.finish();
        let run = doc.pages[0].find_text("2024 - 2025").expect("drawn");
        let end = run.x + measure_width(&run.text, BODY.face, BODY.size);
        assert!((end - 198.0).abs() < 1e-3);
    }

    #[test]
    fn justified_lines_leave_last_line_ragged() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4(12.0));
        let lines = vec!["one two three".to_string(), "four five".to_string()];
        cursor.lines_at(12.0, &lines, &BODY, 1.1, Align::Justify, 100.0);
        let doc = cursor.finish();
        let runs: Vec<_> = doc.pages[0].texts().collect();
        assert!(runs[0].word_spacing > 0.0);
        assert_eq!(runs[1].word_spacing, 0.0);
        assert!((runs[1].y - runs[0].y - pt_to_mm(9.0 * 1.1)).abs() < 1e-4);
    }
}
