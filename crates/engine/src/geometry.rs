//! Page geometry, palette and unit conversion shared by both documents.

/// A4 width in millimetres.
pub const PAGE_WIDTH: f32 = 210.0;
/// A4 height in millimetres.
pub const PAGE_HEIGHT: f32 = 297.0;

pub const MM_PER_PT: f32 = 25.4 / 72.0;
pub const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub const fn a4(margin: f32) -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }

    /// Right edge of the content box, used as the anchor for right-aligned text.
    pub fn right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const PRIMARY: Color = Color(30, 58, 138);
    pub const ACCENT: Color = Color(79, 70, 229);
    pub const TEXT: Color = Color(30, 41, 59);
    pub const SUBTLE: Color = Color(100, 116, 139);
    pub const BLACK: Color = Color(15, 23, 42);
    pub const RULE: Color = Color(226, 232, 240);

    pub fn components(&self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_PT
}

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}
