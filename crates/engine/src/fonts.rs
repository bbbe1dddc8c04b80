//! Advance widths of the two standard fonts the documents use.
//!
//! Values are the Adobe Core 14 AFM widths in 1/1000 em. Accented Latin letters
//! are measured as their base letter.

use unicode_normalization::UnicodeNormalization as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

// Printable ASCII, 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;

/// Advance width of `ch` in 1/1000 em.
pub fn char_width(ch: char, face: FontFace) -> u16 {
    if let Some(width) = ascii_width(ch, face) {
        return width;
    }

    let bold = face == FontFace::Bold;
    match ch {
        '\u{a0}' => 278,
        '•' => 350,
        '–' => 556,
        '—' | '…' | 'Æ' | 'Œ' => 1000,
        '‘' | '’' => {
            if bold {
                278
            } else {
                222
            }
        }
        '“' | '”' | '«' | '»' => {
            if bold {
                500
            } else {
                333
            }
        }
        '€' => 556,
        '°' => 400,
        'æ' => 889,
        'œ' => 944,
        'ß' => 611,
        _ => {
            // Measure precomposed letters such as é or Ç by their base letter.
            ch.to_string()
                .nfd()
                .next()
                .filter(|base| *base != ch)
                .and_then(|base| ascii_width(base, face))
                .unwrap_or(DEFAULT_WIDTH)
        }
    }
}

fn ascii_width(ch: char, face: FontFace) -> Option<u16> {
    let code = ch as u32;
    if !(0x20..=0x7e).contains(&code) {
        return None;
    }
    let table = match face {
        FontFace::Regular => &HELVETICA_ASCII,
        FontFace::Bold => &HELVETICA_BOLD_ASCII,
    };
    Some(table[(code - 0x20) as usize])
}

/// Width of `text` in 1/1000 em.
pub fn text_units(text: &str, face: FontFace) -> u32 {
    text.chars().map(|ch| u32::from(char_width(ch, face))).sum()
}
