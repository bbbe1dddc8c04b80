//! WinAnsiEncoding, the single-byte encoding of the standard fonts.

// Code points 0x80..=0x9F differ from Latin-1.
const HIGH_CONTROLS: [(u8, char); 27] = [
    (0x80, '€'),
    (0x82, '‚'),
    (0x83, 'ƒ'),
    (0x84, '„'),
    (0x85, '…'),
    (0x86, '†'),
    (0x87, '‡'),
    (0x88, 'ˆ'),
    (0x89, '‰'),
    (0x8A, 'Š'),
    (0x8B, '‹'),
    (0x8C, 'Œ'),
    (0x8E, 'Ž'),
    (0x91, '‘'),
    (0x92, '’'),
    (0x93, '“'),
    (0x94, '”'),
    (0x95, '•'),
    (0x96, '–'),
    (0x97, '—'),
    (0x98, '˜'),
    (0x99, '™'),
    (0x9A, 'š'),
    (0x9B, '›'),
    (0x9C, 'œ'),
    (0x9E, 'ž'),
    (0x9F, 'Ÿ'),
];

/// Encodes `text`; characters the encoding lacks become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn encode_char(ch: char) -> u8 {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return code as u8;
    }
    HIGH_CONTROLS
        .iter()
        .find(|(_, c)| *c == ch)
        .map(|(byte, _)| *byte)
        .unwrap_or(b'?')
}

pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| match byte {
            0x80..=0x9F => HIGH_CONTROLS
                .iter()
                .find(|(b, _)| *b == byte)
                .map(|(_, ch)| *ch)
                .unwrap_or('\u{FFFD}'),
            _ => char::from(byte),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_and_typographic_characters() {
        assert_eq!(encode("Aé"), vec![b'A', 0xE9]);
        assert_eq!(encode("• – ’"), vec![0x95, b' ', 0x96, b' ', 0x92]);
        assert_eq!(decode(&encode("À Lyon, le 1 août • Présent")), "À Lyon, le 1 août • Présent");
    }

    #[test]
    fn unsupported_characters_are_replaced() {
        assert_eq!(encode("漢x"), vec![b'?', b'x']);
    }
}
