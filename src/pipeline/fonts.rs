//! Standard-14 font metrics and WinAnsi text encoding.
//!
//! The PDF converter only uses five of the built-in Type1 fonts every viewer
//! ships with, so nothing is embedded. Line wrapping still needs glyph
//! advances; the tables below are the printable-ASCII widths from the
//! Adobe AFM files, in 1/1000 em.

use pdf_writer::Name;

/// A built-in PDF font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
}

impl Font {
    pub const ALL: [Font; 5] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::HelveticaBoldOblique,
        Font::Courier,
    ];

    /// PostScript name used as `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::Courier => "Courier",
        }
    }

    /// Key under which the font is registered in page resources.
    pub fn resource_name(self) -> Name<'static> {
        match self {
            Font::Helvetica => Name(b"F1"),
            Font::HelveticaBold => Name(b"F2"),
            Font::HelveticaOblique => Name(b"F3"),
            Font::Courier => Name(b"F4"),
            Font::HelveticaBoldOblique => Name(b"F5"),
        }
    }

    /// Advance width of `c` in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        let table = match self {
            Font::Courier => return 600,
            Font::HelveticaBold | Font::HelveticaBoldOblique => &HELVETICA_BOLD_WIDTHS,
            Font::Helvetica | Font::HelveticaOblique => &HELVETICA_WIDTHS,
        };
        match c {
            ' '..='~' => table[c as usize - 32],
            '\u{2022}' => 350,
            _ => 556,
        }
    }

    /// Width of `text` set at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 'p'..'~'
];

/// Encode text for a simple font using `/WinAnsiEncoding`.
///
/// ASCII and Latin-1 map directly; the typographic punctuation WinAnsi puts in
/// 0x80..0x9F is translated; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(Font::Courier.text_width("iiii", 10.0), Font::Courier.text_width("WWWW", 10.0));
        assert_eq!(Font::Courier.text_width("abc", 10.0), 18.0);
    }

    #[test]
    fn test_helvetica_widths() {
        assert_eq!(Font::Helvetica.char_width(' '), 278);
        assert_eq!(Font::Helvetica.char_width('A'), 667);
        assert_eq!(Font::Helvetica.char_width('~'), 584);
        assert!(Font::HelveticaBold.text_width("bold", 12.0) > Font::Helvetica.text_width("bold", 12.0));
    }

    #[test]
    fn test_oblique_shares_regular_metrics() {
        assert_eq!(
            Font::HelveticaOblique.text_width("Slanted", 10.0),
            Font::Helvetica.text_width("Slanted", 10.0)
        );
        assert_eq!(
            Font::HelveticaBoldOblique.text_width("Slanted", 10.0),
            Font::HelveticaBold.text_width("Slanted", 10.0)
        );
    }

    #[test]
    fn test_resource_names_unique() {
        let names: std::collections::HashSet<_> =
            Font::ALL.iter().map(|f| f.resource_name().0).collect();
        assert_eq!(names.len(), Font::ALL.len());
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Hi!"), b"Hi!".to_vec());
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2022} \u{2014}"), vec![0x95, b' ', 0x97]);
        assert_eq!(encode_win_ansi("\u{4e2d}"), b"?".to_vec());
    }
}
