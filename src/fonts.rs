use pdf_writer::{Name, Pdf, Ref};

/// The two faces the style table draws with. Both are PDF standard Type1
/// fonts, so nothing is embedded and metrics never depend on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    pub const ALL: [FontFace; 2] = [FontFace::Regular, FontFace::Bold];

    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    fn base_font(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"Helvetica",
            FontFace::Bold => b"Helvetica-Bold",
        }
    }

    /// Advance width of a WinAnsi byte in 1000-units.
    fn width_1000(self, byte: u8) -> f32 {
        if byte < 32 {
            return 0.0;
        }
        if byte <= 126 {
            let idx = (byte - 32) as usize;
            return match self {
                FontFace::Regular => HELVETICA_ASCII[idx],
                FontFace::Bold => HELVETICA_BOLD_ASCII[idx],
            };
        }
        let bold = self == FontFace::Bold;
        match byte {
            0x95 => 350.0,                            // bullet
            0x96 => 556.0,                            // en dash
            0x97 | 0x85 | 0x89 => 1000.0,             // em dash, ellipsis, per mille
            0x91 | 0x92 | 0x82 if bold => 278.0,      // single quotes
            0x91 | 0x92 | 0x82 => 222.0,
            0x93 | 0x94 | 0x84 if bold => 500.0,      // double quotes
            0x93 | 0x94 | 0x84 => 333.0,
            0x80 => 556.0,                            // euro
            0x99 => 1000.0,                           // trademark
            0xA0 => 278.0,                            // nbsp
            0xC0..=0xDE if bold => 722.0,             // accented capitals
            0xC0..=0xDE => 667.0,
            0xDF..=0xFF if bold => 611.0,             // accented lowercase
            _ => 556.0,
        }
    }

    pub(crate) fn word_width(self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .map(|&b| self.width_1000(b) * font_size / 1000.0)
            .sum()
    }
}

/// Helvetica ascender/descender in 1000-units, shared by both weights.
pub(crate) const ASCENDER_RATIO: f32 = 0.718;
pub(crate) const DESCENDER_RATIO: f32 = 0.207;

#[rustfmt::skip]
const HELVETICA_ASCII: [f32; 95] = [
    278.0, 278.0, 355.0, 556.0, 556.0, 889.0, 667.0, 191.0, 333.0, 333.0, // space ! " # $ % & ' ( )
    389.0, 584.0, 278.0, 333.0, 278.0, 278.0, 556.0, 556.0, 556.0, 556.0, // * + , - . / 0 1 2 3
    556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 278.0, 278.0, 584.0, 584.0, // 4 5 6 7 8 9 : ; < =
    584.0, 556.0, 1015.0, 667.0, 667.0, 722.0, 722.0, 667.0, 611.0, 778.0, // > ? @ A B C D E F G
    722.0, 278.0, 500.0, 667.0, 556.0, 833.0, 722.0, 778.0, 667.0, 778.0, // H I J K L M N O P Q
    722.0, 667.0, 611.0, 722.0, 667.0, 944.0, 667.0, 667.0, 611.0, 278.0, // R S T U V W X Y Z [
    278.0, 278.0, 469.0, 556.0, 333.0, 556.0, 556.0, 500.0, 556.0, 556.0, // \ ] ^ _ ` a b c d e
    278.0, 556.0, 556.0, 222.0, 222.0, 500.0, 222.0, 833.0, 556.0, 556.0, // f g h i j k l m n o
    556.0, 556.0, 333.0, 500.0, 278.0, 556.0, 500.0, 722.0, 500.0, 500.0, // p q r s t u v w x y
    500.0, 334.0, 260.0, 334.0, 584.0,                                     // z { | } ~
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [f32; 95] = [
    278.0, 333.0, 474.0, 556.0, 556.0, 889.0, 722.0, 238.0, 333.0, 333.0,
    389.0, 584.0, 278.0, 333.0, 278.0, 278.0, 556.0, 556.0, 556.0, 556.0,
    556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 333.0, 333.0, 584.0, 584.0,
    584.0, 611.0, 975.0, 722.0, 722.0, 722.0, 722.0, 667.0, 611.0, 778.0,
    722.0, 278.0, 556.0, 722.0, 611.0, 833.0, 722.0, 778.0, 667.0, 778.0,
    722.0, 667.0, 611.0, 722.0, 667.0, 944.0, 667.0, 667.0, 611.0, 333.0,
    278.0, 333.0, 584.0, 556.0, 333.0, 556.0, 611.0, 556.0, 611.0, 556.0,
    333.0, 611.0, 611.0, 278.0, 278.0, 556.0, 278.0, 889.0, 611.0, 611.0,
    611.0, 611.0, 389.0, 556.0, 333.0, 611.0, 556.0, 778.0, 556.0, 556.0,
    500.0, 389.0, 280.0, 389.0, 584.0,
];

/// Map a single Unicode char to its WinAnsi byte, or `None` if unmappable.
fn char_to_winansi(c: char) -> Option<u8> {
    let byte = match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF `Str`
/// encoding. Characters outside the code page are dropped, and measurement
/// goes through the same conversion so widths always match what is drawn.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars().filter_map(char_to_winansi).collect()
}

/// Write the font dictionaries for both faces and return their refs in
/// `FontFace::ALL` order.
pub(crate) fn register_fonts(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Vec<(FontFace, Ref)> {
    FontFace::ALL
        .iter()
        .map(|&face| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(face.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (face, font_ref)
        })
        .collect()
}
