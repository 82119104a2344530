//! Strict single-byte and UTF-8 text decoders for CSV import.
//!
//! Each decoder either decodes the whole buffer or reports failure; there is
//! no replacement-character fallback. The reader tries them in order.

use std::fmt;
use std::str::FromStr;

use crate::error::PlexTagsError;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Windows-1252 mapping for 0x80..=0x9F. `None` marks bytes the code page
/// leaves undefined.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// A candidate text encoding for CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Cp1252,
    Iso8859_1,
}

impl TextEncoding {
    /// The order tried when no configuration says otherwise.
    pub const DEFAULT_ORDER: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Cp1252,
        TextEncoding::Iso8859_1,
    ];

    /// Canonical label, as written in the config file.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Cp1252 => "cp1252",
            Self::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Decode `bytes` in full, or return `None` on the first invalid byte.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            Self::Latin1 | Self::Iso8859_1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Cp1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)],
                    _ => Some(char::from(b)),
                })
                .collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = PlexTagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin-1" | "latin1" => Ok(Self::Latin1),
            "cp1252" | "windows-1252" => Ok(Self::Cp1252),
            "iso-8859-1" | "iso8859-1" => Ok(Self::Iso8859_1),
            other => Err(PlexTagsError::config(format!(
                "unsupported CSV encoding '{other}': expected utf-8, latin-1, cp1252 or iso-8859-1"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_strict() {
        assert_eq!(TextEncoding::Utf8.decode("Amélie".as_bytes()).as_deref(), Some("Amélie"));
        assert_eq!(TextEncoding::Utf8.decode(b"Am\xE9lie"), None);
    }

    #[test]
    fn utf8_strips_bom() {
        let decoded = TextEncoding::Utf8.decode(b"\xEF\xBB\xBFTitle").unwrap();
        assert_eq!(decoded, "Title");
    }

    #[test]
    fn latin1_maps_every_byte() {
        assert_eq!(TextEncoding::Latin1.decode(b"Am\xE9lie").as_deref(), Some("Amélie"));
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(TextEncoding::Iso8859_1.decode(&all).unwrap().chars().count(), 256);
    }

    #[test]
    fn cp1252_maps_smart_quotes_and_rejects_holes() {
        let decoded = TextEncoding::Cp1252.decode(b"\x93Hi\x94 \x80").unwrap();
        assert_eq!(decoded, "\u{201C}Hi\u{201D} \u{20AC}");
        assert_eq!(TextEncoding::Cp1252.decode(b"bad \x81 byte"), None);
        assert_eq!(TextEncoding::Cp1252.decode(b"\x9D"), None);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("latin1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!("Windows-1252".parse::<TextEncoding>().unwrap(), TextEncoding::Cp1252);
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn label_round_trips_through_from_str() {
        for enc in TextEncoding::DEFAULT_ORDER {
            assert_eq!(enc.label().parse::<TextEncoding>().unwrap(), enc);
        }
    }
}
