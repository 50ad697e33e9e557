//! Text encodings used inside frame bodies.

use serde::{Deserialize, Serialize};

use crate::header::Version;

/// Text encoding byte that prefixes textual frame bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// ISO-8859-1, single null terminator
    Iso88591,
    /// UTF-16 with byte order mark, double null terminator
    Utf16,
    /// UTF-16 big endian without BOM (v2.4 only)
    Utf16Be,
    /// UTF-8 (v2.4 only)
    #[default]
    Utf8,
}

impl TextEncoding {
    pub fn key(self) -> u8 {
        match self {
            TextEncoding::Iso88591 => 0,
            TextEncoding::Utf16 => 1,
            TextEncoding::Utf16Be => 2,
            TextEncoding::Utf8 => 3,
        }
    }

    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            0 => Some(TextEncoding::Iso88591),
            1 => Some(TextEncoding::Utf16),
            2 => Some(TextEncoding::Utf16Be),
            3 => Some(TextEncoding::Utf8),
            _ => None,
        }
    }

    pub fn is_supported_by(self, version: Version) -> bool {
        match self {
            TextEncoding::Iso88591 | TextEncoding::Utf16 => true,
            TextEncoding::Utf16Be | TextEncoding::Utf8 => version == Version::V24,
        }
    }

    pub fn terminator(self) -> &'static [u8] {
        match self {
            TextEncoding::Iso88591 | TextEncoding::Utf8 => &[0],
            TextEncoding::Utf16 | TextEncoding::Utf16Be => &[0, 0],
        }
    }

    /// Encode `text` without a terminator.
    ///
    /// Characters outside Latin-1 become `?` under [`TextEncoding::Iso88591`].
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Iso88591 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            TextEncoding::Utf16 => {
                let mut out = Vec::with_capacity(2 + text.len() * 2);
                out.extend_from_slice(&[0xFF, 0xFE]);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
            TextEncoding::Utf16Be => text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
        }
    }

    /// Encode `text` followed by the terminator.
    pub fn encode_terminated(self, text: &str) -> Vec<u8> {
        let mut out = self.encode(text);
        out.extend_from_slice(self.terminator());
        out
    }

    /// Decode `bytes`, dropping trailing terminators. Invalid sequences are
    /// replaced rather than rejected.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Iso88591 => trim_nulls(bytes, 1).iter().map(|&b| char::from(b)).collect(),
            TextEncoding::Utf8 => String::from_utf8_lossy(trim_nulls(bytes, 1)).into_owned(),
            TextEncoding::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
            TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        }
    }

    /// Split `bytes` at the first terminator, returning the text before it and
    /// the remainder after it. Without a terminator everything is text.
    pub fn split_terminated(self, bytes: &[u8]) -> (&[u8], &[u8]) {
        let width = self.terminator().len();
        let mut i = 0;
        while i + width <= bytes.len() {
            if bytes[i..i + width].iter().all(|&b| b == 0) {
                return (&bytes[..i], &bytes[i + width..]);
            }
            i += width;
        }
        (bytes, &[])
    }
}

fn trim_nulls(bytes: &[u8], width: usize) -> &[u8] {
    let mut end = bytes.len();
    while end >= width && bytes[end - width..end].iter().all(|&b| b == 0) {
        end -= width;
    }
    &bytes[..end]
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let bytes = trim_nulls(bytes, 2);
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        for encoding in [
            TextEncoding::Iso88591,
            TextEncoding::Utf16,
            TextEncoding::Utf16Be,
            TextEncoding::Utf8,
        ] {
            assert_eq!(TextEncoding::from_key(encoding.key()), Some(encoding));
        }
        assert_eq!(TextEncoding::from_key(4), None);
    }

    #[test]
    fn test_utf16_has_bom_and_le_units() {
        assert_eq!(TextEncoding::Utf16.encode("Hi"), vec![0xFF, 0xFE, b'H', 0, b'i', 0]);
        assert_eq!(TextEncoding::Utf16.decode(&[0xFF, 0xFE, b'H', 0, b'i', 0, 0, 0]), "Hi");
        assert_eq!(TextEncoding::Utf16.decode(&[0xFE, 0xFF, 0, b'H', 0, b'i']), "Hi");
    }

    #[test]
    fn test_utf16be() {
        assert_eq!(TextEncoding::Utf16Be.encode("Ä"), vec![0x00, 0xC4]);
        assert_eq!(TextEncoding::Utf16Be.decode(&[0x00, 0xC4]), "Ä");
    }

    #[test]
    fn test_latin1_replaces_unmappable() {
        assert_eq!(TextEncoding::Iso88591.encode("café ☕"), b"caf\xE9 ?".to_vec());
        assert_eq!(TextEncoding::Iso88591.decode(b"caf\xE9\0"), "café");
    }

    #[test]
    fn test_utf8_trailing_nulls_trimmed() {
        assert_eq!(TextEncoding::Utf8.decode("Foo\0".as_bytes()), "Foo");
        assert_eq!(TextEncoding::Utf8.encode_terminated("Foo"), b"Foo\0".to_vec());
    }

    #[test]
    fn test_split_terminated_respects_utf16_alignment() {
        // 'A' 0x00 followed by 0x00 'B' must not be read as a terminator.
        let bytes = [b'A', 0, 0, b'B', 0, 0, 0xAA];
        let (text, rest) = TextEncoding::Utf16Be.split_terminated(&bytes);
        assert_eq!(text, &[b'A', 0, 0, b'B']);
        assert_eq!(rest, &[0xAA]);

        let (text, rest) = TextEncoding::Utf8.split_terminated(b"desc\0body");
        assert_eq!(text, b"desc");
        assert_eq!(rest, b"body");

        let (text, rest) = TextEncoding::Utf8.split_terminated(b"no terminator");
        assert_eq!(text, b"no terminator");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_version_support() {
        assert!(TextEncoding::Utf8.is_supported_by(Version::V24));
        assert!(!TextEncoding::Utf8.is_supported_by(Version::V23));
        assert!(TextEncoding::Utf16.is_supported_by(Version::V23));
    }
}
