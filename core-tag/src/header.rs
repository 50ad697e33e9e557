//! Tag header formatting and parsing.
//!
//! Layout (10 bytes): `"ID3"`, major version, revision, flags, synchsafe size
//! of everything after the header (extended header, frames and padding).

use std::io::{self, Read};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagError};
use crate::size::{self, form_plain_size, form_size, parse_plain_size, parse_size};

/// Length of the tag header (and of the v2.4 footer).
pub const TAG_HEADER_SIZE: u64 = 10;

const TAG_IDENTIFIER: &[u8; 3] = b"ID3";

const FLAG_UNSYNCHRONISATION: u8 = 0x80;
const FLAG_EXTENDED_HEADER: u8 = 0x40;
const FLAG_FOOTER: u8 = 0x10;

/// ID3v2 major version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "2.3")]
    V23,
    #[default]
    #[serde(rename = "2.4")]
    V24,
}

impl Version {
    /// Major version byte as stored in the header.
    pub fn major(self) -> u8 {
        match self {
            Version::V23 => 3,
            Version::V24 => 4,
        }
    }

    pub fn from_major(major: u8) -> Option<Self> {
        match major {
            3 => Some(Version::V23),
            4 => Some(Version::V24),
            _ => None,
        }
    }

    /// Encode a frame body length for this version's frame header.
    pub fn form_frame_size(self, len: u64) -> [u8; size::SIZE_FIELD_LEN] {
        match self {
            Version::V23 => form_plain_size(len),
            Version::V24 => form_size(len),
        }
    }

    pub fn parse_frame_size(self, bytes: &[u8]) -> Result<u64> {
        match self {
            Version::V23 => parse_plain_size(bytes),
            Version::V24 => parse_size(bytes),
        }
    }

    /// Frame format flags that change how the body must be decoded
    /// (compression, encryption, grouping, unsynchronisation, data length).
    pub(crate) fn body_altering_flags(self) -> u8 {
        match self {
            Version::V23 => 0xE0,
            Version::V24 => 0x4F,
        }
    }
}

/// Parsed tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub version: Version,
    pub revision: u8,
    pub flags: u8,
    /// Size of everything between the header and the audio payload, footer excluded.
    pub body_size: u64,
}

impl TagHeader {
    /// Whether the tag body was unsynchronised when written (0xFF followed by
    /// an inserted 0x00).
    pub fn has_unsynchronisation(&self) -> bool {
        self.flags & FLAG_UNSYNCHRONISATION != 0
    }

    pub fn has_extended_header(&self) -> bool {
        self.flags & FLAG_EXTENDED_HEADER != 0
    }

    pub fn has_footer(&self) -> bool {
        self.version == Version::V24 && self.flags & FLAG_FOOTER != 0
    }

    /// Total bytes the tag occupies at the start of the file, i.e. the offset
    /// at which the audio payload begins.
    pub fn tag_size(&self) -> u64 {
        let footer = if self.has_footer() { TAG_HEADER_SIZE } else { 0 };
        TAG_HEADER_SIZE + self.body_size + footer
    }
}

/// Build a tag header. `body_size` is the output of the size codec for the
/// length of the frame buffer.
pub fn form_tag_header(version: Version, body_size: [u8; 4]) -> [u8; TAG_HEADER_SIZE as usize] {
    let mut header = [0u8; TAG_HEADER_SIZE as usize];
    header[..3].copy_from_slice(TAG_IDENTIFIER);
    header[3] = version.major();
    header[4] = 0; // revision
    header[5] = 0; // flags
    header[6..].copy_from_slice(&body_size);
    header
}

/// Parse a tag header. Returns `Ok(None)` when the bytes do not start with `"ID3"`.
pub fn parse_tag_header(bytes: &[u8; TAG_HEADER_SIZE as usize]) -> Result<Option<TagHeader>> {
    if &bytes[..3] != TAG_IDENTIFIER {
        return Ok(None);
    }

    let version = Version::from_major(bytes[3]).ok_or(TagError::UnsupportedVersion(bytes[3]))?;
    let body_size = parse_size(&bytes[6..])?;

    Ok(Some(TagHeader {
        version,
        revision: bytes[4],
        flags: bytes[5],
        body_size,
    }))
}

/// Read and parse the header at the reader's current position.
///
/// A stream shorter than a header is treated as untagged.
pub fn read_tag_header<R: Read>(reader: &mut R) -> Result<Option<TagHeader>> {
    let mut bytes = [0u8; TAG_HEADER_SIZE as usize];
    match reader.read_exact(&mut bytes) {
        Ok(()) => parse_tag_header(&bytes),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_form_tag_header_layout() {
        let header = form_tag_header(Version::V24, form_size(300));
        assert_eq!(&header[..3], b"ID3");
        assert_eq!(header[3], 4);
        assert_eq!(header[4], 0);
        assert_eq!(header[5], 0);
        assert_eq!(&header[6..], &[0, 0, 2, 44]);
    }

    #[test]
    fn test_parse_formed_header() {
        let header = form_tag_header(Version::V23, form_size(1024));
        let parsed = parse_tag_header(&header).unwrap().unwrap();
        assert_eq!(parsed.version, Version::V23);
        assert_eq!(parsed.body_size, 1024);
        assert_eq!(parsed.tag_size(), 1034);
        assert!(!parsed.has_extended_header());
    }

    #[test]
    fn test_parse_untagged() {
        let bytes = *b"\xFF\xFB\x90\x64\0\0\0\0\0\0";
        assert!(parse_tag_header(&bytes).unwrap().is_none());
    }

    #[test]
    fn test_parse_unsupported_version() {
        let mut header = form_tag_header(Version::V24, form_size(0));
        header[3] = 2;
        assert!(matches!(
            parse_tag_header(&header),
            Err(TagError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_footer_counts_towards_tag_size() {
        let mut header = form_tag_header(Version::V24, form_size(100));
        header[5] = FLAG_FOOTER;
        let parsed = parse_tag_header(&header).unwrap().unwrap();
        assert!(parsed.has_footer());
        assert_eq!(parsed.tag_size(), 120);
    }

    #[test]
    fn test_read_short_stream_is_untagged() {
        let mut cursor = Cursor::new(b"ID3".to_vec());
        assert!(read_tag_header(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_version_frame_size_codecs() {
        assert_eq!(Version::V23.form_frame_size(200), [0, 0, 0, 200]);
        assert_eq!(Version::V24.form_frame_size(200), [0, 0, 1, 72]);
        assert_eq!(Version::V24.parse_frame_size(&[0, 0, 1, 72]).unwrap(), 200);
        assert_eq!(Version::default(), Version::V24);
    }
}
