use std::any::Any;

use super::Framer;
use crate::encoding::TextEncoding;
use crate::error::{Result, TagError};

/// Picture type byte of an attached picture frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PictureType {
    #[default]
    Other,
    FileIcon,
    OtherFileIcon,
    CoverFront,
    CoverBack,
    LeafletPage,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    VideoScreenCapture,
    BrightColouredFish,
    Illustration,
    BandLogotype,
    PublisherLogotype,
}

const PICTURE_TYPES: [PictureType; 21] = [
    PictureType::Other,
    PictureType::FileIcon,
    PictureType::OtherFileIcon,
    PictureType::CoverFront,
    PictureType::CoverBack,
    PictureType::LeafletPage,
    PictureType::Media,
    PictureType::LeadArtist,
    PictureType::Artist,
    PictureType::Conductor,
    PictureType::Band,
    PictureType::Composer,
    PictureType::Lyricist,
    PictureType::RecordingLocation,
    PictureType::DuringRecording,
    PictureType::DuringPerformance,
    PictureType::VideoScreenCapture,
    PictureType::BrightColouredFish,
    PictureType::Illustration,
    PictureType::BandLogotype,
    PictureType::PublisherLogotype,
];

impl PictureType {
    pub fn key(self) -> u8 {
        PICTURE_TYPES
            .iter()
            .position(|&t| t == self)
            .map_or(0, |i| i as u8)
    }

    /// Unknown keys fall back to [`PictureType::Other`].
    pub fn from_key(key: u8) -> Self {
        PICTURE_TYPES
            .get(usize::from(key))
            .copied()
            .unwrap_or_default()
    }
}

/// Attached picture frame (`APIC`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureFrame {
    pub encoding: TextEncoding,
    pub mime_type: String,
    pub picture_type: PictureType,
    pub description: String,
    pub picture: Vec<u8>,
}

impl PictureFrame {
    pub(crate) fn parse(id: &str, body: &[u8]) -> Result<Self> {
        let (&key, rest) = body
            .split_first()
            .ok_or_else(|| TagError::corrupted(id, "empty picture frame"))?;
        let encoding = TextEncoding::from_key(key)
            .ok_or_else(|| TagError::corrupted(id, format!("unknown text encoding {}", key)))?;

        // MIME type is always Latin-1
        let (mime_type, rest) = TextEncoding::Iso88591.split_terminated(rest);
        let (&picture_type, rest) = rest
            .split_first()
            .ok_or_else(|| TagError::corrupted(id, "missing picture type"))?;
        let (description, picture) = encoding.split_terminated(rest);

        Ok(Self {
            encoding,
            mime_type: TextEncoding::Iso88591.decode(mime_type),
            picture_type: PictureType::from_key(picture_type),
            description: encoding.decode(description),
            picture: picture.to_vec(),
        })
    }
}

impl Framer for PictureFrame {
    fn body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.picture.len() + self.mime_type.len() + 16);
        body.push(self.encoding.key());
        body.extend(TextEncoding::Iso88591.encode_terminated(&self.mime_type));
        body.push(self.picture_type.key());
        body.extend(self.encoding.encode_terminated(&self.description));
        body.extend_from_slice(&self.picture);
        body
    }

    fn kind(&self) -> &'static str {
        "picture"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover() -> PictureFrame {
        PictureFrame {
            encoding: TextEncoding::Utf8,
            mime_type: "image/png".to_string(),
            picture_type: PictureType::CoverFront,
            description: "Front".to_string(),
            picture: vec![0x89, b'P', b'N', b'G', 0, 0, 1],
        }
    }

    #[test]
    fn test_body_layout() {
        let body = cover().body();
        assert_eq!(body[0], 3);
        assert_eq!(&body[1..11], b"image/png\0");
        assert_eq!(body[11], 3);
        assert_eq!(&body[12..18], b"Front\0");
        assert_eq!(&body[18..], &[0x89, b'P', b'N', b'G', 0, 0, 1]);
    }

    #[test]
    fn test_parse_keeps_picture_bytes_with_nulls() {
        let frame = cover();
        assert_eq!(PictureFrame::parse("APIC", &frame.body()).unwrap(), frame);
    }

    #[test]
    fn test_picture_type_keys() {
        assert_eq!(PictureType::CoverFront.key(), 3);
        assert_eq!(PictureType::PublisherLogotype.key(), 0x14);
        assert_eq!(PictureType::from_key(4), PictureType::CoverBack);
        assert_eq!(PictureType::from_key(200), PictureType::Other);
    }

    #[test]
    fn test_parse_truncated() {
        assert!(PictureFrame::parse("APIC", &[3, b'i', 0]).is_err());
    }
}
