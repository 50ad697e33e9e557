//! Frame scanning and body decoding.
//!
//! Opening a tag only walks the frame headers ([`scan_frames`]) and records
//! where each body lives. Bodies are decoded later, per identifier, with
//! [`parse_frame`].

use std::io::{Read, Seek, SeekFrom};

use tracing::{debug, warn};

use crate::coords::{Coordinate, CoordinateIndex};
use crate::error::Result;
use crate::frame::{
    CommentFrame, Framer, PictureFrame, TextFrame, UnknownFrame, UnsynchronisedLyricsFrame,
};
use crate::header::{TagHeader, Version, TAG_HEADER_SIZE};
use crate::size::parse_size;

/// Length of a frame header: identifier, size, two flag bytes.
pub const FRAME_HEADER_SIZE: u64 = 10;

/// Walk the frame headers of the tag described by `header` and record the
/// coordinates of every frame body.
///
/// Scanning stops at padding, at the end of the tag, or at the first header
/// that does not look like a frame. Frames whose flags change how the body is
/// stored (compression, encryption, unsynchronisation) are skipped, and so is
/// every frame of a tag whose header flags it as unsynchronised.
pub fn scan_frames<R: Read + Seek>(reader: &mut R, header: &TagHeader) -> Result<CoordinateIndex> {
    let mut index = CoordinateIndex::new();
    if header.has_unsynchronisation() {
        warn!(
            version = header.version.major(),
            "tag is unsynchronised, dropping its frames"
        );
        return Ok(index);
    }

    let end = TAG_HEADER_SIZE + header.body_size;
    let mut pos = TAG_HEADER_SIZE;

    if header.has_extended_header() {
        pos += extended_header_len(reader, header.version)?;
    }

    let mut frame_header = [0u8; FRAME_HEADER_SIZE as usize];

    while pos + FRAME_HEADER_SIZE <= end {
        reader.seek(SeekFrom::Start(pos))?;
        reader.read_exact(&mut frame_header)?;

        if frame_header[0] == 0 {
            debug!(offset = pos, "reached padding");
            break;
        }

        let id_bytes = &frame_header[..4];
        if !id_bytes
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            warn!(offset = pos, "invalid frame identifier, ignoring rest of tag");
            break;
        }
        // Validated as ASCII above
        let id = String::from_utf8_lossy(id_bytes).into_owned();

        let size = match header.version.parse_frame_size(&frame_header[4..8]) {
            Ok(size) => size,
            Err(err) => {
                warn!(frame = %id, error = %err, "invalid frame size, ignoring rest of tag");
                break;
            }
        };
        let body_offset = pos + FRAME_HEADER_SIZE;
        if body_offset + size > end {
            warn!(
                frame = %id,
                size,
                "frame overruns tag, ignoring rest of tag"
            );
            break;
        }

        let format_flags = frame_header[9];
        if format_flags & header.version.body_altering_flags() != 0 {
            warn!(
                frame = %id,
                flags = format_flags,
                "frame body is compressed, encrypted or unsynchronised, dropping it"
            );
        } else {
            index.push(id, Coordinate::new(body_offset, size));
        }

        pos = body_offset + size;
    }

    debug!(
        identifiers = index.len(),
        frames = index.frame_count(),
        "scanned frame headers"
    );
    Ok(index)
}

/// Size of the extended header that directly follows the tag header.
fn extended_header_len<R: Read + Seek>(reader: &mut R, version: Version) -> Result<u64> {
    reader.seek(SeekFrom::Start(TAG_HEADER_SIZE))?;
    let mut size = [0u8; 4];
    reader.read_exact(&mut size)?;

    Ok(match version {
        // v2.3: size excludes the size field itself
        Version::V23 => u64::from(u32::from_be_bytes(size)) + 4,
        // v2.4: synchsafe size of the whole extended header
        Version::V24 => parse_size(&size)?,
    })
}

/// Decode one frame body into the frame type registered for `id`.
///
/// Identifiers without a dedicated type are returned as [`UnknownFrame`].
pub fn parse_frame(id: &str, body: &[u8]) -> Result<Box<dyn Framer>> {
    let frame: Box<dyn Framer> = match id {
        "APIC" => Box::new(PictureFrame::parse(id, body)?),
        "COMM" => Box::new(CommentFrame::parse(id, body)?),
        "USLT" => Box::new(UnsynchronisedLyricsFrame::parse(id, body)?),
        "TXXX" => Box::new(UnknownFrame::new(body)),
        _ if id.starts_with('T') => Box::new(TextFrame::parse(id, body)?),
        _ => Box::new(UnknownFrame::new(body)),
    };
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use crate::header::{form_tag_header, parse_tag_header};
    use crate::size::form_size;
    use std::io::Cursor;

    fn frame_bytes(id: &str, body: &[u8], flags: [u8; 2]) -> Vec<u8> {
        let mut out = id.as_bytes().to_vec();
        out.extend_from_slice(&form_size(body.len() as u64));
        out.extend_from_slice(&flags);
        out.extend_from_slice(body);
        out
    }

    fn tag_bytes(frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
        let body: Vec<u8> = frames.concat();
        let mut out = form_tag_header(Version::V24, form_size((body.len() + padding) as u64)).to_vec();
        out.extend(body);
        out.extend(std::iter::repeat(0).take(padding));
        out.extend_from_slice(b"\xFF\xFBaudio");
        out
    }

    fn header_of(bytes: &[u8]) -> TagHeader {
        let mut header = [0u8; 10];
        header.copy_from_slice(&bytes[..10]);
        parse_tag_header(&header).unwrap().unwrap()
    }

    #[test]
    fn test_scan_records_coordinates() {
        let bytes = tag_bytes(
            &[
                frame_bytes("TIT2", b"\x03Foo", [0, 0]),
                frame_bytes("APIC", b"pic-a", [0, 0]),
                frame_bytes("APIC", b"pic-b!", [0, 0]),
            ],
            16,
        );
        let header = header_of(&bytes);

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert_eq!(index.get("TIT2"), Some(&[Coordinate::new(20, 4)][..]));
        assert_eq!(
            index.get("APIC"),
            Some(&[Coordinate::new(34, 5), Coordinate::new(49, 6)][..])
        );
        assert_eq!(index.frame_count(), 3);
    }

    #[test]
    fn test_scan_drops_compressed_frames() {
        let bytes = tag_bytes(
            &[
                frame_bytes("TIT2", b"\x03Foo", [0, 0x08]),
                frame_bytes("TPE1", b"\x03Bar", [0, 0]),
            ],
            0,
        );
        let header = header_of(&bytes);

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert!(index.get("TIT2").is_none());
        assert!(index.get("TPE1").is_some());
    }

    #[test]
    fn test_scan_stops_at_garbage_identifier() {
        let bytes = tag_bytes(
            &[
                frame_bytes("TIT2", b"\x03Foo", [0, 0]),
                frame_bytes("ti!2", b"\x03Bar", [0, 0]),
            ],
            0,
        );
        let header = header_of(&bytes);

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert_eq!(index.ids().collect::<Vec<_>>(), ["TIT2"]);
    }

    #[test]
    fn test_scan_stops_when_frame_overruns_tag() {
        let mut frame = frame_bytes("TIT2", b"\x03Foo", [0, 0]);
        frame[7] = 100; // claims 100 bytes
        let bytes = tag_bytes(&[frame], 0);
        let header = header_of(&bytes);

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_scan_stops_at_non_synchsafe_size() {
        let mut frame = frame_bytes("TPE1", b"\x03Bar", [0, 0]);
        frame[7] = 0x84;
        let bytes = tag_bytes(&[frame_bytes("TIT2", b"\x03Foo", [0, 0]), frame], 0);
        let header = header_of(&bytes);

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert_eq!(index.ids().collect::<Vec<_>>(), ["TIT2"]);
    }

    #[test]
    fn test_scan_drops_unsynchronised_tag() {
        let mut bytes = tag_bytes(&[frame_bytes("PRIV", b"\xFF\x00\xE0", [0, 0])], 0);
        bytes[5] = 0x80;
        let header = header_of(&bytes);
        assert!(header.has_unsynchronisation());

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_scan_skips_v24_extended_header() {
        let ext = [0, 0, 0, 6, 1, 0];
        let frame = frame_bytes("TIT2", b"\x03Foo", [0, 0]);
        let mut bytes = form_tag_header(Version::V24, form_size((ext.len() + frame.len()) as u64)).to_vec();
        bytes[5] = 0x40;
        bytes.extend_from_slice(&ext);
        bytes.extend(frame);
        let header = header_of(&bytes);

        let index = scan_frames(&mut Cursor::new(&bytes), &header).unwrap();
        assert_eq!(index.get("TIT2"), Some(&[Coordinate::new(26, 4)][..]));
    }

    #[test]
    fn test_parse_frame_dispatch() {
        let text = parse_frame("TALB", b"\x03Album").unwrap();
        assert_eq!(
            text.downcast_ref::<TextFrame>().unwrap(),
            &TextFrame::new(TextEncoding::Utf8, "Album")
        );

        let user_text = parse_frame("TXXX", b"\x03key\0value").unwrap();
        assert!(user_text.is::<UnknownFrame>());

        let private = parse_frame("PRIV", b"owner\0data").unwrap();
        assert_eq!(private.body(), b"owner\0data");

        assert!(parse_frame("COMM", b"\x03e").is_err());
    }
}
