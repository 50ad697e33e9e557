//! Turns identifiers and frames into on-disk frame blocks.

use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::frame::Framer;
use crate::header::Version;
use crate::parser::FRAME_HEADER_SIZE;

/// Build one frame block: identifier, encoded body size, two zero flag bytes,
/// body.
///
/// # Panics
///
/// Panics if `id` is empty. A frame stored under no identifier means the
/// routing logic is broken, and writing it would corrupt the tag.
pub fn form_frame(id: &str, frame: &dyn Framer, version: Version) -> Bytes {
    let mut buf = BytesMut::new();
    write_frame(&mut buf, id, frame, version);
    buf.freeze()
}

/// Append every frame of `frames` to `buf`, identifiers in map order and
/// frames of one identifier in sequence order.
pub fn write_frames(buf: &mut BytesMut, frames: &BTreeMap<String, Vec<&dyn Framer>>, version: Version) {
    for (id, group) in frames {
        for frame in group {
            write_frame(buf, id, *frame, version);
        }
    }
}

/// Serialize all frames into one buffer.
pub fn form_all_frames(frames: &BTreeMap<String, Vec<&dyn Framer>>, version: Version) -> Bytes {
    let mut buf = BytesMut::new();
    write_frames(&mut buf, frames, version);
    buf.freeze()
}

fn write_frame(buf: &mut BytesMut, id: &str, frame: &dyn Framer, version: Version) {
    assert!(!id.is_empty(), "there is a blank ID in frames");

    let body = frame.body();
    buf.reserve(FRAME_HEADER_SIZE as usize + body.len());
    write_frame_header(buf, id, body.len() as u64, version);
    buf.put_slice(&body);
}

fn write_frame_header(buf: &mut BytesMut, id: &str, frame_size: u64, version: Version) {
    buf.put_slice(id.as_bytes());
    buf.put_slice(&version.form_frame_size(frame_size));
    buf.put_slice(&[0, 0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use crate::frame::{TextFrame, UnknownFrame};
    use crate::size::parse_size;

    #[test]
    fn test_form_frame_layout() {
        let frame = TextFrame::new(TextEncoding::Utf8, "Foo");
        let block = form_frame("TIT2", &frame, Version::V24);

        assert_eq!(&block[..4], b"TIT2");
        assert_eq!(parse_size(&block[4..8]).unwrap(), 4);
        assert_eq!(&block[8..10], &[0, 0]);
        assert_eq!(&block[10..], &[3, b'F', b'o', b'o']);
    }

    #[test]
    fn test_form_frame_v23_uses_plain_size() {
        let frame = UnknownFrame::new(vec![7u8; 200]);
        let block = form_frame("PRIV", &frame, Version::V23);
        assert_eq!(&block[4..8], &[0, 0, 0, 200]);
        assert_eq!(block.len(), 210);
    }

    #[test]
    #[should_panic(expected = "blank ID")]
    fn test_form_frame_rejects_empty_id() {
        let frame = TextFrame::new(TextEncoding::Utf8, "Foo");
        form_frame("", &frame, Version::V24);
    }

    #[test]
    fn test_write_frames_concatenates_groups() {
        let a = UnknownFrame::new(b"a".to_vec());
        let b = UnknownFrame::new(b"bb".to_vec());
        let title = TextFrame::new(TextEncoding::Iso88591, "T");

        let mut frames: BTreeMap<String, Vec<&dyn Framer>> = BTreeMap::new();
        frames.insert("PRIV".to_string(), vec![&a as &dyn Framer, &b]);
        frames.insert("TIT2".to_string(), vec![&title as &dyn Framer]);

        let all = form_all_frames(&frames, Version::V24);
        assert_eq!(all.len(), 11 + 12 + 12);
        assert_eq!(&all[..4], b"PRIV");
        assert_eq!(&all[10..11], b"a");
        assert_eq!(&all[11..15], b"PRIV");
        assert_eq!(&all[23..27], b"TIT2");
    }
}
