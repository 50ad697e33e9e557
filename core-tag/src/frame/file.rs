use std::any::Any;

use super::Framer;

/// A decoded frame together with the body it was read from.
///
/// Typed access sees the decoded frame; serialization writes the original
/// bytes, so a frame the caller never replaced is saved byte for byte even
/// when decoding was lossy.
#[derive(Debug)]
pub(crate) struct FileFrame {
    decoded: Box<dyn Framer>,
    raw: Vec<u8>,
}

impl FileFrame {
    pub(crate) fn new(decoded: Box<dyn Framer>, raw: Vec<u8>) -> Self {
        Self { decoded, raw }
    }
}

impl Framer for FileFrame {
    fn body(&self) -> Vec<u8> {
        self.raw.clone()
    }

    fn kind(&self) -> &'static str {
        self.decoded.kind()
    }

    fn as_any(&self) -> &dyn Any {
        self.decoded.as_any()
    }
}
