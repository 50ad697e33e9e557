use std::any::Any;

use super::Framer;

/// Any frame without a dedicated type; the body is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFrame {
    pub body: Vec<u8>,
}

impl UnknownFrame {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }
}

impl Framer for UnknownFrame {
    fn body(&self) -> Vec<u8> {
        self.body.clone()
    }

    fn kind(&self) -> &'static str {
        "unknown"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
