use std::any::Any;

use super::Framer;
use crate::encoding::TextEncoding;
use crate::error::{Result, TagError};

/// Text information frame (`T???` except `TXXX`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFrame {
    pub encoding: TextEncoding,
    pub text: String,
}

impl TextFrame {
    pub fn new(encoding: TextEncoding, text: impl Into<String>) -> Self {
        Self {
            encoding,
            text: text.into(),
        }
    }

    pub(crate) fn parse(id: &str, body: &[u8]) -> Result<Self> {
        let (&key, text) = body
            .split_first()
            .ok_or_else(|| TagError::corrupted(id, "empty text frame"))?;
        let encoding = TextEncoding::from_key(key)
            .ok_or_else(|| TagError::corrupted(id, format!("unknown text encoding {}", key)))?;

        Ok(Self {
            encoding,
            text: encoding.decode(text),
        })
    }
}

impl Framer for TextFrame {
    fn body(&self) -> Vec<u8> {
        let mut body = vec![self.encoding.key()];
        body.extend(self.encoding.encode(&self.text));
        body
    }

    fn kind(&self) -> &'static str {
        "text"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_layout() {
        let frame = TextFrame::new(TextEncoding::Utf8, "Foo");
        assert_eq!(frame.body(), vec![3, b'F', b'o', b'o']);
    }

    #[test]
    fn test_parse_body() {
        let frame = TextFrame::parse("TIT2", &[0, b'B', b'a', b'r', 0]).unwrap();
        assert_eq!(frame, TextFrame::new(TextEncoding::Iso88591, "Bar"));

        let utf16 = TextFrame::new(TextEncoding::Utf16, "Grüße");
        assert_eq!(TextFrame::parse("TIT2", &utf16.body()).unwrap(), utf16);
    }

    #[test]
    fn test_parse_rejects_bad_bodies() {
        assert!(matches!(
            TextFrame::parse("TIT2", &[]),
            Err(TagError::CorruptedFrame { .. })
        ));
        assert!(TextFrame::parse("TIT2", &[9, b'x']).is_err());
    }
}
