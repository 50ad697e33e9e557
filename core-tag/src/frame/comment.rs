use std::any::Any;

use super::{language_bytes, Framer};
use crate::encoding::TextEncoding;
use crate::error::{Result, TagError};

/// Comment frame (`COMM`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFrame {
    pub encoding: TextEncoding,
    /// ISO-639-2 code, e.g. `"eng"`
    pub language: String,
    pub description: String,
    pub text: String,
}

/// Unsynchronised lyrics/text transcription frame (`USLT`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsynchronisedLyricsFrame {
    pub encoding: TextEncoding,
    pub language: String,
    pub content_descriptor: String,
    pub lyrics: String,
}

/// Shared body of `COMM` and `USLT`: encoding, language, terminated
/// description, text.
struct LanguageText {
    encoding: TextEncoding,
    language: String,
    description: String,
    text: String,
}

impl LanguageText {
    fn body(encoding: TextEncoding, language: &str, description: &str, text: &str) -> Vec<u8> {
        let mut body = vec![encoding.key()];
        body.extend_from_slice(&language_bytes(language));
        body.extend(encoding.encode_terminated(description));
        body.extend(encoding.encode(text));
        body
    }

    fn parse(id: &str, body: &[u8]) -> Result<Self> {
        if body.len() < 4 {
            return Err(TagError::corrupted(
                id,
                format!("body of {} bytes is too short", body.len()),
            ));
        }
        let encoding = TextEncoding::from_key(body[0])
            .ok_or_else(|| TagError::corrupted(id, format!("unknown text encoding {}", body[0])))?;
        let language = String::from_utf8_lossy(&body[1..4]).into_owned();
        let (description, text) = encoding.split_terminated(&body[4..]);

        Ok(Self {
            encoding,
            language,
            description: encoding.decode(description),
            text: encoding.decode(text),
        })
    }
}

impl CommentFrame {
    pub(crate) fn parse(id: &str, body: &[u8]) -> Result<Self> {
        let parsed = LanguageText::parse(id, body)?;
        Ok(Self {
            encoding: parsed.encoding,
            language: parsed.language,
            description: parsed.description,
            text: parsed.text,
        })
    }
}

impl Framer for CommentFrame {
    fn body(&self) -> Vec<u8> {
        LanguageText::body(self.encoding, &self.language, &self.description, &self.text)
    }

    fn kind(&self) -> &'static str {
        "comment"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl UnsynchronisedLyricsFrame {
    pub(crate) fn parse(id: &str, body: &[u8]) -> Result<Self> {
        let parsed = LanguageText::parse(id, body)?;
        Ok(Self {
            encoding: parsed.encoding,
            language: parsed.language,
            content_descriptor: parsed.description,
            lyrics: parsed.text,
        })
    }
}

impl Framer for UnsynchronisedLyricsFrame {
    fn body(&self) -> Vec<u8> {
        LanguageText::body(
            self.encoding,
            &self.language,
            &self.content_descriptor,
            &self.lyrics,
        )
    }

    fn kind(&self) -> &'static str {
        "unsynchronised lyrics"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
