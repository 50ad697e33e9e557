use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tag header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported ID3v2 version: 2.{0}")]
    UnsupportedVersion(u8),

    #[error("Corrupted frame {id}: {reason}")]
    CorruptedFrame { id: String, reason: String },

    #[error("Frame {id} is not a {expected} frame")]
    UnexpectedFrameKind { id: String, expected: &'static str },

    #[error("Tag too large: {0} bytes do not fit the 28-bit size field")]
    TagTooLarge(u64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TagError {
    pub(crate) fn corrupted(id: &str, reason: impl Into<String>) -> Self {
        Self::CorruptedFrame {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
