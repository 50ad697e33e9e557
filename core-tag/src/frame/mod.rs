//! Frame capability and the concrete frame types.
//!
//! The tag never looks inside a frame: it only asks for the serialized body
//! through [`Framer::body`]. Typed access goes through a checked downcast
//! ([`downcast_ref`](trait.Framer.html#method.downcast_ref)).

mod comment;
mod file;
mod picture;
mod text;
mod unknown;

use std::any::Any;
use std::fmt;

pub use comment::{CommentFrame, UnsynchronisedLyricsFrame};
pub(crate) use file::FileFrame;
pub use picture::{PictureFrame, PictureType};
pub use text::TextFrame;
pub use unknown::UnknownFrame;

/// A value that can serialize itself into a frame body.
pub trait Framer: fmt::Debug + Send + 'static {
    /// Serialized frame body, without the 10-byte frame header.
    fn body(&self) -> Vec<u8>;

    /// Short kind name used in error messages.
    fn kind(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Framer + 'a {
    /// Checked access to the concrete frame type.
    pub fn downcast_ref<T: Framer>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Framer>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// ISO-639-2 language code padded or truncated to exactly three bytes.
pub(crate) fn language_bytes(language: &str) -> [u8; 3] {
    let mut out = *b"XXX";
    for (slot, byte) in out.iter_mut().zip(language.bytes()) {
        *slot = byte;
    }
    out
}
