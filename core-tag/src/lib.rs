//! # Core Tag
//!
//! Reading and rewriting ID3v2.3 / ID3v2.4 tags at the start of audio files.
//!
//! ## Overview
//!
//! - [`Tag`]: the tag of one file. Frames are indexed on open and decoded on
//!   first access; [`Tag::save`] rewrites the file atomically.
//! - [`Framer`]: anything that serializes into a frame body. Concrete frames
//!   live in [`frame`].
//! - [`Sequence`]: ordered frames under one repeatable identifier (pictures,
//!   comments, lyrics).
//! - [`config::TagConfig`]: open and save options.
//!
//! ## Example
//!
//! ```ignore
//! use core_tag::Tag;
//!
//! let mut tag = Tag::open("song.mp3")?;
//! println!("{} - {}", tag.artist()?, tag.title()?);
//!
//! tag.set_title("Foo")?;
//! tag.set_artist("Bar")?;
//! tag.save()?;
//! ```

pub mod config;
pub mod coords;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod header;
pub mod ids;
pub mod parser;
pub mod sequence;
pub mod serializer;
pub mod size;
pub mod tag;

pub use config::TagConfig;
pub use encoding::TextEncoding;
pub use error::{Result, TagError};
pub use frame::{
    CommentFrame, Framer, PictureFrame, PictureType, TextFrame, UnknownFrame,
    UnsynchronisedLyricsFrame,
};
pub use header::Version;
pub use sequence::{Sequence, SequenceKind};
pub use tag::Tag;
