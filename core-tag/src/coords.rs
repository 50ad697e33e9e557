//! Byte ranges of frames that are still sitting unparsed in the file.

use std::collections::BTreeMap;
use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;

/// Location of one frame body in the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    /// Absolute offset of the first body byte (frame header excluded)
    pub offset: u64,
    /// Body length in bytes
    pub len: u64,
}

impl Coordinate {
    pub fn new(offset: u64, len: u64) -> Self {
        Self { offset, len }
    }

    pub fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// Read the body bytes this coordinate points at.
    pub fn read_body<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        reader.seek(SeekFrom::Start(self.offset))?;
        let mut body = vec![0u8; self.len as usize];
        reader.read_exact(&mut body)?;
        Ok(body)
    }
}

/// Per-identifier coordinates in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoordinateIndex {
    entries: BTreeMap<String, Vec<Coordinate>>,
}

impl CoordinateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, coordinate: Coordinate) {
        self.entries.entry(id.into()).or_default().push(coordinate);
    }

    pub fn get(&self, id: &str) -> Option<&[Coordinate]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of identifiers with pending coordinates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded frames across all identifiers.
    pub fn frame_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl IntoIterator for CoordinateIndex {
    type Item = (String, Vec<Coordinate>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<Coordinate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
