//! # Tag
//!
//! In-memory model of the ID3v2 tag at the start of an audio file.
//!
//! Opening a file only records where each frame body lives. A frame is decoded
//! the first time its identifier is read, and every pending frame is decoded
//! before the tag is written back.
//!
//! ## Frame addressing
//!
//! Every frame is stored under its four-character identifier. Attached
//! pictures, comments and unsynchronised lyrics may occur several times and
//! are kept in a [`Sequence`] in insertion order; any other identifier holds
//! exactly one frame and a second [`Tag::add_frame`] replaces the first.
//!
//! ## Saving
//!
//! [`Tag::save`] writes the new tag and the untouched audio payload into a
//! temporary file next to the original, then renames it over the original.
//! A failed save leaves the original file as it was.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use core_runtime::logging::strip_path;
use tracing::{debug, warn};

use crate::config::TagConfig;
use crate::coords::Coordinate;
use crate::encoding::TextEncoding;
use crate::error::{Result, TagError};
use crate::frame::{FileFrame, Framer, TextFrame, UnknownFrame};
use crate::header::{form_tag_header, read_tag_header, Version, TAG_HEADER_SIZE};
use crate::ids::{self, IdTable};
use crate::parser::{parse_frame, scan_frames};
use crate::sequence::{Sequence, SequenceKind};
use crate::serializer::form_all_frames;
use crate::size::{form_size, MAX_SYNCHSAFE};

/// Storage state of one identifier.
#[derive(Debug)]
enum Slot {
    /// Bodies still in the file, in file order
    Pending(Vec<Coordinate>),
    Single(Box<dyn Framer>),
    Sequence(Sequence),
}

/// Where frames added under an identifier go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Single,
    Sequence(SequenceKind),
}

const SEQUENCE_KINDS: [SequenceKind; 3] = [
    SequenceKind::Pictures,
    SequenceKind::Comments,
    SequenceKind::UnsynchronisedLyrics,
];

/// An ID3v2 tag bound to the file it was read from.
///
/// Mutators take `&mut self`; wrap the tag in a `Mutex` to share it between
/// threads.
#[derive(Debug)]
pub struct Tag {
    slots: BTreeMap<String, Slot>,
    ids: &'static IdTable,
    version: Version,
    config: TagConfig,
    file: File,
    path: PathBuf,
    /// Length of the tag region in the file, i.e. where the audio starts
    original_size: u64,
}

impl Tag {
    /// Open `path` with the default [`TagConfig`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, TagConfig::default())
    }

    /// Open `path` and index the frames of its tag.
    ///
    /// A file without a tag opens as an empty tag of
    /// [`TagConfig::default_version`].
    ///
    /// # Errors
    ///
    /// - [`TagError::Config`] if `config` does not validate
    /// - [`TagError::Io`] if the file cannot be opened or read
    /// - [`TagError::UnsupportedVersion`] for tags other than 2.3 and 2.4
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: TagConfig) -> Result<Self> {
        config.validate()?;

        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        let file_len = file.metadata()?.len();

        let mut slots = BTreeMap::new();
        let (version, original_size) = match read_tag_header(&mut file)? {
            Some(mut header) => {
                let mut tag_size = header.tag_size();
                if tag_size > file_len {
                    warn!(
                        file = %strip_path(&path.to_string_lossy()),
                        declared = tag_size,
                        actual = file_len,
                        "tag size exceeds file length, clamping"
                    );
                    header.body_size = file_len.saturating_sub(TAG_HEADER_SIZE);
                    tag_size = file_len;
                }

                if config.parse_on_open {
                    for (id, coordinates) in scan_frames(&mut file, &header)? {
                        slots.insert(id, Slot::Pending(coordinates));
                    }
                }
                (header.version, tag_size)
            }
            None => (config.default_version, 0),
        };

        debug!(
            file = %strip_path(&path.to_string_lossy()),
            version = version.major(),
            identifiers = slots.len(),
            tag_size = original_size,
            "opened tag"
        );

        Ok(Self {
            slots,
            ids: IdTable::for_version(version),
            version,
            config,
            file,
            path,
            original_size,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// Identifier for a frame description in this tag's version, or `""` if
    /// the description is unknown.
    ///
    /// ```ignore
    /// assert_eq!(tag.id("Mood"), "TMOO");
    /// ```
    pub fn id(&self, description: &str) -> &'static str {
        self.ids.get(description).unwrap_or("")
    }

    fn route(&self, id: &str) -> Route {
        SEQUENCE_KINDS
            .iter()
            .find(|kind| self.ids.get(kind.description()) == Some(id))
            .map_or(Route::Single, |&kind| Route::Sequence(kind))
    }

    /// Store `frame` under `id`.
    ///
    /// Pictures, comments and lyrics are appended to the identifier's
    /// sequence, after any frames already in the file. Every other identifier
    /// keeps only the frame added last.
    ///
    /// # Errors
    ///
    /// Appending to a sequence first reads the identifier's frames from the
    /// file, which can fail with [`TagError::Io`].
    pub fn add_frame<F: Framer>(&mut self, id: &str, frame: F) -> Result<()> {
        match self.route(id) {
            Route::Sequence(kind) => {
                self.materialize(id)?;
                self.check_existence_of_sequence(id, kind);
                self.add_frame_to_sequence(id, Box::new(frame));
            }
            Route::Single => self.set_single(id, Box::new(frame)),
        }
        Ok(())
    }

    fn set_single(&mut self, id: &str, frame: Box<dyn Framer>) {
        debug!(frame = id, kind = frame.kind(), "set frame");
        self.slots.insert(id.to_string(), Slot::Single(frame));
    }

    /// Create an empty sequence for `id` unless one exists.
    fn check_existence_of_sequence(&mut self, id: &str, kind: SequenceKind) {
        if !matches!(self.slots.get(id), Some(Slot::Sequence(_))) {
            self.slots
                .insert(id.to_string(), Slot::Sequence(Sequence::new(kind)));
        }
    }

    fn add_frame_to_sequence(&mut self, id: &str, frame: Box<dyn Framer>) {
        if let Some(Slot::Sequence(sequence)) = self.slots.get_mut(id) {
            debug!(frame = id, position = sequence.len(), "appended frame");
            sequence.add_frame(frame);
        }
    }

    /// Decode the pending frames of `id`, if any. Decoded frames keep the
    /// bytes they were read from and are saved with them.
    fn materialize(&mut self, id: &str) -> Result<()> {
        let coordinates = match self.slots.get(id) {
            Some(Slot::Pending(coordinates)) => coordinates.clone(),
            _ => return Ok(()),
        };

        let mut frames = Vec::with_capacity(coordinates.len());
        for coordinate in &coordinates {
            let body = coordinate.read_body(&mut self.file)?;
            let frame: Box<dyn Framer> = match parse_frame(id, &body) {
                Ok(frame) => Box::new(FileFrame::new(frame, body)),
                Err(TagError::CorruptedFrame { reason, .. }) => {
                    warn!(
                        frame = id,
                        offset = coordinate.offset,
                        %reason,
                        "keeping undecodable frame as raw bytes"
                    );
                    Box::new(UnknownFrame::new(body))
                }
                Err(err) => return Err(err),
            };
            frames.push(frame);
        }

        let slot = match self.route(id) {
            Route::Sequence(kind) => Slot::Sequence(Sequence::from_frames(kind, frames)),
            Route::Single => {
                if frames.len() > 1 {
                    debug!(
                        frame = id,
                        count = frames.len(),
                        "identifier occurs several times, keeping the last"
                    );
                }
                match frames.pop() {
                    Some(frame) => Slot::Single(frame),
                    None => {
                        self.slots.remove(id);
                        return Ok(());
                    }
                }
            }
        };
        self.slots.insert(id.to_string(), slot);
        Ok(())
    }

    fn materialize_all(&mut self) -> Result<()> {
        let pending: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Pending(_)))
            .map(|(id, _)| id.clone())
            .collect();

        for id in pending {
            self.materialize(&id)?;
        }
        Ok(())
    }

    /// All frames stored under `id`, in order. Empty if there are none.
    pub fn get_frames(&mut self, id: &str) -> Result<Vec<&dyn Framer>> {
        self.materialize(id)?;
        Ok(match self.slots.get(id) {
            Some(Slot::Single(frame)) => vec![&**frame],
            Some(Slot::Sequence(sequence)) => sequence.frames(),
            Some(Slot::Pending(_)) | None => Vec::new(),
        })
    }

    /// The frame added last under `id`.
    pub fn get_last_frame(&mut self, id: &str) -> Result<Option<&dyn Framer>> {
        Ok(self.get_frames(id)?.pop())
    }

    /// Every frame of the tag, grouped by identifier.
    pub fn all_frames(&mut self) -> Result<BTreeMap<String, Vec<&dyn Framer>>> {
        self.materialize_all()?;

        let mut frames = BTreeMap::new();
        for (id, slot) in &self.slots {
            let group: Vec<&dyn Framer> = match slot {
                Slot::Single(frame) => vec![&**frame],
                Slot::Sequence(sequence) => sequence.frames(),
                Slot::Pending(_) => continue,
            };
            if !group.is_empty() {
                frames.insert(id.clone(), group);
            }
        }
        Ok(frames)
    }

    /// Whether anything is stored under `id`, decoded or not.
    pub fn has_frames(&self, id: &str) -> bool {
        match self.slots.get(id) {
            Some(Slot::Sequence(sequence)) => !sequence.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Remove every frame stored under `id`. Returns whether any existed.
    pub fn delete_frames(&mut self, id: &str) -> bool {
        let existed = self.has_frames(id);
        self.slots.remove(id);
        if existed {
            debug!(frame = id, "deleted frames");
        }
        existed
    }

    pub fn delete_all_frames(&mut self) {
        self.slots.clear();
    }

    /// Number of frames the next save writes.
    pub fn count(&self) -> usize {
        self.slots
            .iter()
            .map(|(id, slot)| match slot {
                Slot::Single(_) => 1,
                Slot::Sequence(sequence) => sequence.len(),
                Slot::Pending(coordinates) => match self.route(id) {
                    Route::Sequence(_) => coordinates.len(),
                    Route::Single => 1,
                },
            })
            .sum()
    }

    /// The last frame of `id` as a text frame.
    ///
    /// # Errors
    ///
    /// [`TagError::UnexpectedFrameKind`] if the frame is not a text frame.
    /// A missing frame is not an error and yields an empty [`TextFrame`].
    pub fn get_text_frame(&mut self, id: &str) -> Result<TextFrame> {
        match self.get_last_frame(id)? {
            None => Ok(TextFrame::default()),
            Some(frame) => frame.downcast_ref::<TextFrame>().cloned().ok_or_else(|| {
                TagError::UnexpectedFrameKind {
                    id: id.to_string(),
                    expected: "text",
                }
            }),
        }
    }

    fn text(&mut self, description: &str) -> Result<String> {
        let id = self.id(description);
        if id.is_empty() {
            return Ok(String::new());
        }
        Ok(self.get_text_frame(id)?.text)
    }

    fn set_text(&mut self, description: &str, text: &str) -> Result<()> {
        let id = self.id(description);
        let frame = TextFrame::new(self.text_encoding(), text);
        self.add_frame(id, frame)
    }

    /// Encoding for frames built by the setters. Falls back to UTF-16 when
    /// the configured encoding does not exist in this tag's version.
    fn text_encoding(&self) -> TextEncoding {
        let encoding = self.config.default_encoding;
        if encoding.is_supported_by(self.version) {
            encoding
        } else {
            TextEncoding::Utf16
        }
    }

    pub fn title(&mut self) -> Result<String> {
        self.text(ids::TITLE)
    }

    pub fn artist(&mut self) -> Result<String> {
        self.text(ids::ARTIST)
    }

    pub fn album(&mut self) -> Result<String> {
        self.text(ids::ALBUM)
    }

    /// Recording time (`TDRC`) in v2.4, year (`TYER`) in v2.3.
    pub fn year(&mut self) -> Result<String> {
        self.text(ids::YEAR)
    }

    pub fn genre(&mut self) -> Result<String> {
        self.text(ids::GENRE)
    }

    /// Store `title` as a text frame in the configured default encoding.
    /// The setters below do the same for their frame.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.set_text(ids::TITLE, title)
    }

    pub fn set_artist(&mut self, artist: &str) -> Result<()> {
        self.set_text(ids::ARTIST, artist)
    }

    pub fn set_album(&mut self, album: &str) -> Result<()> {
        self.set_text(ids::ALBUM, album)
    }

    pub fn set_year(&mut self, year: &str) -> Result<()> {
        self.set_text(ids::YEAR, year)
    }

    pub fn set_genre(&mut self, genre: &str) -> Result<()> {
        self.set_text(ids::GENRE, genre)
    }

    /// Write the tag back to the file.
    ///
    /// The new tag plus the audio payload go to a temporary file that then
    /// replaces the original through a rename. The original file's
    /// permissions are carried over.
    ///
    /// # Errors
    ///
    /// - [`TagError::TagTooLarge`] if the frames do not fit the size field
    /// - [`TagError::Io`] on any read or write failure, including the file
    ///   having been removed since it was opened
    ///
    /// The original file is untouched when an error is returned.
    ///
    /// # Panics
    ///
    /// Panics if a frame is stored under an empty identifier.
    pub fn save(&mut self) -> Result<()> {
        let version = self.version;
        let padding = self.config.padding;

        let frames = form_all_frames(&self.all_frames()?, version);
        let body_size = frames.len() as u64 + padding as u64;
        if body_size > MAX_SYNCHSAFE {
            return Err(TagError::TagTooLarge(body_size));
        }
        let header = form_tag_header(version, form_size(body_size));

        let dir = match &self.config.temp_dir {
            Some(dir) => dir.clone(),
            None => self
                .path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        };
        let mut temp = tempfile::Builder::new()
            .prefix(".tag-")
            .suffix(".tmp")
            .tempfile_in(&dir)?;

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            writer.write_all(&header)?;
            writer.write_all(&frames)?;
            writer.write_all(&vec![0u8; padding])?;

            self.file.seek(SeekFrom::Start(self.original_size))?;
            let payload = io::copy(&mut self.file, &mut writer)?;
            writer.flush()?;
            debug!(
                tag_size = TAG_HEADER_SIZE + body_size,
                payload, "wrote temporary file"
            );
        }

        let permissions = fs::metadata(&self.path)?.permissions();
        temp.as_file().set_permissions(permissions)?;
        temp.as_file().sync_all()?;

        let file = temp.persist(&self.path).map_err(|e| TagError::Io(e.error))?;
        self.file = file;
        self.original_size = TAG_HEADER_SIZE + body_size;

        debug!(
            file = %strip_path(&self.path.to_string_lossy()),
            frames = self.count(),
            tag_size = self.original_size,
            "saved tag"
        );
        Ok(())
    }

    /// Release the file handle.
    pub fn close(self) -> Result<()> {
        debug!(file = %strip_path(&self.path.to_string_lossy()), "closed tag");
        Ok(())
    }
}
