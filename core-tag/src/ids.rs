//! Human-readable frame descriptions mapped to four-character identifiers.
//!
//! Descriptions follow the wording of the ID3v2 frame lists, so
//! `ids.get("Mood")` is `Some("TMOO")` for a v2.4 table.

use crate::header::Version;

pub const ATTACHED_PICTURE: &str = "Attached picture";
pub const COMMENTS: &str = "Comments";
pub const UNSYNCHRONISED_LYRICS: &str = "Unsynchronised lyrics/text transcription";

pub const TITLE: &str = "Title/Songname/Content description";
pub const ARTIST: &str = "Lead artist/Lead performer/Soloist/Performing group";
pub const ALBUM: &str = "Album/Movie/Show title";
pub const YEAR: &str = "Recording time";
pub const GENRE: &str = "Content type";

/// Static description → identifier table for one tag version.
#[derive(Debug, PartialEq, Eq)]
pub struct IdTable {
    version: Version,
    entries: &'static [(&'static str, &'static str)],
}

impl IdTable {
    pub fn for_version(version: Version) -> &'static IdTable {
        match version {
            Version::V23 => &V23_IDS,
            Version::V24 => &V24_IDS,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn get(&self, description: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(d, _)| *d == description)
            .map(|&(_, id)| id)
    }

    /// Reverse lookup, mostly useful for log messages.
    pub fn description(&self, id: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, i)| *i == id)
            .map(|&(d, _)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

static V23_IDS: IdTable = IdTable {
    version: Version::V23,
    entries: &[
        (ATTACHED_PICTURE, "APIC"),
        (COMMENTS, "COMM"),
        (ALBUM, "TALB"),
        ("BPM", "TBPM"),
        ("Composer", "TCOM"),
        (GENRE, "TCON"),
        ("Copyright message", "TCOP"),
        ("Date", "TDAT"),
        ("Playlist delay", "TDLY"),
        ("Encoded by", "TENC"),
        ("Lyricist/Text writer", "TEXT"),
        ("File type", "TFLT"),
        ("Involved people list", "IPLS"),
        ("Time", "TIME"),
        ("Content group description", "TIT1"),
        (TITLE, "TIT2"),
        ("Subtitle/Description refinement", "TIT3"),
        ("Initial key", "TKEY"),
        ("Language", "TLAN"),
        ("Length", "TLEN"),
        ("Media type", "TMED"),
        ("Original album/movie/show title", "TOAL"),
        ("Original filename", "TOFN"),
        ("Original lyricist/text writer", "TOLY"),
        ("Original artist/performer", "TOPE"),
        ("Original release year", "TORY"),
        ("File owner/licensee", "TOWN"),
        (ARTIST, "TPE1"),
        ("Band/Orchestra/Accompaniment", "TPE2"),
        ("Conductor/performer refinement", "TPE3"),
        ("Interpreted, remixed, or otherwise modified by", "TPE4"),
        ("Part of a set", "TPOS"),
        ("Publisher", "TPUB"),
        ("Track number/Position in set", "TRCK"),
        ("Recording dates", "TRDA"),
        ("Internet radio station name", "TRSN"),
        ("Internet radio station owner", "TRSO"),
        ("Size", "TSIZ"),
        ("ISRC", "TSRC"),
        ("Software/Hardware and settings used for encoding", "TSSE"),
        (YEAR, "TYER"),
        ("Year", "TYER"),
        ("User defined text information frame", "TXXX"),
        (UNSYNCHRONISED_LYRICS, "USLT"),
    ],
};

static V24_IDS: IdTable = IdTable {
    version: Version::V24,
    entries: &[
        (ATTACHED_PICTURE, "APIC"),
        (COMMENTS, "COMM"),
        (ALBUM, "TALB"),
        ("BPM", "TBPM"),
        ("Composer", "TCOM"),
        (GENRE, "TCON"),
        ("Copyright message", "TCOP"),
        ("Encoding time", "TDEN"),
        ("Playlist delay", "TDLY"),
        ("Original release time", "TDOR"),
        (YEAR, "TDRC"),
        ("Year", "TDRC"),
        ("Release time", "TDRL"),
        ("Tagging time", "TDTG"),
        ("Encoded by", "TENC"),
        ("Lyricist/Text writer", "TEXT"),
        ("File type", "TFLT"),
        ("Involved people list", "TIPL"),
        ("Content group description", "TIT1"),
        (TITLE, "TIT2"),
        ("Subtitle/Description refinement", "TIT3"),
        ("Initial key", "TKEY"),
        ("Language", "TLAN"),
        ("Length", "TLEN"),
        ("Musician credits list", "TMCL"),
        ("Media type", "TMED"),
        ("Mood", "TMOO"),
        ("Original album/movie/show title", "TOAL"),
        ("Original filename", "TOFN"),
        ("Original lyricist/text writer", "TOLY"),
        ("Original artist/performer", "TOPE"),
        ("File owner/licensee", "TOWN"),
        (ARTIST, "TPE1"),
        ("Band/Orchestra/Accompaniment", "TPE2"),
        ("Conductor/performer refinement", "TPE3"),
        ("Interpreted, remixed, or otherwise modified by", "TPE4"),
        ("Part of a set", "TPOS"),
        ("Produced notice", "TPRO"),
        ("Publisher", "TPUB"),
        ("Track number/Position in set", "TRCK"),
        ("Internet radio station name", "TRSN"),
        ("Internet radio station owner", "TRSO"),
        ("Album sort order", "TSOA"),
        ("Performer sort order", "TSOP"),
        ("Title sort order", "TSOT"),
        ("ISRC", "TSRC"),
        ("Software/Hardware and settings used for encoding", "TSSE"),
        ("Set subtitle", "TSST"),
        ("User defined text information frame", "TXXX"),
        (UNSYNCHRONISED_LYRICS, "USLT"),
    ],
};
