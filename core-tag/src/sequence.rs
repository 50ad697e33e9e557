//! Ordered group of frames sharing one identifier.

use crate::frame::Framer;
use crate::ids;

/// Which repeatable identifier a [`Sequence`] is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Pictures,
    Comments,
    UnsynchronisedLyrics,
}

impl SequenceKind {
    /// Frame description used to resolve the identifier.
    pub fn description(self) -> &'static str {
        match self {
            SequenceKind::Pictures => ids::ATTACHED_PICTURE,
            SequenceKind::Comments => ids::COMMENTS,
            SequenceKind::UnsynchronisedLyrics => ids::UNSYNCHRONISED_LYRICS,
        }
    }
}

/// Frames that may legally occur several times in one tag.
///
/// Insertion order is kept and is the order frames are written back in.
#[derive(Debug)]
pub struct Sequence {
    kind: SequenceKind,
    frames: Vec<Box<dyn Framer>>,
}

impl Sequence {
    pub fn new(kind: SequenceKind) -> Self {
        Self {
            kind,
            frames: Vec::new(),
        }
    }

    pub(crate) fn from_frames(kind: SequenceKind, frames: Vec<Box<dyn Framer>>) -> Self {
        Self { kind, frames }
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// Append a frame; earlier frames are never replaced.
    pub fn add_frame(&mut self, frame: Box<dyn Framer>) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> Vec<&dyn Framer> {
        self.frames.iter().map(|f| f.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use crate::frame::CommentFrame;

    fn comment(text: &str) -> Box<dyn Framer> {
        Box::new(CommentFrame {
            encoding: TextEncoding::Utf8,
            language: "eng".to_string(),
            description: String::new(),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_append_keeps_order() {
        let mut sequence = Sequence::new(SequenceKind::Comments);
        assert!(sequence.is_empty());

        for text in ["one", "two", "three"] {
            sequence.add_frame(comment(text));
        }

        let texts: Vec<_> = sequence
            .frames()
            .into_iter()
            .map(|f| f.downcast_ref::<CommentFrame>().unwrap().text.clone())
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.kind(), SequenceKind::Comments);
    }

    #[test]
    fn test_kind_descriptions() {
        assert_eq!(SequenceKind::Pictures.description(), "Attached picture");
        assert_eq!(SequenceKind::Comments.description(), "Comments");
        assert_eq!(
            SequenceKind::UnsynchronisedLyrics.description(),
            "Unsynchronised lyrics/text transcription"
        );
    }
}
