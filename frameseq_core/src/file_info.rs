//! File entries and sequence membership
//!
//! A [`FileInfo`] pairs a [`PathName`] with a [`FileType`] and, once
//! evaluated, the [`FrameSequence`] of the files it stands for. Two entries
//! belong to the same sequence when [`FileInfo::is_compatible`] holds: same
//! directory, base name and extension, and frame numbers written with the
//! same zero padding.

use crate::codec;
use crate::error::Result;
use crate::frame::{Frame, FrameSequence, INVALID_FRAME};
use crate::path_name::PathName;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a file entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    #[default]
    File,
    Directory,
    /// A path whose number is `#` placeholders, standing for any frame
    SequenceWildcard,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::SequenceWildcard => "sequence_wildcard",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path, its type and the frames it covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    path: PathName,
    file_type: FileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sequence: Option<FrameSequence>,
}

impl FileInfo {
    /// Create an entry from a bare path
    ///
    /// Paths whose number is made of `#` placeholders become
    /// [`FileType::SequenceWildcard`]; everything else is a plain file.
    pub fn new(path: impl Into<PathName>) -> Self {
        let path = path.into();
        let file_type = if path.is_number_wildcard() {
            FileType::SequenceWildcard
        } else {
            FileType::File
        };
        Self {
            path,
            file_type,
            sequence: None,
        }
    }

    pub fn with_type(path: impl Into<PathName>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            file_type,
            sequence: None,
        }
    }

    pub fn path(&self) -> &PathName {
        &self.path
    }

    /// Replace the path, clearing the sequence and re-detecting the type
    pub fn set_path(&mut self, path: impl Into<PathName>) {
        *self = Self::new(path);
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn sequence(&self) -> Option<&FrameSequence> {
        self.sequence.as_ref()
    }

    pub fn is_sequence_valid(&self) -> bool {
        self.sequence.as_ref().is_some_and(FrameSequence::is_valid)
    }

    pub fn is_sequence_wildcard(&self) -> bool {
        self.file_type == FileType::SequenceWildcard
    }

    /// Replace the sequence and rewrite the path number to its text
    ///
    /// An invalid sequence clears the stored one and leaves the number as
    /// it is. A wildcard entry that receives frames becomes a plain file.
    pub fn set_sequence(&mut self, sequence: FrameSequence) {
        if !sequence.is_valid() {
            self.sequence = None;
            return;
        }
        self.path.set_number(sequence.to_string());
        if self.file_type == FileType::SequenceWildcard {
            self.file_type = FileType::File;
        }
        self.sequence = Some(sequence);
    }

    pub fn clear_sequence(&mut self) {
        self.sequence = None;
    }

    /// Sort the owned sequence and refresh the path number
    pub fn sort_sequence(&mut self) {
        if let Some(mut sequence) = self.sequence.take() {
            sequence.sort();
            self.set_sequence(sequence);
        }
    }

    /// Build a single frame sequence from this entry's own number
    ///
    /// Returns false, leaving the entry untouched, when the number is not
    /// made of digits.
    pub fn eval_sequence(&mut self) -> Result<bool> {
        match token_sequence(self.path.number())? {
            Some(sequence) => {
                self.set_sequence(sequence);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Build this entry's sequence from sibling file names
    ///
    /// Siblings are names within this entry's directory. Those sharing the
    /// base name and extension contribute their frames when their padding
    /// matches the group; a mismatched width leaves the sibling out.
    /// Contiguous frames fold into one range.
    pub fn eval_sequence_with<I, S>(&mut self, siblings: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.path.has_frame_number() || self.is_directory() {
            return Ok(false);
        }
        let mut group = SequenceGroup::new(self.path.number())?;

        for name in siblings {
            let mut sibling = self.path.clone();
            sibling.set_file_name(name.as_ref());
            if sibling.base_name() != self.path.base_name()
                || sibling.extension() != self.path.extension()
                || !sibling.has_frame_number()
            {
                continue;
            }
            if !group.try_push(sibling.number())? {
                debug!(
                    "Skipping {} for {}: padding does not match",
                    sibling,
                    self.path
                );
            }
        }

        self.set_sequence(group.into_sequence());
        Ok(true)
    }

    /// Whether `other` names a member of the same sequence
    ///
    /// Directory, base name and extension must match exactly and the frame
    /// numbers must render under one padding width. Wildcards accept any
    /// numbered entry, unnumbered entries only match each other, and
    /// directories never match.
    pub fn is_compatible(&self, other: &FileInfo) -> bool {
        self.path.directory() == other.path.directory()
            && self.path.base_name() == other.path.base_name()
            && self.path.extension() == other.path.extension()
            && self.number_key().compatible(&other.number_key())
    }

    /// Append the frames of a compatible entry to this one's sequence
    ///
    /// Ranges are added as they are, without merging. The wider padding of
    /// the two wins.
    pub fn add_to_sequence(&mut self, other: &FileInfo) -> Result<bool> {
        if !self.is_compatible(other) {
            return Ok(false);
        }
        let incoming = match &other.sequence {
            Some(sequence) => Some(sequence.clone()),
            None => token_sequence(other.path.number())?,
        };
        let Some(incoming) = incoming else {
            return Ok(true);
        };

        let mut sequence = match &self.sequence {
            Some(sequence) => sequence.clone(),
            None => token_sequence(self.path.number())?.unwrap_or_default(),
        };
        for range in incoming.ranges() {
            sequence.add(*range);
        }
        if incoming.pad() > sequence.pad() {
            sequence.set_pad(incoming.pad());
        }
        self.set_sequence(sequence);
        Ok(true)
    }

    /// Render the file name, substituting `frame` for the number
    ///
    /// With [`INVALID_FRAME`] the stored number is used verbatim. Wildcard
    /// entries without a sequence pad to the number of `#` characters.
    pub fn file_name(&self, frame: Frame, with_directory: bool) -> String {
        if self.path.is_root() {
            return self.path.get();
        }

        let mut out = String::new();
        if with_directory {
            out.push_str(self.path.directory());
        }
        out.push_str(self.path.base_name());
        match &self.sequence {
            Some(sequence) if sequence.is_valid() && frame != INVALID_FRAME => {
                out.push_str(&codec::format_frame(frame, sequence.pad()));
            }
            None if self.is_sequence_wildcard()
                && self.path.is_number_wildcard()
                && frame != INVALID_FRAME =>
            {
                let hashes = self.path.number().len();
                let pad = if hashes > 1 { hashes } else { 0 };
                out.push_str(&codec::format_frame(frame, pad));
            }
            _ => out.push_str(self.path.number()),
        }
        out.push_str(self.path.extension());
        out
    }

    /// Full path of every frame in the sequence, in stored order
    pub fn expand(&self) -> Vec<String> {
        match &self.sequence {
            Some(sequence) if sequence.is_valid() => sequence
                .frames()
                .map(|frame| self.file_name(frame, true))
                .collect(),
            _ => vec![self.file_name(INVALID_FRAME, true)],
        }
    }

    fn number_key(&self) -> NumberKey {
        if self.is_directory() {
            return NumberKey::Directory;
        }
        if self.is_sequence_wildcard() {
            return NumberKey::Wildcard;
        }
        if let Some(sequence) = self.sequence.as_ref().filter(|s| s.is_valid()) {
            return NumberKey::from_sequence(sequence);
        }
        NumberKey::from_token(self.path.number())
    }
}

impl From<PathName> for FileInfo {
    fn from(path: PathName) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name(INVALID_FRAME, true))
    }
}

fn token_sequence(number: &str) -> Result<Option<FrameSequence>> {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    let (frame, pad) = codec::parse_frame(number)?;
    Ok(Some(FrameSequence::single(frame, pad)))
}

fn digit_width(frame: Frame) -> usize {
    codec::format_frame(frame, 0).trim_start_matches('-').len()
}

/// What an entry's number says about which siblings it can group with
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NumberKey {
    Directory,
    Absent,
    Wildcard,
    /// `pad` is set once a zero padded number has been seen. The widths
    /// bound the rendered length of every member.
    Digits {
        pad: Option<usize>,
        min_width: usize,
        max_width: usize,
    },
    Literal(String),
}

impl NumberKey {
    pub(crate) fn from_token(number: &str) -> Self {
        if number.is_empty() {
            Self::Absent
        } else if number.bytes().all(|b| b == b'#') {
            Self::Wildcard
        } else if number.bytes().all(|b| b.is_ascii_digit()) {
            let padded = number.len() > 1 && number.starts_with('0');
            Self::Digits {
                pad: padded.then_some(number.len()),
                min_width: number.len(),
                max_width: number.len(),
            }
        } else {
            Self::Literal(number.to_string())
        }
    }

    fn from_sequence(sequence: &FrameSequence) -> Self {
        let pad = sequence.pad();
        let (min_width, max_width) = sequence
            .ranges()
            .iter()
            .map(|range| {
                let range = range.normalized();
                let (low, high) = (digit_width(range.min), digit_width(range.max));
                let narrowest = if range.contains(0) { 1 } else { low.min(high) };
                (narrowest.max(pad), low.max(high).max(pad))
            })
            .fold((usize::MAX, 0), |(min, max), (low, high)| {
                (min.min(low), max.max(high))
            });
        Self::Digits {
            pad: (pad > 0).then_some(pad),
            min_width,
            max_width,
        }
    }

    /// Every member renders exactly `width` characters wide
    fn has_width(&self, width: usize) -> bool {
        matches!(self, Self::Digits { min_width, max_width, .. }
            if *min_width == width && *max_width == width)
    }

    /// Symmetric by construction
    ///
    /// Once either side is zero padded, every number on both sides must
    /// render at that width. Unpadded numbers group freely.
    pub(crate) fn compatible(&self, other: &NumberKey) -> bool {
        use NumberKey::*;
        match (self, other) {
            (Directory, _) | (_, Directory) => false,
            (Absent, Absent) | (Wildcard, Wildcard) => true,
            (Wildcard, Digits { .. }) | (Digits { .. }, Wildcard) => true,
            (Digits { pad: a, .. }, Digits { pad: b, .. }) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) if a != b => false,
                (Some(pad), _) | (None, Some(pad)) => {
                    self.has_width(*pad) && other.has_width(*pad)
                }
            },
            (Literal(a), Literal(b)) => a == b,
            _ => false,
        }
    }
}

/// Frames collected for one sequence while grouping
#[derive(Debug, Clone)]
pub(crate) struct SequenceGroup {
    frames: Vec<Frame>,
    key: NumberKey,
}

impl SequenceGroup {
    /// Start a group from its first member's number
    pub(crate) fn new(number: &str) -> Result<Self> {
        let (frame, _) = codec::parse_frame(number)?;
        Ok(Self {
            frames: vec![frame],
            key: NumberKey::from_token(number),
        })
    }

    pub(crate) fn accepts(&self, number: &str) -> bool {
        self.key.compatible(&NumberKey::from_token(number))
    }

    /// Add a member if its padding fits the group
    pub(crate) fn try_push(&mut self, number: &str) -> Result<bool> {
        if !self.accepts(number) {
            return Ok(false);
        }
        let (frame, _) = codec::parse_frame(number)?;
        self.frames.push(frame);
        if let (
            NumberKey::Digits {
                pad,
                min_width,
                max_width,
            },
            NumberKey::Digits {
                pad: token_pad,
                min_width: token_width,
                ..
            },
        ) = (&mut self.key, NumberKey::from_token(number))
        {
            *pad = (*pad).or(token_pad);
            *min_width = (*min_width).min(token_width);
            *max_width = (*max_width).max(token_width);
        }
        Ok(true)
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn pad(&self) -> usize {
        match self.key {
            NumberKey::Digits { pad, .. } => pad.unwrap_or(0),
            _ => 0,
        }
    }

    /// Sorted unique frames folded into ranges
    pub(crate) fn into_sequence(mut self) -> FrameSequence {
        let pad = self.pad();
        self.frames.sort_unstable();
        self.frames.dedup();
        FrameSequence::from_frames(self.frames).with_pad(pad)
    }
}
