//! Ordered frame range lists with display padding

use super::{Frame, FrameRange};
use crate::codec;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ordered list of frame ranges plus a zero padding width
///
/// Ranges are never merged, so overlapping or duplicate ranges are kept as
/// given and counted once per range by [`FrameSequence::len`]. An empty
/// sequence is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FrameSequence {
    ranges: Vec<FrameRange>,
    pad: usize,
}

impl FrameSequence {
    /// Create an empty (invalid) sequence
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_range(range: FrameRange, pad: usize) -> Self {
        Self {
            ranges: vec![range],
            pad,
        }
    }

    pub fn from_ranges(ranges: Vec<FrameRange>, pad: usize) -> Self {
        Self { ranges, pad }
    }

    pub fn single(frame: Frame, pad: usize) -> Self {
        Self::from_range(FrameRange::single(frame), pad)
    }

    /// Fold frames into ranges in the order given
    ///
    /// Each frame that is exactly one more than the end of the current range
    /// extends it; anything else starts a new range. The result has no
    /// padding.
    pub fn from_frames<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut ranges: Vec<FrameRange> = Vec::new();
        for frame in frames {
            match ranges.last_mut() {
                Some(last) if last.max.checked_add(1) == Some(frame) => last.max = frame,
                _ => ranges.push(FrameRange::single(frame)),
            }
        }
        Self { ranges, pad: 0 }
    }

    pub fn ranges(&self) -> &[FrameRange] {
        &self.ranges
    }

    pub fn pad(&self) -> usize {
        self.pad
    }

    pub fn set_pad(&mut self, pad: usize) {
        self.pad = pad;
    }

    pub fn with_pad(mut self, pad: usize) -> Self {
        self.pad = pad;
        self
    }

    /// Append a range without merging it into existing ones
    pub fn add(&mut self, range: FrameRange) {
        self.ranges.push(range);
    }

    /// Total frame count across all ranges, duplicates included
    pub fn len(&self) -> u64 {
        self.ranges
            .iter()
            .fold(0u64, |total, range| total.saturating_add(range.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// Resolve a zero-based index into a frame number
    ///
    /// Ranges are walked in their current order and each range in its own
    /// direction, so an unsorted or reversed sequence indexes as stored.
    pub fn frame(&self, index: u64) -> Option<Frame> {
        let mut remaining = index;
        for range in &self.ranges {
            let len = range.len();
            if remaining < len {
                return range.frame_at(remaining);
            }
            remaining -= len;
        }
        None
    }

    /// Index of the first occurrence of `frame`
    pub fn index_of(&self, frame: Frame) -> Option<u64> {
        let mut base = 0u64;
        for range in &self.ranges {
            if range.contains(frame) {
                return base.checked_add(range.min.abs_diff(frame));
            }
            base = base.saturating_add(range.len());
        }
        None
    }

    pub fn last_index(&self) -> Option<u64> {
        if self.is_valid() {
            self.len().checked_sub(1)
        } else {
            None
        }
    }

    pub fn contains(&self, frame: Frame) -> bool {
        self.ranges.iter().any(|range| range.contains(frame))
    }

    /// Normalize every range and order them by ascending `min`
    ///
    /// Overlapping and adjacent ranges stay separate.
    pub fn sort(&mut self) {
        for range in &mut self.ranges {
            range.sort();
        }
        self.ranges.sort();
    }

    /// One range spanning the lowest and highest frame
    pub fn bounds(&self) -> Option<FrameRange> {
        let mut iter = self.ranges.iter().map(FrameRange::normalized);
        let mut bounds = iter.next()?;
        for range in iter {
            bounds.expand_range(&range);
        }
        Some(bounds)
    }

    /// Iterate every frame in stored order
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.ranges.iter().flat_map(|range| range.frames())
    }
}

impl From<FrameRange> for FrameSequence {
    fn from(range: FrameRange) -> Self {
        Self::from_range(range, 0)
    }
}

impl fmt::Display for FrameSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format_sequence(self))
    }
}

impl FromStr for FrameSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        codec::parse_sequence(s)
    }
}

impl Serialize for FrameSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FrameSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
