//! Inclusive frame intervals

use super::{Frame, INVALID_RANGE};
use crate::codec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive interval of frame numbers
///
/// A range may hold `min > max` after construction. Queries treat it as the
/// normalized interval, while [`FrameRange::frames`] and
/// [`FrameRange::frame_at`] walk it in its stored direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    pub min: Frame,
    pub max: Frame,
}

impl FrameRange {
    /// Create a range from two endpoints, kept in the given order
    pub const fn new(min: Frame, max: Frame) -> Self {
        Self { min, max }
    }

    /// Create a range holding exactly one frame
    pub const fn single(frame: Frame) -> Self {
        Self {
            min: frame,
            max: frame,
        }
    }

    /// Returns false for the reserved [`INVALID_RANGE`]
    pub fn is_valid(&self) -> bool {
        *self != INVALID_RANGE
    }

    /// Returns true when the endpoints are stored in descending order
    pub fn is_reversed(&self) -> bool {
        self.min > self.max
    }

    /// Copy of this range with `min <= max`
    pub fn normalized(&self) -> Self {
        if self.is_reversed() {
            Self::new(self.max, self.min)
        } else {
            *self
        }
    }

    /// Swap the endpoints in place when they are reversed
    pub fn sort(&mut self) {
        *self = self.normalized();
    }

    /// Number of frames covered, saturating at `u64::MAX`
    pub fn len(&self) -> u64 {
        self.min.abs_diff(self.max).saturating_add(1)
    }

    /// A range always covers at least one frame
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, frame: Frame) -> bool {
        let range = self.normalized();
        range.min <= frame && frame <= range.max
    }

    pub fn intersects(&self, other: &FrameRange) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.min <= b.max && b.min <= a.max
    }

    /// Grow the range so that `frame` is included
    ///
    /// The range is normalized first.
    pub fn expand(&mut self, frame: Frame) {
        let range = self.normalized();
        self.min = range.min.min(frame);
        self.max = range.max.max(frame);
    }

    /// Grow the range to the union of both intervals' bounds
    pub fn expand_range(&mut self, other: &FrameRange) {
        let other = other.normalized();
        self.expand(other.min);
        self.expand(other.max);
    }

    /// Frame at `offset` steps from `min`, walking towards `max`
    pub fn frame_at(&self, offset: u64) -> Option<Frame> {
        if offset >= self.len() {
            return None;
        }
        if self.is_reversed() {
            self.min.checked_sub_unsigned(offset)
        } else {
            self.min.checked_add_unsigned(offset)
        }
    }

    /// Iterate every frame from `min` to `max` in stored order
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        let range = *self;
        let count = self.len();
        (0..count).map_while(move |offset| range.frame_at(offset))
    }
}

impl From<Frame> for FrameRange {
    fn from(frame: Frame) -> Self {
        Self::single(frame)
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format_range(self, 0))
    }
}
