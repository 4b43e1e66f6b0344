//! Frame numbers, ranges and sequences
//!
//! A [`FrameRange`] is an inclusive interval of frames and a
//! [`FrameSequence`] is an ordered list of ranges plus the zero padding
//! width used when the frames are rendered as text.

pub mod range;
pub mod sequence;

pub use range::FrameRange;
pub use sequence::FrameSequence;

/// A single frame number
pub type Frame = i64;

/// Reserved frame value meaning "no frame"
///
/// Passing this to [`crate::FileInfo::file_name`] renders the stored
/// numeric token instead of a substituted frame.
pub const INVALID_FRAME: Frame = Frame::MIN;

/// Reserved range value meaning "no range"
pub const INVALID_RANGE: FrameRange = FrameRange {
    min: INVALID_FRAME,
    max: INVALID_FRAME,
};
