//! Frame Sequence Core Library
//!
//! Recognizes groups of numbered files (rendered image sequences and the
//! like) as single entities, stores their frame numbers compactly and
//! converts between that form and text such as `"0001-0010,0015"`.
//!
//! The library reasons about names and frame numbers only. Directory
//! contents come from a [`DirectoryReader`] and platform paths from a
//! [`platform::PathResolver`].

pub mod codec;
pub mod directory;
pub mod error;
pub mod file_info;
pub mod frame;
pub mod path_name;
pub mod platform;

// Re-export main types
pub use directory::{
    DirectoryEntry, DirectoryListOptions, DirectoryListSort, DirectoryReader, FsDirectoryReader,
    SequenceFormat, directory_list, find_sequence, match_wildcard,
};
pub use error::{Error, Result};
pub use file_info::{FileInfo, FileType};
pub use frame::{Frame, FrameRange, FrameSequence, INVALID_FRAME, INVALID_RANGE};
pub use path_name::{PathName, PathSeparator};
