//! Builder for directories of numbered files

use crate::mocks::MockFileSystem;
use frameseq_core::codec::format_frame;
use frameseq_core::{DirectoryEntry, Frame};
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use tempfile::TempDir;

/// Builds one directory's worth of entries, in order
///
/// The same fixture can be materialized as a [`MockFileSystem`] or as real
/// empty files under a temporary directory.
#[derive(Debug, Clone)]
pub struct SequenceFixtureBuilder {
    directory: String,
    entries: Vec<DirectoryEntry>,
}

impl SequenceFixtureBuilder {
    /// Create a builder for the given directory path
    pub fn new(directory: &str) -> Self {
        Self {
            directory: directory.to_string(),
            entries: Vec::new(),
        }
    }

    /// Add `base<frame><extension>` for every frame in `frames`
    pub fn with_sequence(
        mut self,
        base: &str,
        extension: &str,
        frames: RangeInclusive<Frame>,
        pad: usize,
    ) -> Self {
        for frame in frames {
            self.entries.push(DirectoryEntry::file(format!(
                "{base}{}{extension}",
                format_frame(frame, pad)
            )));
        }
        self
    }

    /// Add specific frames of a sequence
    pub fn with_frames(mut self, base: &str, extension: &str, frames: &[Frame], pad: usize) -> Self {
        for &frame in frames {
            self.entries.push(DirectoryEntry::file(format!(
                "{base}{}{extension}",
                format_frame(frame, pad)
            )));
        }
        self
    }

    /// Add a plain file
    pub fn with_file(mut self, name: &str) -> Self {
        self.entries.push(DirectoryEntry::file(name));
        self
    }

    /// Add a sub-directory
    pub fn with_directory(mut self, name: &str) -> Self {
        self.entries.push(DirectoryEntry::directory(name));
        self
    }

    /// The directory the fixture describes
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Entry names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Materialize as an in-memory file system
    pub fn build_mock(&self) -> MockFileSystem {
        let mut fs = MockFileSystem::new();
        fs.create_directory(&self.directory);
        let base = self.directory.trim_end_matches('/');
        for entry in &self.entries {
            let path = if self.directory.is_empty() {
                entry.name.clone()
            } else {
                format!("{base}/{}", entry.name)
            };
            if entry.is_directory {
                fs.create_directory(&path);
            } else {
                fs.add_file(&path);
            }
        }
        fs
    }

    /// Materialize as empty files in a fresh temporary directory
    ///
    /// The builder's directory path is ignored; entries land directly in
    /// the returned directory.
    pub fn build_on_disk(&self) -> io::Result<TempDir> {
        let temp_dir = TempDir::new()?;
        for entry in &self.entries {
            let path = temp_dir.path().join(&entry.name);
            if entry.is_directory {
                fs::create_dir_all(path)?;
            } else {
                fs::write(path, b"")?;
            }
        }
        Ok(temp_dir)
    }
}
