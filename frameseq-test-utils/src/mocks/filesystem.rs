//! Mock file system implementation for testing

use frameseq_core::{
    DirectoryEntry, DirectoryReader, Result,
    error::IoError,
};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory directory tree implementing [`DirectoryReader`]
///
/// Entries are returned in insertion order, which lets tests control the
/// order grouping sees them in.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    directories: HashMap<PathBuf, Vec<DirectoryEntry>>,
    known_entries: HashSet<PathBuf>,
    failures: HashMap<PathBuf, io::ErrorKind>,
    reads: Cell<usize>,
}

impl MockFileSystem {
    /// Create a new mock file system
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the mock file system is empty
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Add a file, creating its parent directories
    pub fn add_file(&mut self, path: &str) {
        let path = PathBuf::from(path);
        if let Some((parent, name)) = split_parent(&path) {
            self.insert_entry(&parent, DirectoryEntry::file(name));
        }
    }

    /// Add several files to one directory, in order
    pub fn add_files<I, S>(&mut self, directory: &str, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.create_directory(directory);
        for name in names {
            self.insert_entry(Path::new(directory), DirectoryEntry::file(name.as_ref()));
        }
    }

    /// Create a directory and any missing parents
    pub fn create_directory(&mut self, path: &str) {
        self.ensure_directory(Path::new(path));
    }

    /// Make reads of `path` fail with the given error kind
    pub fn fail_directory(&mut self, path: &str, kind: io::ErrorKind) {
        self.failures.insert(PathBuf::from(path), kind);
    }

    /// Check if a directory exists
    pub fn directory_exists(&self, path: &str) -> bool {
        self.directories.contains_key(Path::new(path))
    }

    /// Number of `read_directory` calls served so far
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    fn insert_entry(&mut self, directory: &Path, entry: DirectoryEntry) {
        self.ensure_directory(directory);
        if self.known_entries.insert(directory.join(&entry.name))
            && let Some(entries) = self.directories.get_mut(directory)
        {
            entries.push(entry);
        }
    }

    fn ensure_directory(&mut self, path: &Path) {
        if self.directories.contains_key(path) {
            return;
        }
        self.directories.insert(path.to_path_buf(), Vec::new());
        if let Some((parent, name)) = split_parent(path) {
            self.insert_entry(&parent, DirectoryEntry::directory(name));
        }
    }
}

fn split_parent(path: &Path) -> Option<(PathBuf, String)> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => return None,
    };
    Some((parent, name))
}

impl DirectoryReader for MockFileSystem {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.reads.set(self.reads.get() + 1);

        if let Some(kind) = self.failures.get(path) {
            let source = io::Error::new(*kind, "injected failure");
            return Err(match kind {
                io::ErrorKind::PermissionDenied => IoError::permission_denied(path, source),
                _ => IoError::from_std(source).with_path(path),
            }
            .into());
        }

        self.directories
            .get(path)
            .cloned()
            .ok_or_else(|| IoError::directory_not_found(path).into())
    }
}
