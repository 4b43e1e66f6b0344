//! Directory walker for sequence discovery
//!
//! Uses walkdir to enumerate the directories to list and hands each one to
//! the core grouping engine, yielding one listing per directory.

use frameseq_core::error::IoError;
use frameseq_core::{DirectoryListOptions, FsDirectoryReader, INVALID_FRAME, PathName, directory_list};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::{DiscoveredDirectory, DiscoveryError, Result, filter::FileFilter};

/// Options for sequence discovery
#[derive(Debug, Clone)]
pub struct SequenceDiscoveryOptions {
    /// Grouping, sorting and hidden-file options for each directory
    pub listing: DirectoryListOptions,
    /// Patterns to include (glob patterns on rendered names)
    pub include_patterns: Vec<String>,
    /// Patterns to exclude (glob patterns, override includes)
    pub exclude_patterns: Vec<String>,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum depth for recursive search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for SequenceDiscoveryOptions {
    fn default() -> Self {
        Self {
            listing: DirectoryListOptions::default(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            recursive: false,
            follow_links: false,
            max_depth: None,
        }
    }
}

impl SequenceDiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, listing: DirectoryListOptions) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.include_patterns = patterns;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Iterator over the listings of a directory tree
pub struct SequenceDiscovery {
    root: PathBuf,
    walker: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
    filter: FileFilter,
    reader: FsDirectoryReader,
    options: SequenceDiscoveryOptions,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

impl SequenceDiscovery {
    pub fn new(path: &Path, options: SequenceDiscoveryOptions) -> Result<Self> {
        if !path.exists() {
            return Err(DiscoveryError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(frameseq_core::Error::from(IoError::not_a_directory(path)).into());
        }
        options.listing.validate()?;

        let filter = FileFilter::new(&options.include_patterns, &options.exclude_patterns)?;

        let mut walker = WalkDir::new(path)
            .follow_links(options.follow_links)
            .sort_by_file_name();

        if !options.recursive {
            walker = walker.max_depth(0);
        } else if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        let show_hidden = options.listing.show_hidden;
        let walker = walker
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || show_hidden || !is_hidden(entry));

        Ok(Self {
            root: path.to_path_buf(),
            walker: Box::new(walker),
            filter,
            reader: FsDirectoryReader::new(),
            options,
        })
    }

    fn list(&self, directory: &Path) -> Result<DiscoveredDirectory> {
        let name = PathName::from(directory);
        let mut entries = directory_list(&self.reader, &name, &self.options.listing)?;

        let relative = directory.strip_prefix(&self.root).unwrap_or(directory);
        entries.retain(|info| {
            let rendered = relative.join(info.file_name(INVALID_FRAME, false));
            self.filter.should_include(&rendered, info.is_directory())
        });

        Ok(DiscoveredDirectory {
            path: directory.to_path_buf(),
            entries,
        })
    }
}

impl Iterator for SequenceDiscovery {
    type Item = Result<DiscoveredDirectory>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        return Some(self.list(entry.path()));
                    }
                }
                Err(e) => {
                    if e.depth() == 0 {
                        return Some(Err(e.into()));
                    }
                    log::warn!("Walk error: {e}");
                }
            }
        }
    }
}

/// Convenience function to list every directory under `path`
pub fn discover_sequences(
    path: &Path,
    options: SequenceDiscoveryOptions,
) -> Result<Vec<DiscoveredDirectory>> {
    SequenceDiscovery::new(path, options)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        for frame in 1..=3 {
            fs::write(base.join(format!("beauty.{frame:04}.exr")), b"").unwrap();
        }
        fs::write(base.join("notes.txt"), b"").unwrap();

        let shot = base.join("shot010");
        fs::create_dir(&shot).unwrap();
        for frame in 10..=12 {
            fs::write(shot.join(format!("plate.{frame}.dpx")), b"").unwrap();
        }

        let hidden = base.join(".cache");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("tmp.1.exr"), b"").unwrap();
        fs::write(hidden.join("tmp.2.exr"), b"").unwrap();

        dir
    }

    fn names(listing: &DiscoveredDirectory) -> Vec<String> {
        listing
            .entries
            .iter()
            .map(|info| info.file_name(INVALID_FRAME, false))
            .collect()
    }

    #[test]
    fn test_single_directory() {
        let dir = create_test_directory();
        let listings = discover_sequences(dir.path(), SequenceDiscoveryOptions::new()).unwrap();

        assert_eq!(listings.len(), 1);
        let names = names(&listings[0]);
        assert!(names.contains(&"beauty.0001-0003.exr".to_string()));
        assert!(names.contains(&"notes.txt".to_string()));
        assert!(names.contains(&"shot010".to_string()));
    }

    #[test]
    fn test_recursive_skips_hidden_when_requested() {
        let dir = create_test_directory();
        let listing = DirectoryListOptions {
            show_hidden: false,
            ..DirectoryListOptions::default()
        };
        let options = SequenceDiscoveryOptions::new()
            .with_listing(listing)
            .with_recursive(true);

        let listings = discover_sequences(dir.path(), options).unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings.iter().all(|l| !l.path.ends_with(".cache")));

        let shot = listings
            .iter()
            .find(|l| l.path.ends_with("shot010"))
            .unwrap();
        assert_eq!(names(shot), vec!["plate.10-12.dpx"]);
    }

    #[test]
    fn test_max_depth_limits_recursion() {
        let dir = create_test_directory();
        let nested = dir.path().join("shot010").join("plates");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("bg.1.exr"), b"").unwrap();

        let options = SequenceDiscoveryOptions::new().with_recursive(true);
        let listings = discover_sequences(dir.path(), options.clone()).unwrap();
        assert!(listings.iter().any(|l| l.path.ends_with("plates")));

        let listings = discover_sequences(dir.path(), options.with_max_depth(Some(1))).unwrap();
        assert!(listings.iter().any(|l| l.path.ends_with("shot010")));
        assert!(listings.iter().all(|l| !l.path.ends_with("plates")));
    }

    #[test]
    fn test_include_and_exclude_patterns() {
        let dir = create_test_directory();
        let options = SequenceDiscoveryOptions::new()
            .with_include_patterns(vec!["*.exr".to_string()])
            .with_exclude_patterns(vec!["shot*".to_string()]);

        let listings = discover_sequences(dir.path(), options).unwrap();
        assert_eq!(names(&listings[0]), vec![".cache", "beauty.0001-0003.exr"]);
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = SequenceDiscovery::new(&missing, SequenceDiscoveryOptions::new())
            .err()
            .unwrap();
        assert!(matches!(err, DiscoveryError::PathNotFound(_)));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = create_test_directory();
        let err = SequenceDiscovery::new(&dir.path().join("notes.txt"), SequenceDiscoveryOptions::new())
            .err()
            .unwrap();
        assert!(matches!(err, DiscoveryError::Listing(_)));
    }

    #[test]
    fn test_invalid_extension_option() {
        let dir = create_test_directory();
        let listing = DirectoryListOptions {
            sequence_extensions: vec!["exr".to_string()],
            ..DirectoryListOptions::default()
        };
        let err = SequenceDiscovery::new(dir.path(), SequenceDiscoveryOptions::new().with_listing(listing))
            .err()
            .unwrap();
        assert!(matches!(err, DiscoveryError::Listing(_)));
    }
}
