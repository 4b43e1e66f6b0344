//! Directory discovery for sequence listings
//!
//! Walks one directory (or a tree), lists each directory through the core
//! grouping engine and filters the rendered entries with include and
//! exclude glob patterns.

mod extensions;
mod filter;
mod walker;

pub use extensions::{DEFAULT_SEQUENCE_EXTENSIONS, dotted_extensions, normalize_extension};
pub use filter::{FileFilter, PatternMatcher};
pub use walker::{SequenceDiscovery, SequenceDiscoveryOptions, discover_sequences};

use frameseq_core::FileInfo;
use std::path::PathBuf;

/// Entries found in one directory
#[derive(Debug, Clone)]
pub struct DiscoveredDirectory {
    /// Directory that was listed
    pub path: PathBuf,
    /// Listing after grouping and filtering
    pub entries: Vec<FileInfo>,
}

/// Error type for discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Failed to list directory: {0}")]
    Listing(#[from] frameseq_core::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
