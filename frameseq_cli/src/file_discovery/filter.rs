//! Glob filtering of rendered listing entries
//!
//! Patterns are matched against the entry name as it is displayed, so a
//! sequence such as `render.1-100.exr` is matched as one name.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use super::{DiscoveryError, Result};

/// Pattern matcher using GlobSet for efficient matching
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    globset: GlobSet,
    patterns: Vec<String>,
}

impl PatternMatcher {
    /// Create a new pattern matcher from glob patterns
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| DiscoveryError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| DiscoveryError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            globset,
            patterns: patterns.to_vec(),
        })
    }

    /// Check if a path matches any of the patterns
    pub fn matches(&self, path: &Path) -> bool {
        self.globset.is_match(path)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Include and exclude patterns applied to listing entries
#[derive(Debug, Default)]
pub struct FileFilter {
    include_matcher: Option<PatternMatcher>,
    exclude_matcher: Option<PatternMatcher>,
}

impl FileFilter {
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self> {
        let include_matcher = if include_patterns.is_empty() {
            None
        } else {
            Some(PatternMatcher::new(include_patterns)?)
        };

        let exclude_matcher = if exclude_patterns.is_empty() {
            None
        } else {
            Some(PatternMatcher::new(exclude_patterns)?)
        };

        Ok(Self {
            include_matcher,
            exclude_matcher,
        })
    }

    /// Check if an entry should be kept
    ///
    /// Rules:
    /// 1. If the path matches an exclude pattern -> false (exclude overrides)
    /// 2. Directories are kept, includes only select files
    /// 3. If there are no include patterns -> true
    /// 4. Otherwise the path must match an include pattern
    pub fn should_include(&self, path: &Path, is_directory: bool) -> bool {
        if let Some(ref exclude) = self.exclude_matcher
            && exclude.matches(path)
        {
            return false;
        }

        if is_directory {
            return true;
        }

        match self.include_matcher {
            Some(ref include) => include.matches(path),
            None => true,
        }
    }

    pub fn has_patterns(&self) -> bool {
        self.include_matcher.is_some() || self.exclude_matcher.is_some()
    }
}
