//! Current, temporary and absolute path lookup
//!
//! Provides the platform side of path handling: asking the OS for well
//! known directories, normalizing separators and enforcing platform path
//! length limits.

use crate::{
    Error, Result,
    error::{IoError, ValidationError},
    path_name::{PathName, PathSeparator},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of platform paths
pub trait PathResolver {
    /// The process working directory
    fn current_dir(&self) -> Result<PathName>;

    /// The directory for temporary files
    fn temp_dir(&self) -> PathName;

    /// `path` made absolute against the working directory
    fn absolute(&self, path: &PathName) -> Result<PathName>;
}

/// Well known user directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryShortcut {
    Home,
    Desktop,
    Documents,
    Downloads,
}

impl DirectoryShortcut {
    pub const ALL: [DirectoryShortcut; 4] =
        [Self::Home, Self::Desktop, Self::Documents, Self::Downloads];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Desktop => "desktop",
            Self::Documents => "documents",
            Self::Downloads => "downloads",
        }
    }
}

/// [`PathResolver`] backed by `std::env` and the `dirs` crate
#[derive(Debug, Clone, Default)]
pub struct PlatformPathResolver {}

impl PlatformPathResolver {
    /// Create a new path resolver
    pub fn new() -> Self {
        Self {}
    }

    /// Resolve a user directory, if the platform defines one
    pub fn shortcut(&self, shortcut: DirectoryShortcut) -> Option<PathName> {
        let path = match shortcut {
            DirectoryShortcut::Home => dirs::home_dir(),
            DirectoryShortcut::Desktop => dirs::desktop_dir(),
            DirectoryShortcut::Documents => dirs::document_dir(),
            DirectoryShortcut::Downloads => dirs::download_dir(),
        }?;
        Some(PathName::from(path.as_path()))
    }

    /// Normalize path separators to one convention
    pub fn normalize_separators(&self, path: &str, style: PathSeparator) -> String {
        match style {
            PathSeparator::Windows => path.replace('/', "\\"),
            PathSeparator::Unix => path.replace('\\', "/"),
        }
    }

    /// Validate path length for the current platform
    pub fn validate_path_length<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy();

        #[cfg(windows)]
        const MAX_PATH: usize = 260;
        #[cfg(not(windows))]
        const MAX_PATH: usize = 4096; // Typical Linux/macOS limit

        if path_str.len() > MAX_PATH {
            return Err(Error::Validation(ValidationError::path_too_long(
                path, MAX_PATH,
            )));
        }
        Ok(())
    }
}

impl PathResolver for PlatformPathResolver {
    fn current_dir(&self) -> Result<PathName> {
        let dir = std::env::current_dir().map_err(IoError::from_std)?;
        Ok(PathName::from(dir.as_path()))
    }

    fn temp_dir(&self) -> PathName {
        let from_env = ["TEMP", "TMP", "TMPDIR"]
            .iter()
            .filter_map(std::env::var_os)
            .find(|value| !value.is_empty())
            .map(PathBuf::from);
        let dir = from_env.unwrap_or_else(std::env::temp_dir);
        PathName::from(dir.as_path())
    }

    fn absolute(&self, path: &PathName) -> Result<PathName> {
        let text = path.get();
        self.validate_path_length(&text)?;
        if text.is_empty() {
            return self.current_dir();
        }
        let absolute = std::path::absolute(Path::new(&text))
            .map_err(|e| IoError::from_std(e).with_path(Path::new(&text)))?;
        Ok(PathName::from(absolute.as_path()))
    }
}
