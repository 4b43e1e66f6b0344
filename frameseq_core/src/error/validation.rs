//! Validation related error types

use std::path::PathBuf;
use thiserror::Error;

/// Invalid caller input and listing options
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Path too long for the platform
    #[error("Path too long: {path} exceeds maximum length of {max_length} characters")]
    PathTooLong { path: PathBuf, max_length: usize },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl ValidationError {
    /// Create a path too long error
    pub fn path_too_long(path: &std::path::Path, max_length: usize) -> Self {
        Self::PathTooLong {
            path: path.to_path_buf(),
            max_length,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}
