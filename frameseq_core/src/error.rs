//! Error types for the frame sequence engine
//!
//! Errors are grouped by where they come from: text that could not be read
//! as frame numbers, directory enumeration failures reported by the reader
//! collaborator, and invalid caller input.

use thiserror::Error;

pub mod io;
pub mod parse;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::parse::ParseError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the frame sequence engine
#[derive(Error, Debug)]
pub enum Error {
    /// Directory or path resolution failures
    #[error(transparent)]
    Io(#[from] IoError),

    /// Malformed frame, range or sequence text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid input parameters or options
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns true when the error came from frame text parsing
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns true when the error came from the directory collaborator
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}
