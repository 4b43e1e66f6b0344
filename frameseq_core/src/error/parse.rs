//! Frame text parsing errors

use thiserror::Error;

/// Errors raised while reading frame, range or sequence text
///
/// Every variant names the offending token so callers can report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A comma separated slot with nothing in it
    #[error("Empty frame token in '{input}'")]
    EmptyToken { input: String },

    /// Non-numeric characters or a malformed range
    #[error("Invalid frame token '{token}' in '{input}'")]
    InvalidToken { token: String, input: String },

    /// Digits that do not fit a frame number
    #[error("Frame number '{token}' is out of range")]
    OutOfRange { token: String },

    /// Tokens that would not re-render identically under one padding width
    #[error("Frame token '{token}' does not match the padding of '{input}'")]
    InconsistentPadding { token: String, input: String },
}

impl ParseError {
    /// Create an empty token error
    pub fn empty_token(input: &str) -> Self {
        Self::EmptyToken {
            input: input.to_string(),
        }
    }

    /// Create an invalid token error
    pub fn invalid_token(token: &str, input: &str) -> Self {
        Self::InvalidToken {
            token: token.to_string(),
            input: input.to_string(),
        }
    }

    /// Create an out of range error
    pub fn out_of_range(token: &str) -> Self {
        Self::OutOfRange {
            token: token.to_string(),
        }
    }

    /// Create an inconsistent padding error
    pub fn inconsistent_padding(token: &str, input: &str) -> Self {
        Self::InconsistentPadding {
            token: token.to_string(),
            input: input.to_string(),
        }
    }

    /// The offending token, empty for [`ParseError::EmptyToken`]
    pub fn token(&self) -> &str {
        match self {
            Self::EmptyToken { .. } => "",
            Self::InvalidToken { token, .. }
            | Self::OutOfRange { token }
            | Self::InconsistentPadding { token, .. } => token,
        }
    }
}
