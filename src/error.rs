//! Unified error handling for the fit-activities library.
//!
//! All failures surface as a single [`ActivityError`] so a per-file decode
//! problem can be stored next to the file it belongs to and shown in a
//! running error log. Variants carry owned strings (not source errors) so the
//! type stays `Clone` — a failed activity keeps its error for the lifetime of
//! the list.

use std::path::Path;

use thiserror::Error;

/// Unified error type for discovery, decoding and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    /// File could not be opened or read
    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },

    /// File is not a valid FIT file or the decoder rejected it
    #[error("failed to decode '{path}': {message}")]
    Decode { path: String, message: String },

    /// File decoded but holds no activity data (no sessions or no records).
    /// Deliberately an error: an empty summary must be distinguishable from
    /// a summary full of zeroes.
    #[error("'{path}' contains no activity data")]
    NotAnActivity { path: String },

    /// Discovery pattern could not be interpreted
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Discovery matched nothing
    #[error("no FIT files found at '{path}'")]
    NoFilesFound { path: String },
}

impl ActivityError {
    /// Build an [`ActivityError::Io`] from a path and io error.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        ActivityError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Build an [`ActivityError::Decode`] from a path and decoder error message.
    pub fn decode(path: &Path, message: impl Into<String>) -> Self {
        ActivityError::Decode {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Build an [`ActivityError::NotAnActivity`] for a degenerate file.
    pub fn not_an_activity(path: &Path) -> Self {
        ActivityError::NotAnActivity {
            path: path.display().to_string(),
        }
    }
}

/// Result type alias for fit-activities operations.
pub type Result<T> = std::result::Result<T, ActivityError>;
