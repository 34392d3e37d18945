//! Unified error types for chatline.
//!
//! Only two things can actually fail a parse: the main chat export being
//! absent or unreadable, and writing the output. Everything else in the
//! pipeline degrades instead of failing (bad dates, unknown attachment
//! extensions, transcripts without an anchor) and is reported through
//! `tracing` events and [`LinkReport`](crate::transcript::LinkReport).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatline operations.
///
/// # Example
///
/// ```rust
/// use chatline::error::Result;
/// use chatline::Timeline;
///
/// fn load() -> Result<Timeline> {
///     Ok(Timeline::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlineError>;

/// The error type for all chatline operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlineError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The chat export to parse does not exist.
    ///
    /// This is the only fatal input condition; missing auxiliary files
    /// (transcript sidecar, original export) are skipped with a warning.
    #[error("Chat export not found: {}", path.display())]
    MissingSource {
        /// The path that was requested
        path: PathBuf,
    },

    /// JSON serialization error while writing the timeline.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },
}

impl ChatlineError {
    /// Creates a missing-source error for the given path.
    pub fn missing_source(path: impl AsRef<Path>) -> Self {
        ChatlineError::MissingSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatlineError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Returns true if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlineError::Io(_))
    }

    /// Returns true if the main chat export was missing.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, ChatlineError::MissingSource { .. })
    }

    /// Returns true if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, ChatlineError::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_display() {
        let err = ChatlineError::missing_source("/tmp/_chat.txt");
        assert!(err.is_missing_source());
        assert!(!err.is_io());
        assert_eq!(err.to_string(), "Chat export not found: /tmp/_chat.txt");
    }

    #[test]
    fn test_io_from() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: ChatlineError = io_err.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ChatlineError::invalid_config("split_offset_ms", "must be positive");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'split_offset_ms': must be positive"
        );
    }
}
