//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::MeshFormat;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while loading a mesh.
///
/// Every variant is raised before any caller-visible state changes, so a
/// failed load can simply be reported and the previous mesh kept.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Extension unknown, or a recognized format without a parser.
    #[error("unsupported file format: {format}")]
    UnsupportedFormat {
        /// The extension or format name as given.
        format: String,
    },

    /// Structurally invalid content for a supported format.
    #[error("malformed {format} data: {message}")]
    MalformedFormat {
        /// Format being parsed.
        format: MeshFormat,
        /// Description of what was invalid, with its line when known.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text formats must be valid UTF-8.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl IoError {
    /// Create a `MalformedFormat` error with the given message.
    #[must_use]
    pub fn malformed(format: MeshFormat, message: impl Into<String>) -> Self {
        Self::MalformedFormat {
            format,
            message: message.into(),
        }
    }

    /// Create a `MalformedFormat` error pointing at a 1-based line number.
    #[must_use]
    pub fn malformed_at(format: MeshFormat, line: usize, message: impl std::fmt::Display) -> Self {
        Self::MalformedFormat {
            format,
            message: format!("line {line}: {message}"),
        }
    }

    /// Create an `UnsupportedFormat` error.
    #[must_use]
    pub fn unsupported(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Whether this is a `MalformedFormat` error.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedFormat { .. })
    }

    /// Whether this is an `UnsupportedFormat` error.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}
