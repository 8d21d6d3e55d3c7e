//! Error types for schemald.
//!
//! Library crates use [`SchemaldError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::RecordId;

/// Top-level error type for all schemald operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaldError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A collaborator could not resolve data for a record.
    #[error("resolve error for record {id}: {message}")]
    Resolve { id: RecordId, message: String },

    /// The requested record or entity does not exist.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// JSON or TOML parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URI, malformed catalog, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SchemaldError>;

impl SchemaldError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a resolve error for the given record.
    pub fn resolve(id: RecordId, msg: impl Into<String>) -> Self {
        Self::Resolve {
            id,
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
