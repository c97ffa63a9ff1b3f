//! Error types for the Galaxy3D render graph compiler
//!
//! Every failure of the loader or the builder is either a format error
//! (malformed JSON, missing field, wrong type, unknown token) or a semantic
//! error (duplicate name, dangling reference, conflicting fields, missing
//! executor). Both carry the field path of the offending value.

use std::fmt;

/// Result type for render graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render graph compiler errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The render graph file could not be read
    Io {
        /// File path
        path: String,
        /// OS error description
        reason: String,
    },

    /// Malformed JSON, missing field, wrong type or unknown token
    Format {
        /// Field path (e.g. "passes[2].reads[0].access")
        path: String,
        /// Human-readable reason
        reason: String,
    },

    /// Structurally valid input that does not make sense
    /// (duplicate name, dangling reference, missing executor...)
    Semantic {
        /// Field path (e.g. "outputs.present")
        path: String,
        /// Human-readable reason
        reason: String,
    },
}

impl Error {
    /// Field path (or file path for I/O errors) the error refers to
    pub fn path(&self) -> &str {
        match self {
            Error::Io { path, .. } | Error::Format { path, .. } | Error::Semantic { path, .. } => path,
        }
    }

    /// Human-readable reason
    pub fn reason(&self) -> &str {
        match self {
            Error::Io { reason, .. } | Error::Format { reason, .. } | Error::Semantic { reason, .. } => reason,
        }
    }

    /// True for format errors
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    /// True for semantic errors
    pub fn is_semantic(&self) -> bool {
        matches!(self, Error::Semantic { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, reason } => write!(f, "I/O error reading '{}': {}", path, reason),
            Error::Format { path, reason } => write!(f, "Format error at '{}': {}", path, reason),
            Error::Semantic { path, reason } => write!(f, "Semantic error at '{}': {}", path, reason),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
