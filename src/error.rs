//! Error types for label evaluation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error type for evaluation operations.
///
/// Label-level problems never show up here: unrecognized values are
/// absorbed by normalization. Only structural problems are errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    /// Gold and predicted label sequences handed to the scorer differ in length.
    #[error("gold and pred length mismatch: gold={gold} pred={pred}")]
    LengthMismatch { gold: usize, pred: usize },

    /// Input document is not shaped like `{"results": [...]}`.
    #[error("malformed document {source_name}: {reason}")]
    MalformedDocument { source_name: String, reason: String },

    /// IO error while reading an input or writing a report.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON.
    #[error("invalid JSON in {source_name}: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be parsed.
    #[error("invalid config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl EvalError {
    /// Create a malformed-document error.
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        EvalError::MalformedDocument {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error tied to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.into(),
            source,
        }
    }
}
