// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that reach the caller of a search.
///
/// Per-document problems never show up here; they are folded into the
/// document's status by the scanner.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A search is already in progress on this coordinator")]
    SearchAlreadyInProgress,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search worker failed: {0}")]
    Worker(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization(err.to_string())
    }
}

/// Failure to turn a single file into text units.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unreadable document {path}: {message}")]
    UnreadableDocument { path: PathBuf, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl ExtractionError {
    pub fn unreadable(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ExtractionError::UnreadableDocument {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
