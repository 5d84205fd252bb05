//! Error types produced by the ingest crate.
//!
//! All errors are cloneable and comparable so callers (and tests) can match on
//! them precisely. I/O failures are flattened to their message for that
//! reason.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`CorpusNotFound`](IngestError::CorpusNotFound) | corpus root does not exist |
//! | [`NotADirectory`](IngestError::NotADirectory) | corpus root is a file |
//! | [`Io`](IngestError::Io) | a directory or field file could not be read |
//! | [`InvalidQuery`](IngestError::InvalidQuery) | single-query JSON is malformed |
//! | [`MissingContentId`](IngestError::MissingContentId) | single-query `contentId` is blank |
use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while reading a corpus or a query document.
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::CorpusNotFound("/data/corpus".into());
/// assert_eq!(err.to_string(), "corpus root not found: /data/corpus");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    #[error("corpus root not found: {0}")]
    CorpusNotFound(String),

    #[error("corpus root is not a directory: {0}")]
    NotADirectory(String),

    #[error("io error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid query document: {0}")]
    InvalidQuery(String),

    #[error("query document requires a non-empty contentId")]
    MissingContentId,
}

impl IngestError {
    pub(crate) fn io(path: &Path, err: &io::Error) -> Self {
        IngestError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::InvalidQuery(err.to_string())
    }
}
