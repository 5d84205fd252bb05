//! Workspace umbrella crate for object2vec.
//!
//! This crate stitches the ingest, canonical and semantic layers together so
//! callers can vectorize a whole corpus or a single query document with one
//! call:
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use object2vec::{infer_query, InferRequest, Object2VecConfig};
//!
//! let cfg = Object2VecConfig::default();
//! let json = infer_query(
//!     InferRequest::Corpus(PathBuf::from("/data/corpus")),
//!     Path::new("/data/models"),
//!     &cfg,
//! )
//! .unwrap();
//! println!("{json}");
//! ```

pub mod config;
pub mod logging;
mod pipeline;
mod response;

pub use canonical::{normalize_field, CanonicalError, Field, FieldKind, TokenizeConfig};
pub use ingest::{ContentItem, IngestError, QueryDocument};
pub use semantic::{DoctagMatch, InferenceConfig, ModelFamily, SemanticError};

pub use crate::config::{ConfigLoadError, Object2VecConfig};
pub use crate::pipeline::{infer_query, InferRequest, VectorPipeline};
pub use crate::response::{ContentVectors, VectorRecord};

use std::error::Error;
use std::fmt;

/// Errors that can occur while vectorizing a corpus or a query document.
#[derive(Debug, Clone)]
pub enum PipelineError {
    Ingest(IngestError),
    Semantic(SemanticError),
    /// A setting the requested operation needs is missing or invalid.
    Config(String),
    /// The response could not be encoded as JSON.
    Serialize(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "ingest failure: {err}"),
            PipelineError::Semantic(err) => write!(f, "inference failure: {err}"),
            PipelineError::Config(msg) => write!(f, "configuration error: {msg}"),
            PipelineError::Serialize(msg) => write!(f, "failed to encode response: {msg}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Semantic(err) => Some(err),
            PipelineError::Config(_) | PipelineError::Serialize(_) => None,
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<SemanticError> for PipelineError {
    fn from(value: SemanticError) -> Self {
        PipelineError::Semantic(value)
    }
}

impl From<ConfigLoadError> for PipelineError {
    fn from(value: ConfigLoadError) -> Self {
        PipelineError::Config(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Serialize(value.to_string())
    }
}
