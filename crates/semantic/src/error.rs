use std::io;
use thiserror::Error;

use crate::config::ModelFamily;

/// Errors surfaced while loading models or inferring vectors.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// The model file does not exist.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The model file exists but could not be parsed or fails validation.
    #[error("invalid model {path}: {reason}")]
    InvalidModel { path: String, reason: String },
    /// The model on disk belongs to a different family than the pipeline expects.
    #[error("model {path} is {found}, expected {expected}")]
    FamilyMismatch {
        path: String,
        expected: ModelFamily,
        found: ModelFamily,
    },
    /// Inference configuration is inconsistent.
    #[error("invalid inference config: {0}")]
    InvalidConfig(String),
    /// Low-level IO failures while touching the filesystem.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Clone for SemanticError {
    fn clone(&self) -> Self {
        match self {
            SemanticError::ModelNotFound(s) => SemanticError::ModelNotFound(s.clone()),
            SemanticError::InvalidModel { path, reason } => SemanticError::InvalidModel {
                path: path.clone(),
                reason: reason.clone(),
            },
            SemanticError::FamilyMismatch {
                path,
                expected,
                found,
            } => SemanticError::FamilyMismatch {
                path: path.clone(),
                expected: *expected,
                found: *found,
            },
            SemanticError::InvalidConfig(s) => SemanticError::InvalidConfig(s.clone()),
            SemanticError::Io(err) => SemanticError::Io(io::Error::new(err.kind(), err.to_string())),
        }
    }
}
