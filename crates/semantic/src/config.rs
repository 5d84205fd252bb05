use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SemanticError;

/// Which kind of pretrained model a pipeline expects to find on disk.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Paragraph vectors; output length is the model's `vector_size`.
    #[default]
    #[serde(rename = "doc2vec")]
    Doc2Vec,
    /// Topic model; output is a dense topic-weight vector of fixed length.
    #[serde(rename = "lda")]
    Lda,
}

impl ModelFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Doc2Vec => "doc2vec",
            ModelFamily::Lda => "lda",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration for vector inference.
///
/// # Example
/// ```
/// use semantic::{InferenceConfig, ModelFamily};
///
/// let cfg = InferenceConfig {
///     family: ModelFamily::Lda,
///     normalize: false,
///     ..Default::default()
/// };
/// assert_eq!(cfg.steps, 20);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    /// Model family every field model must belong to.
    pub family: ModelFamily,
    /// Starting learning rate for doc2vec inference.
    pub alpha: f32,
    /// Learning rate reached on the last inference pass.
    pub min_alpha: f32,
    /// Number of inference passes over the document's words.
    pub steps: usize,
    /// L2-normalize every produced vector (zero vectors stay zero).
    pub normalize: bool,
    /// Vector length assumed when no model can be probed.
    pub default_dimension: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            family: ModelFamily::Doc2Vec,
            alpha: 0.1,
            min_alpha: 0.0001,
            steps: 20,
            normalize: true,
            default_dimension: 50,
        }
    }
}

impl InferenceConfig {
    pub fn validate(&self) -> Result<(), SemanticError> {
        if !(self.alpha > 0.0) {
            return Err(SemanticError::InvalidConfig("alpha must be > 0".into()));
        }
        if !(self.min_alpha >= 0.0 && self.min_alpha <= self.alpha) {
            return Err(SemanticError::InvalidConfig(
                "min_alpha must be within [0, alpha]".into(),
            ));
        }
        if self.steps == 0 {
            return Err(SemanticError::InvalidConfig("steps must be >= 1".into()));
        }
        if self.default_dimension == 0 {
            return Err(SemanticError::InvalidConfig(
                "default_dimension must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
