use std::path::PathBuf;

use canonical::Field;
use serde::{Deserialize, Serialize};

use crate::config::ModelFamily;

/// How the model behind a [`FieldEmbedding`] was found.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Specific,
    Fallback,
}

/// Vector produced for one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldEmbedding {
    /// Field the vector belongs to.
    pub field: Field,
    /// Model file that produced the vector.
    pub model_path: PathBuf,
    /// Whether the field's own model or the default one was used.
    pub selection: SelectionKind,
    pub family: ModelFamily,
    pub vector: Vec<f32>,
    /// Dimension of `vector`.
    pub embedding_dim: usize,
    /// Whether [`vector`](Self::vector) was L2-normalized.
    pub normalized: bool,
}

impl FieldEmbedding {
    pub fn used_fallback(&self) -> bool {
        self.selection == SelectionKind::Fallback
    }
}
