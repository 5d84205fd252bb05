//! Output records and their JSON form.

use canonical::FieldKind;
use semantic::FieldEmbedding;
use serde::{Deserialize, Serialize};

/// Vectors for one content item. Both vectors always have the pipeline's
/// dimension; a modality with no embedding is all zeros.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    #[serde(rename = "contentId")]
    pub content_id: String,
    pub text_vec: Vec<f32>,
    pub tag_vec: Vec<f32>,
}

/// Response payload: `{"content_vectors": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentVectors {
    pub content_vectors: Vec<VectorRecord>,
}

impl ContentVectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: VectorRecord) {
        self.content_vectors.push(record);
    }

    pub fn len(&self) -> usize {
        self.content_vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content_vectors.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Collects field vectors for one item, then fills the gaps.
#[derive(Debug)]
pub(crate) struct RecordBuilder {
    content_id: String,
    text_vec: Option<Vec<f32>>,
    tag_vec: Option<Vec<f32>>,
}

impl RecordBuilder {
    pub(crate) fn new(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            text_vec: None,
            tag_vec: None,
        }
    }

    /// Later text fields replace earlier ones.
    pub(crate) fn set(&mut self, kind: FieldKind, vector: Vec<f32>) {
        match kind {
            FieldKind::Text => self.text_vec = Some(vector),
            FieldKind::Tags => self.tag_vec = Some(vector),
        }
    }

    pub(crate) fn add(&mut self, embedding: FieldEmbedding) {
        self.set(embedding.field.kind, embedding.vector);
    }

    pub(crate) fn finish(self, n_dim: usize) -> VectorRecord {
        VectorRecord {
            content_id: self.content_id,
            text_vec: self.text_vec.unwrap_or_else(|| vec![0.0; n_dim]),
            tag_vec: self.tag_vec.unwrap_or_else(|| vec![0.0; n_dim]),
        }
    }
}
