//! object2vec semantic layer
//!
//! Turns normalized field tokens into dense vectors using pretrained models
//! stored as JSON files in a model directory, one file per field model name.
//!
//! Two model families are supported:
//!
//! - **doc2vec** - paragraph vectors. Inference refines a seeded document
//!   vector against the model's frozen output weights. Output length is the
//!   model's `vector_size`. Trained document vectors can also be read back
//!   ([`stored_field_vector`]) or searched ([`nearest_doctag`]).
//! - **lda** - topic models. Output is a dense topic-weight vector of fixed
//!   length [`LDA_TOPIC_DIM`].
//!
//! ## Fallback behavior
//!
//! A field without its own model is embedded with the default `en-text` model.
//! When neither exists the field is skipped (`Ok(None)`), not failed. A model
//! file that exists but does not parse is a hard error.
//!
//! Nothing is cached: every call loads its model from disk.
//!
//! ## Quick example
//!
//! ```no_run
//! use std::path::Path;
//! use canonical::Field;
//! use semantic::{embed_field, InferenceConfig};
//!
//! let tokens = vec!["water".to_string(), "cycle".to_string()];
//! let cfg = InferenceConfig::default();
//! if let Some(embedding) = embed_field(Path::new("/models"), &Field::text("en"), &tokens, &cfg).unwrap() {
//!     println!("{} dims from {}", embedding.embedding_dim, embedding.model_path.display());
//! }
//! ```

pub mod config;
pub mod error;
pub mod types;

mod dimension;
mod doc2vec;
mod lda;
mod model;
mod normalize;
mod seed;
mod select;

pub use crate::config::{InferenceConfig, ModelFamily};
pub use crate::dimension::{find_model_files, probe_dimension};
pub use crate::doc2vec::{Doc2VecModel, DoctagMatch, VocabEntry};
pub use crate::error::SemanticError;
pub use crate::lda::{LdaModel, LDA_TOPIC_DIM};
pub use crate::model::{load_model, load_model_as, save_model, ModelFile, VectorModel};
pub use crate::normalize::{cosine_similarity, l2_normalize};
pub use crate::select::{select_model, ModelSelection};
pub use crate::types::{FieldEmbedding, SelectionKind};

use std::path::{Path, PathBuf};

use canonical::Field;
use tracing::{debug, info, warn};

/// Inference passes used when searching stored document vectors.
pub const NEAREST_STEPS: usize = 5;

/// Embeds one field's tokens with the model selected for it.
///
/// Returns `Ok(None)` when no usable model exists for the field. The vector is
/// L2-normalized when `cfg.normalize` is set.
pub fn embed_field(
    model_dir: &Path,
    field: &Field,
    tokens: &[String],
    cfg: &InferenceConfig,
) -> Result<Option<FieldEmbedding>, SemanticError> {
    let Some((path, selection)) = resolve(model_dir, field) else {
        return Ok(None);
    };
    let model = load_model_as(&path, cfg.family)?;
    let vector = model.as_model().embed(tokens, cfg);
    debug!(
        model = %field.model_name,
        tokens = tokens.len(),
        dimension = vector.len(),
        "field_embedded"
    );
    Ok(Some(finish(field, path, selection, cfg, vector)))
}

/// Reads the vector a doc2vec model learned for `key` during training.
///
/// Only the field's own model is consulted: the stored vectors of the default
/// model belong to other documents. A missing model or key is logged and
/// yields `Ok(None)`.
pub fn stored_field_vector(
    model_dir: &Path,
    field: &Field,
    key: &str,
    cfg: &InferenceConfig,
) -> Result<Option<FieldEmbedding>, SemanticError> {
    let path = match select_model(model_dir, field) {
        ModelSelection::Specific(path) => path,
        ModelSelection::Fallback(_) => {
            warn!(model = %field.model_name, key, "stored_vector_requires_own_model");
            return Ok(None);
        }
        ModelSelection::Skip => return Ok(None),
    };
    let model = load_model_as(&path, cfg.family)?;
    let Some(stored) = model.as_model().stored_vector(key) else {
        warn!(model = %field.model_name, key, "stored_vector_missing");
        return Ok(None);
    };
    let vector = stored.to_vec();
    Ok(Some(finish(field, path, SelectionKind::Specific, cfg, vector)))
}

/// Stored document whose vector is closest to the tokens' inferred vector.
///
/// Inference runs [`NEAREST_STEPS`] passes. `Ok(None)` when the field is
/// skipped, the selected model is not doc2vec, or it stores no documents.
pub fn nearest_doctag(
    model_dir: &Path,
    field: &Field,
    tokens: &[String],
    cfg: &InferenceConfig,
) -> Result<Option<DoctagMatch>, SemanticError> {
    let Some((path, _)) = resolve(model_dir, field) else {
        return Ok(None);
    };
    let model = load_model(&path)?;
    let Some(doc2vec) = model.as_doc2vec() else {
        warn!(path = %path.display(), family = %model.family(), "nearest_requires_doc2vec");
        return Ok(None);
    };
    let search_cfg = InferenceConfig {
        steps: NEAREST_STEPS,
        ..cfg.clone()
    };
    let query = doc2vec.infer_vector(tokens, &search_cfg);
    let hit = doc2vec.nearest_doctag(&query);
    if let Some(hit) = &hit {
        info!(tag = %hit.tag, similarity = hit.similarity, "nearest_doctag");
    }
    Ok(hit)
}

fn resolve(model_dir: &Path, field: &Field) -> Option<(PathBuf, SelectionKind)> {
    match select_model(model_dir, field) {
        ModelSelection::Specific(path) => Some((path, SelectionKind::Specific)),
        ModelSelection::Fallback(path) => Some((path, SelectionKind::Fallback)),
        ModelSelection::Skip => None,
    }
}

fn finish(
    field: &Field,
    model_path: PathBuf,
    selection: SelectionKind,
    cfg: &InferenceConfig,
    mut vector: Vec<f32>,
) -> FieldEmbedding {
    if cfg.normalize {
        l2_normalize(&mut vector);
    }
    FieldEmbedding {
        field: field.clone(),
        model_path,
        selection,
        family: cfg.family,
        embedding_dim: vector.len(),
        vector,
        normalized: cfg.normalize,
    }
}
