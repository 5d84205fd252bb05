//! Model files on disk and the common inference seam.
//!
//! A model file is a JSON document tagged with its family:
//!
//! ```json
//! { "family": "doc2vec", "vector_size": 50, "vocab": [...], "syn1neg": [...] }
//! { "family": "lda", "num_topics": 50, "vocabulary": [...], "alpha": [...], "exp_elog_beta": [...] }
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{InferenceConfig, ModelFamily};
use crate::doc2vec::Doc2VecModel;
use crate::error::SemanticError;
use crate::lda::LdaModel;

/// Anything that turns a token list into a vector.
pub trait VectorModel {
    fn family(&self) -> ModelFamily;

    /// Length of every vector [`embed`](Self::embed) returns.
    fn dimension(&self) -> usize;

    fn embed(&self, tokens: &[String], cfg: &InferenceConfig) -> Vec<f32>;

    /// Vector learned for `key` during training, if the model keeps them.
    fn stored_vector(&self, _key: &str) -> Option<&[f32]> {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "family")]
pub enum ModelFile {
    #[serde(rename = "doc2vec")]
    Doc2Vec(Doc2VecModel),
    #[serde(rename = "lda")]
    Lda(LdaModel),
}

impl ModelFile {
    pub fn family(&self) -> ModelFamily {
        self.as_model().family()
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelFile::Doc2Vec(model) => model.validate(),
            ModelFile::Lda(model) => model.validate(),
        }
    }

    pub fn as_model(&self) -> &dyn VectorModel {
        match self {
            ModelFile::Doc2Vec(model) => model,
            ModelFile::Lda(model) => model,
        }
    }

    pub fn as_doc2vec(&self) -> Option<&Doc2VecModel> {
        match self {
            ModelFile::Doc2Vec(model) => Some(model),
            ModelFile::Lda(_) => None,
        }
    }
}

impl From<Doc2VecModel> for ModelFile {
    fn from(model: Doc2VecModel) -> Self {
        ModelFile::Doc2Vec(model)
    }
}

impl From<LdaModel> for ModelFile {
    fn from(model: LdaModel) -> Self {
        ModelFile::Lda(model)
    }
}

/// Reads and validates a model file of any family.
pub fn load_model(path: &Path) -> Result<ModelFile, SemanticError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SemanticError::ModelNotFound(path.display().to_string()));
        }
        Err(err) => return Err(SemanticError::Io(err)),
    };
    let model: ModelFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|err| SemanticError::InvalidModel {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
    model.validate().map_err(|reason| SemanticError::InvalidModel {
        path: path.display().to_string(),
        reason,
    })?;

    info!(
        path = %path.display(),
        family = %model.family(),
        dimension = model.as_model().dimension(),
        "model_loaded"
    );
    Ok(model)
}

/// Like [`load_model`] but rejects a model of the wrong family.
pub fn load_model_as(path: &Path, family: ModelFamily) -> Result<ModelFile, SemanticError> {
    let model = load_model(path)?;
    let found = model.family();
    if found != family {
        return Err(SemanticError::FamilyMismatch {
            path: path.display().to_string(),
            expected: family,
            found,
        });
    }
    Ok(model)
}

/// Writes `model` as JSON, creating parent directories as needed.
pub fn save_model(path: &Path, model: &ModelFile) -> Result<(), SemanticError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, model).map_err(io::Error::from)?;
    writer.flush()?;
    Ok(())
}
