use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{InferenceConfig, ModelFamily};
use crate::lda::LDA_TOPIC_DIM;
use crate::model::load_model;

/// Model files directly inside `model_dir` whose names end in `text` or
/// `tags`, sorted by name. An unreadable directory yields an empty list.
pub fn find_model_files(model_dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(model_dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(model_dir = %model_dir.display(), error = %err, "model_dir_unreadable");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with("text") || name.ends_with("tags"))
        })
        .collect();
    files.sort();
    files
}

/// Output length of the models in `model_dir`.
///
/// Loads the first model file found and embeds `["test"]` with it. Any failure
/// along the way yields `cfg.default_dimension`. LDA output is always
/// [`LDA_TOPIC_DIM`] long, so nothing is loaded for that family.
pub fn probe_dimension(model_dir: &Path, cfg: &InferenceConfig) -> usize {
    if cfg.family == ModelFamily::Lda {
        return LDA_TOPIC_DIM;
    }

    let Some(path) = find_model_files(model_dir).into_iter().next() else {
        warn!(
            model_dir = %model_dir.display(),
            default = cfg.default_dimension,
            "dimension_probe_no_models"
        );
        return cfg.default_dimension;
    };

    match load_model(&path) {
        Ok(model) => {
            let dim = model.as_model().embed(&["test".to_string()], cfg).len();
            if dim == 0 {
                warn!(path = %path.display(), "dimension_probe_empty_vector");
                return cfg.default_dimension;
            }
            info!(path = %path.display(), dimension = dim, "dimension_probed");
            dim
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                default = cfg.default_dimension,
                "dimension_probe_failed"
            );
            cfg.default_dimension
        }
    }
}
