use std::path::{Path, PathBuf};

use canonical::{Field, DEFAULT_MODEL_NAME};
use tracing::{info, warn};

/// Outcome of looking up the model for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelection {
    /// The field's own model exists.
    Specific(PathBuf),
    /// Only the default `en-text` model exists.
    Fallback(PathBuf),
    /// Neither exists; the field is left out.
    Skip,
}

/// `<model_dir>/<model_name>`, then `<model_dir>/en-text`, then [`ModelSelection::Skip`].
pub fn select_model(model_dir: &Path, field: &Field) -> ModelSelection {
    let specific = model_dir.join(&field.model_name);
    if specific.is_file() {
        info!(model = %field.model_name, path = %specific.display(), "model_selected");
        return ModelSelection::Specific(specific);
    }

    let fallback = model_dir.join(DEFAULT_MODEL_NAME);
    if fallback.is_file() {
        info!(
            model = %field.model_name,
            fallback = DEFAULT_MODEL_NAME,
            "model_fallback"
        );
        return ModelSelection::Fallback(fallback);
    }

    warn!(
        model = %field.model_name,
        model_dir = %model_dir.display(),
        "model_missing_field_skipped"
    );
    ModelSelection::Skip
}
