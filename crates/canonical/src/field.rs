use serde::{Deserialize, Serialize};

/// Model consulted when a field has no model of its own.
pub const DEFAULT_MODEL_NAME: &str = "en-text";

/// Which modality a field contributes to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Tags,
    Text,
}

/// A content field plus the name of the model that embeds it.
///
/// The model name doubles as the file name inside the model directory
/// (`en-text`, `hi-text`, `tags`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Field {
    pub kind: FieldKind,
    pub model_name: String,
}

impl Field {
    pub fn tags() -> Self {
        Self {
            kind: FieldKind::Tags,
            model_name: "tags".into(),
        }
    }

    pub fn text(language: &str) -> Self {
        Self {
            kind: FieldKind::Text,
            model_name: format!("{language}-text"),
        }
    }

    /// Field for a file found in a content folder, or `None` when the name
    /// does not end in `tags` or `text`.
    ///
    /// Only the exact name `tags` is a tag field; `hi-tags` and friends are
    /// embedded as text with their own model.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name == "tags" {
            return Some(Self::tags());
        }
        if name.ends_with("text") || name.ends_with("tags") {
            return Some(Self {
                kind: FieldKind::Text,
                model_name: name.to_owned(),
            });
        }
        None
    }

    /// Field for a key of a single-query document: `tags` stays `tags`,
    /// any other key `k` becomes the `k-text` model.
    pub fn from_document_key(key: &str) -> Self {
        if key == "tags" {
            Self::tags()
        } else {
            Self::text(key)
        }
    }
}
