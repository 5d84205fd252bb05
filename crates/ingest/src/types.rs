use std::path::{Path, PathBuf};

use canonical::Field;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// One folder of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Folder name; becomes `contentId` in the response.
    pub content_id: String,
    /// Absolute or corpus-relative path of the folder.
    pub path: PathBuf,
    /// File names ending in `tags` or `text` found anywhere below the folder,
    /// deduplicated in walk order.
    pub field_files: Vec<String>,
}

impl ContentItem {
    /// Path a field file is expected at. Names discovered in nested folders
    /// are still resolved against the item folder itself, so such a path may
    /// not exist.
    pub fn field_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Recognised fields with their expected paths.
    pub fn fields(&self) -> impl Iterator<Item = (Field, PathBuf)> + '_ {
        self.field_files.iter().filter_map(|name| {
            Field::from_file_name(name).map(|field| (field, self.field_path(name)))
        })
    }
}

/// Input of the single-query mode.
///
/// ```json
/// {"contentId": "do_123", "document": {"en": "Photosynthesis in plants", "tags": "biology, plants"}}
/// ```
///
/// Field order is preserved as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryDocument {
    #[serde(rename = "contentId")]
    pub content_id: String,
    #[serde(default)]
    pub document: IndexMap<String, String>,
}

impl QueryDocument {
    pub fn new(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            document: IndexMap::new(),
        }
    }

    /// Builder-style helper used mostly by tests and the CLI.
    pub fn with_field(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.document.insert(key.into(), text.into());
        self
    }

    pub fn from_json(input: &str) -> Result<Self, IngestError> {
        let doc: QueryDocument = serde_json::from_str(input)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> Result<(), IngestError> {
        if self.content_id.trim().is_empty() {
            return Err(IngestError::MissingContentId);
        }
        Ok(())
    }

    /// Fields in document order with their raw text.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.document
            .iter()
            .map(|(key, text)| (Field::from_document_key(key), text.as_str()))
    }
}

/// Name of the last path component, used as the content id of a folder.
pub(crate) fn folder_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
