//! Corpus layout discovery.
//!
//! A corpus root holds one folder per content item. Inside an item folder,
//! field files are named after the model that embeds them (`en-text`,
//! `hi-text`, `tags`). Listing is sorted by name so responses come out in a
//! stable order.

use std::path::Path;

use canonical::dedupe_preserving_order;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::IngestError;
use crate::types::{folder_name, ContentItem};

/// File name suffixes that mark a field file.
pub const FIELD_SUFFIXES: [&str; 2] = ["tags", "text"];

/// Lists every immediate subfolder of `root` as a [`ContentItem`].
///
/// Only a missing or unreadable root is an error. Entries that cannot be
/// resolved (dangling links, permission errors) are logged and skipped.
pub fn list_content_items(root: &Path) -> Result<Vec<ContentItem>, IngestError> {
    check_root(root)?;

    let mut items = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(walk_error(root, err)),
            Err(err) => {
                skip_entry(root, &err);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(content_id) = folder_name(entry.path()) else {
            continue;
        };
        let field_files = discover_field_files(entry.path());
        debug!(content_id = %content_id, fields = field_files.len(), "content_item_found");
        items.push(ContentItem {
            content_id,
            path: entry.path().to_path_buf(),
            field_files,
        });
    }

    info!(root = %root.display(), items = items.len(), "corpus_listed");
    Ok(items)
}

/// Names of all files below `dir` (at any depth) ending in `tags` or `text`,
/// deduplicated in walk order. Symlinks are followed; anything unreadable is
/// skipped.
pub fn discover_field_files(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                skip_entry(dir, &err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if FIELD_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            names.push(name.into_owned());
        }
    }
    dedupe_preserving_order(names)
}

fn check_root(root: &Path) -> Result<(), IngestError> {
    if !root.exists() {
        return Err(IngestError::CorpusNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(IngestError::NotADirectory(root.display().to_string()));
    }
    Ok(())
}

fn skip_entry(fallback: &Path, err: &walkdir::Error) {
    let path = err.path().unwrap_or(fallback);
    warn!(path = %path.display(), error = %err, "corpus_entry_skipped");
}

fn walk_error(fallback: &Path, err: walkdir::Error) -> IngestError {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    match err.into_io_error() {
        Some(io_err) => IngestError::io(&path, &io_err),
        None => IngestError::Io {
            path: path.display().to_string(),
            message: "filesystem loop detected".into(),
        },
    }
}
