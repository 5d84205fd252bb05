//! object2vec ingest layer
//!
//! This is where content enters the vectorization pipeline. There are two ways
//! in:
//!
//! - **Corpus** - a directory with one folder per content item. Each folder
//!   holds field files named after the model that embeds them (`en-text`,
//!   `hi-text`, `tags`). [`list_content_items`] walks it.
//! - **Query document** - a single JSON object with a `contentId` and a map of
//!   field name to raw text. [`QueryDocument`] parses it.
//!
//! Reading is best effort: field files with invalid UTF-8 are decoded lossily
//! by [`read_field_text`]. Only a missing or unreadable corpus root is fatal.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use ingest::{list_content_items, read_field_text};
//!
//! for item in list_content_items(Path::new("/data/corpus")).unwrap() {
//!     for (field, path) in item.fields() {
//!         if path.exists() {
//!             let text = read_field_text(&path).unwrap();
//!             println!("{} {} {} bytes", item.content_id, field.model_name, text.len());
//!         }
//!     }
//! }
//! ```

mod corpus;
mod error;
mod payload;
mod types;

pub use crate::corpus::{discover_field_files, list_content_items, FIELD_SUFFIXES};
pub use crate::error::IngestError;
pub use crate::payload::read_field_text;
pub use crate::types::{ContentItem, QueryDocument};
