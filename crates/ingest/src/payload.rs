//! Reading field files.
//!
//! Field files are read whole and decoded with [`canonical::decode_lossy`], so
//! invalid UTF-8 degrades to a pass-through string instead of failing the item.

use std::fs;
use std::path::Path;

use canonical::decode_lossy;
use tracing::debug;

use crate::error::IngestError;

/// Reads and decodes one field file.
pub fn read_field_text(path: &Path) -> Result<String, IngestError> {
    let bytes = fs::read(path).map_err(|err| IngestError::io(path, &err))?;
    debug!(path = %path.display(), bytes = bytes.len(), "field_file_read");
    Ok(decode_lossy(&bytes).into_owned())
}
