//! Byte decoding for field files.
//!
//! Field files are expected to be UTF-8. [`decode_text`] is the strict step and
//! reports [`CanonicalError::Encoding`]; [`decode_lossy`] recovers from that
//! error locally so a single badly encoded file never aborts a corpus run.

use std::borrow::Cow;

use tracing::warn;

use crate::error::CanonicalError;

/// Strict UTF-8 decode.
pub fn decode_text(bytes: &[u8]) -> Result<String, CanonicalError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(err) => Err(CanonicalError::Encoding {
            valid_up_to: err.valid_up_to(),
        }),
    }
}

/// Decode, falling back to a replacement-character pass-through on invalid
/// UTF-8. The fallback output is never pure ASCII, so it takes the
/// whitespace-split branch of the normalizer.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    match decode_text(bytes) {
        Ok(text) => Cow::Owned(text),
        Err(err) => {
            warn!(error = %err, len = bytes.len(), "decode_fallback_lossy");
            String::from_utf8_lossy(bytes)
        }
    }
}
