use thiserror::Error;

/// Errors that can occur while turning raw field bytes into text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    /// The bytes are not valid UTF-8. `valid_up_to` is the length of the
    /// longest valid prefix.
    #[error("field bytes are not valid utf-8 (valid up to byte {valid_up_to})")]
    Encoding { valid_up_to: usize },
}
