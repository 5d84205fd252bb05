//! Configuration for token normalization.
//!
//! The defaults reproduce the cleanup the pretrained models were trained
//! against. Changing them changes the token stream fed to inference, so
//! vectors produced under different configs are not comparable.
//!
//! ```rust
//! use canonical::TokenizeConfig;
//!
//! let config = TokenizeConfig::default();
//! assert_eq!(config.min_token_len, 2);
//! assert!(config.filter_stopwords);
//! ```

use serde::{Deserialize, Serialize};

/// Knobs for the ASCII text branch of the normalizer.
///
/// Tags and non-ASCII text ignore these settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizeConfig {
    /// Tokens shorter than this many bytes are dropped from ASCII text.
    pub min_token_len: usize,
    /// Drop tokens found in the English stopword set.
    pub filter_stopwords: bool,
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            filter_stopwords: true,
        }
    }
}
