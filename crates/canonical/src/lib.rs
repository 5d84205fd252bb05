//! object2vec canonical text layer.
//!
//! Turns the raw contents of a content field into the token list a pretrained
//! model is asked to embed. Two field kinds exist and they are treated very
//! differently:
//!
//! - **Tags** - comma separated, whitespace squeezed out, lowercased and
//!   deduplicated in first-seen order.
//! - **Text** - ASCII text gets letters-only cleanup, lowercasing and English
//!   stopword removal. Anything with non-ASCII characters is only split on
//!   whitespace, so non-Latin scripts pass through untouched.
//!
//! ## Pure function guarantee
//!
//! Apart from [`decode_lossy`] emitting a warning event, nothing here touches
//! I/O. Same bytes and config in, same tokens out.
//!
//! ## Example
//!
//! ```
//! use canonical::{normalize_field, FieldKind, TokenizeConfig};
//!
//! let cfg = TokenizeConfig::default();
//! let tokens = normalize_field("The Cat sat!! on a mat", FieldKind::Text, &cfg);
//! assert_eq!(tokens, vec!["cat", "sat", "mat"]);
//!
//! let tags = normalize_field("a, B,  b ,c", FieldKind::Tags, &cfg);
//! assert_eq!(tags, vec!["a", "b", "c"]);
//! ```

mod config;
mod decode;
mod error;
mod field;
mod pipeline;
mod stopwords;
mod whitespace;

pub use crate::config::TokenizeConfig;
pub use crate::decode::{decode_lossy, decode_text};
pub use crate::error::CanonicalError;
pub use crate::field::{Field, FieldKind, DEFAULT_MODEL_NAME};
pub use crate::pipeline::{
    dedupe_preserving_order, is_ascii, normalize_field, tokenize_tags, tokenize_text,
};
pub use crate::stopwords::is_stopword;
pub use crate::whitespace::replace_nbsp;
