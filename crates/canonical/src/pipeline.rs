use std::hash::Hash;

use fxhash::FxHashSet;

use crate::config::TokenizeConfig;
use crate::field::FieldKind;
use crate::stopwords::is_stopword;
use crate::whitespace::replace_nbsp;

/// Main entry point. Picks the tag or text normalizer for `kind`.
pub fn normalize_field(raw: &str, kind: FieldKind, cfg: &TokenizeConfig) -> Vec<String> {
    match kind {
        FieldKind::Tags => tokenize_tags(raw),
        FieldKind::Text => tokenize_text(raw, cfg),
    }
}

/// Splits a comma separated tag list.
///
/// Each tag has all internal whitespace removed (`"data science"` becomes
/// `"datascience"`) and is lowercased. Empty tags are dropped and the rest are
/// deduplicated in first-seen order.
pub fn tokenize_tags(raw: &str) -> Vec<String> {
    let tags = raw
        .split(',')
        .map(|tag| {
            tag.chars()
                .filter(|ch| !ch.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|tag| !tag.is_empty());
    dedupe_preserving_order(tags)
}

/// Tokenizes free text.
///
/// ASCII input is reduced to letters, lowercased, and filtered by length and
/// stopwords. Anything else is split on whitespace and returned verbatim.
pub fn tokenize_text(raw: &str, cfg: &TokenizeConfig) -> Vec<String> {
    let text = replace_nbsp(raw);
    if !is_ascii(&text) {
        return text.split_whitespace().map(str::to_owned).collect();
    }

    let letters: String = text
        .chars()
        .map(|ch| if ch.is_ascii_alphabetic() { ch } else { ' ' })
        .collect();

    letters
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .filter(|word| word.len() >= cfg.min_token_len)
        .filter(|word| !(cfg.filter_stopwords && is_stopword(word)))
        .collect()
}

pub fn is_ascii(text: &str) -> bool {
    text.is_ascii()
}

/// Keeps the first occurrence of every item, preserving order.
pub fn dedupe_preserving_order<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
