//! Whitespace helpers.

use std::borrow::Cow;

/// Replaces every non-breaking space (U+00A0) with an ASCII space.
///
/// Borrows when there is nothing to replace. Editors and CMS exports love
/// inserting NBSP between words, and a single one would otherwise push an
/// English document onto the non-ASCII branch of the normalizer.
///
/// ```rust
/// use canonical::replace_nbsp;
///
/// assert_eq!(replace_nbsp("hello\u{00A0}world"), "hello world");
/// assert_eq!(replace_nbsp("hello world"), "hello world");
/// ```
pub fn replace_nbsp(text: &str) -> Cow<'_, str> {
    if text.contains('\u{00A0}') {
        Cow::Owned(text.replace('\u{00A0}', " "))
    } else {
        Cow::Borrowed(text)
    }
}
