//! URL slug derivation for seller names.
//!
//! Every place that produces or matches a seller slug goes through
//! [`derive_slug`]; a second normalization anywhere else would make directory
//! lookups silently miss.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive a URL slug from a display name.
///
/// Lower-cases, strips diacritics, drops everything except ASCII letters,
/// digits, whitespace and hyphens, then joins the remaining words with single
/// hyphens. Leading and trailing separators are removed.
///
/// ```ignore
/// assert_eq!(derive_slug("João's  Store"), "joaos-store");
/// ```
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}
