//! URL slugs
//!
//! `"Café & Crème: Ünïcode!"` becomes `"cafe-creme-unicode"`: NFD
//! decomposition, combining marks dropped, lower-cased, every run of
//! characters outside `[a-z0-9]` collapsed to a single `-`, and no leading
//! or trailing `-`.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Derive a slug from free text. May return an empty string when the
/// input has no ASCII letters or digits left after normalisation.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.nfd().filter(|c| !is_combining_mark(*c)) {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}
