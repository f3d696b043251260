//! Vietnamese-aware text normalization.
//!
//! Product names and categories in the catalog mix accented Vietnamese and
//! plain Latin text. Search and URL slugs both need an accent-insensitive
//! form: canonical decomposition (NFD) followed by removal of combining
//! marks, plus an explicit đ/Đ mapping since that letter decomposes to
//! itself rather than to `d` + a combining mark.

use unicode_normalization::UnicodeNormalization;

/// Whether a character is a Unicode combining diacritical mark.
const fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}')
}

/// Strip Vietnamese diacritics and lowercase.
///
/// `"Phụ kiện"` becomes `"phu kien"`, `"Đèn"` becomes `"den"`.
#[must_use]
pub fn strip_diacritics(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Convert a product name to its URL slug.
///
/// Diacritics are stripped, anything that is not alphanumeric, a hyphen, or
/// whitespace is dropped, whitespace runs become single hyphens, and leading
/// or trailing hyphens are trimmed. Idempotent: slugging a slug is a no-op.
///
/// `"Camera HD Pro 4K"` becomes `"camera-hd-pro-4k"`.
#[must_use]
pub fn to_slug(s: &str) -> String {
    let normalized = strip_diacritics(s);

    let mut slug = String::with_capacity(normalized.len());
    let mut pending_hyphen = false;
    for c in normalized.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = !slug.is_empty();
        } else if c.is_ascii_alphanumeric() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
        // Everything else (punctuation, symbols) is dropped.
    }
    slug
}
