//! Category alias matching.
//!
//! Category strings arrive in many spellings (`sunglasses`, `Sun-Glasses`,
//! `stock-sunglasses`, Greek with or without tonos). Both sides are folded to
//! lowercase alphanumerics with diacritics removed, then compared by
//! equality, prefix, or suffix. A match that only occurs in the middle of the
//! value is rejected.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases, NFD-decomposes, and drops combining marks and every
/// non-alphanumeric character.
///
/// `"Γυαλιά Ηλίου"` and `"γυαλια-ηλιου"` both fold to `"γυαλιαηλιου"`.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Returns `true` when `value` equals, starts with, or ends with one of
/// `aliases` after folding. Empty values never match and empty aliases are
/// ignored.
#[must_use]
pub fn matches<S: AsRef<str>>(value: &str, aliases: &[S]) -> bool {
    let folded = normalize(value);
    if folded.is_empty() {
        return false;
    }

    aliases.iter().any(|alias| {
        let alias = normalize(alias.as_ref());
        !alias.is_empty()
            && (folded == alias || folded.starts_with(&alias) || folded.ends_with(&alias))
    })
}
