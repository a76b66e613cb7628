//! Label matching rules shared by every vault lookup.
//!
//! Two label forms exist side by side:
//! - the **decoded** form (percent-escapes resolved), used by exact and
//!   prefix lookup;
//! - the **raw** stored form, used by removal and substring search.
//!
//! All comparisons are case-insensitive (Unicode lowercase folding).

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use super::entry::Entry;

/// Decode percent-escapes in a stored label.
///
/// Invalid UTF-8 produced by decoding is replaced with U+FFFD rather
/// than rejected, so every stored label has a decoded form.
pub fn decode_label(label: &str) -> String {
    match percent_decode_str(label).decode_utf8_lossy() {
        Cow::Borrowed(s) => s.to_owned(),
        Cow::Owned(s) => s,
    }
}

/// Case-fold a label or query for comparison.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// `true` if the entry's decoded label equals `folded_query`.
pub fn decoded_equals(entry: &Entry, folded_query: &str) -> bool {
    fold(&decode_label(&entry.label)) == folded_query
}

/// `true` if the entry's decoded label starts with `folded_query`.
pub fn decoded_starts_with(entry: &Entry, folded_query: &str) -> bool {
    fold(&decode_label(&entry.label)).starts_with(folded_query)
}

/// `true` if the entry's raw label equals `folded_query`.
pub fn raw_equals(entry: &Entry, folded_query: &str) -> bool {
    fold(&entry.label) == folded_query
}

/// `true` if the entry's raw label contains `folded_query`.
pub fn raw_contains(entry: &Entry, folded_query: &str) -> bool {
    fold(&entry.label).contains(folded_query)
}

/// Index of the first entry whose decoded label equals `label`.
pub fn find_exact(entries: &[Entry], label: &str) -> Option<usize> {
    let folded = fold(label);
    entries.iter().position(|e| decoded_equals(e, &folded))
}

/// Index of the best match for `label`: an exact match if any,
/// otherwise the first entry whose decoded label starts with `label`.
pub fn find_best(entries: &[Entry], label: &str) -> Option<usize> {
    let folded = fold(label);
    entries
        .iter()
        .position(|e| decoded_equals(e, &folded))
        .or_else(|| entries.iter().position(|e| decoded_starts_with(e, &folded)))
}
