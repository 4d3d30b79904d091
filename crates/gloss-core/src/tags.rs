//! Tag encoding helpers.
//!
//! SQLite has no native array type, so tag-id collections are stored as a
//! single canonical string: deduplicated, sorted, space-joined. Any two
//! collections with the same set of ids encode identically regardless of
//! input order or repetition.

use std::collections::BTreeSet;

/// Encode a collection of remote tag ids as the canonical on-disk string.
///
/// Ids are stringified first and sorted lexicographically on that string
/// form (so `10` sorts before `3`). Empty input encodes as the empty
/// string.
pub fn canonical_tag_string<I>(ids: I) -> String
where
  I: IntoIterator<Item = i64>,
{
  let unique: BTreeSet<String> =
    ids.into_iter().map(|id| id.to_string()).collect();
  unique.into_iter().collect::<Vec<_>>().join(" ")
}

/// Extract the marker-prefixed tokens from a note.
///
/// The note is split on whitespace; tokens starting with `marker` are kept.
/// Returned sorted and deduplicated so callers iterate deterministically.
pub fn marker_tokens(note: &str, marker: char) -> BTreeSet<String> {
  note
    .split_whitespace()
    .filter(|token| token.starts_with(marker))
    .map(str::to_owned)
    .collect()
}
