//! In-memory search filter for list pages.
//!
//! A record matches when the ASCII-lower-cased text of its search field
//! contains the ASCII-lower-cased query. The empty query matches every
//! record. Matching is locale-insensitive; non-ASCII characters compare
//! byte-for-byte.

use crate::record::{field_text, Record};

/// Whether `record` matches an already lower-cased `needle`.
fn matches_lowered(record: &Record, field: &str, needle: &str) -> bool {
    field_text(record, field)
        .to_ascii_lowercase()
        .contains(needle)
}

/// Whether `record` matches `query` on `field`.
pub fn matches(record: &Record, field: &str, query: &str) -> bool {
    matches_lowered(record, field, &query.to_ascii_lowercase())
}

/// The subsequence of `records` whose `field` contains `query`,
/// case-insensitively, in original order.
pub fn filter<'a>(records: &'a [Record], field: &str, query: &str) -> Vec<&'a Record> {
    let needle = query.to_ascii_lowercase();
    records
        .iter()
        .filter(|r| matches_lowered(r, field, &needle))
        .collect()
}
