//! Row label normalization and lookup within a section.

use tracing::trace;

use crate::core::section::CanonicalSection;
use crate::core::types::RowId;
use crate::matching::features::{canonical_digits, has_digit, WordFeatures};

/// Marks a range of rows, e.g. `"1-10"` or `"A-Z"`
pub const RANGE_MARKER: char = '-';

/// Does the row text name a range of rows?
pub fn is_row_range(row: &str) -> bool {
    row.contains(RANGE_MARKER)
}

/// Reduce a row label to its canonical key.
///
/// The first word that looks like a row wins:
///
/// - all digits: `"12"` (leading zeros dropped)
/// - one or two letters: `"c"`, `"cc"`
/// - digits mixed with letters: only the digit run, so `"37wc"` becomes `"37"`
///
/// Ranges are returned trimmed and lower-cased but otherwise untouched; they never
/// resolve to a single row. Text with no row-like word is returned as is.
///
/// ```
/// use section_normalizer::matching::row::normalize_row;
///
/// assert_eq!(normalize_row("Row C"), "c");
/// assert_eq!(normalize_row("37Wc "), "37");
/// assert_eq!(normalize_row("1-10"), "1-10");
/// ```
pub fn normalize_row(row: &str) -> String {
    let row = row.trim().to_lowercase();

    if is_row_range(&row) {
        return row;
    }

    for word in row.split_whitespace() {
        if word.chars().all(|c| c.is_ascii_digit()) {
            return canonical_digits(word).to_string();
        }
        if word.chars().count() <= 2 && word.chars().all(|c| c.is_ascii_alphabetic()) {
            return word.to_string();
        }
        if has_digit(word) {
            let WordFeatures { digits, .. } = WordFeatures::extract(word);
            return canonical_digits(&digits).to_string();
        }
    }

    row
}

/// Are two row labels the same row?
pub fn rows_equal(first: &str, second: &str) -> bool {
    normalize_row(first) == normalize_row(second)
}

/// Find the id of the row in `section` matching `row`.
///
/// Stored row names are normalized again before comparing, so sections built from
/// un-normalized names still match. The first matching row in manifest order wins.
pub fn query_row(section: &CanonicalSection, row: &str) -> Option<RowId> {
    let wanted = normalize_row(row);
    if is_row_range(&wanted) {
        return None;
    }

    let found = section
        .rows()
        .find(|candidate| normalize_row(&candidate.name) == wanted)
        .map(|candidate| candidate.id);

    trace!(section = %section.key, row = %wanted, ?found, "row lookup");
    found
}
