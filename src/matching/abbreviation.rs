//! Abbreviation and phrase equivalence.
//!
//! Ticket sources abbreviate section names freely: `"Infield Reserve"` may show up
//! as `"IFR"`, `"Left Field Pavilion"` as `"PL"`, `"Reserve"` as `"RS"`. The tests
//! here decide whether a phrase and a short code, two codes, or two phrases name
//! the same thing.

use std::collections::BTreeSet;

use crate::matching::similarity::ratio;
use crate::utils::validation::MAX_SUBSEQUENCE_SOURCE_LEN;

/// Minimum ratio between an acronym and a code
pub const ACRONYM_RATIO_THRESHOLD: f64 = 0.6;

/// Minimum ratio between two phrases
pub const PHRASE_RATIO_THRESHOLD: f64 = 0.75;

/// Minimum ratio between two codes
pub const ABBREVIATION_RATIO_THRESHOLD: f64 = 0.8;

/// First letter of every word, lower-cased
pub fn acronym(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Does `code` abbreviate `phrase`?
///
/// Checked in order, stopping at the first success:
///
/// 1. The acronym of the phrase equals the code.
/// 2. The acronym is similar enough to the code (non-strict only).
/// 3. The code is a sorted subsequence of the acronym's letters, which tolerates
///    dropped and swapped letters: `"pr"` for `"right field pavilion"` (non-strict only).
/// 4. The code's letters appear in order while reading through the phrase. In strict
///    mode every word visited before the code is used up must start with the next
///    code letter.
pub fn phrase_equals_abbreviation(phrase: &str, code: &str, strict: bool) -> bool {
    let acronym = acronym(phrase);
    if acronym == code {
        return true;
    }

    if !strict {
        if ratio(&acronym, code) >= ACRONYM_RATIO_THRESHOLD {
            return true;
        }

        let code_chars: Vec<char> = code.chars().collect();
        let acronym_chars: Vec<char> = acronym.chars().collect();
        if acronym_chars.len() <= MAX_SUBSEQUENCE_SOURCE_LEN {
            let forward = ordered_subsequences(&acronym_chars);
            if forward.contains(&code_chars) {
                return true;
            }

            let reversed: Vec<char> = acronym_chars.iter().rev().copied().collect();
            if ordered_subsequences(&reversed).contains(&code_chars) {
                return true;
            }
        }
    }

    contained_in_order(phrase, code, strict)
}

/// Walk the phrase letter by letter, consuming `code` as its letters turn up
fn contained_in_order(phrase: &str, code: &str, strict: bool) -> bool {
    let code: Vec<char> = code.chars().collect();
    let mut cursor = 0;

    for word in phrase.split_whitespace() {
        for (position, c) in word.chars().enumerate() {
            if cursor >= code.len() {
                break;
            }
            if c == code[cursor] {
                cursor += 1;
            } else if strict && position == 0 {
                return false;
            }
        }
    }

    cursor == code.len()
}

/// Do two phrases name the same thing?
///
/// Non-strict comparison accepts either phrase containing the other
/// (`"right field pavilion"` and `"pavilion"`); otherwise the phrases must be similar.
pub fn phrases_equal(first: &str, second: &str, strict: bool) -> bool {
    if !strict && (first.contains(second) || second.contains(first)) {
        return true;
    }
    ratio(first, second) >= PHRASE_RATIO_THRESHOLD
}

/// Are two codes close enough to be the same abbreviation?
pub fn abbreviations_equal(first: &str, second: &str) -> bool {
    ratio(first, second) >= ABBREVIATION_RATIO_THRESHOLD
}

/// Every distinct sorted tuple drawn from a non-empty subset of `chars`.
///
/// `['x', 'z', 'y']` yields `xyz, xy, xz, yz, x, y, z`. Callers bound the input
/// length; the set has up to `2^n - 1` members.
pub fn ordered_subsequences(chars: &[char]) -> BTreeSet<Vec<char>> {
    let mut subsets = BTreeSet::new();
    let count = chars.len().min(MAX_SUBSEQUENCE_SOURCE_LEN);

    for mask in 1u32..(1u32 << count) {
        let mut subset: Vec<char> = (0..count)
            .filter(|bit| mask & (1 << bit) != 0)
            .map(|bit| chars[bit])
            .collect();
        subset.sort_unstable();
        subsets.insert(subset);
    }

    subsets
}
