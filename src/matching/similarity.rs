//! Matching-blocks similarity ratio.
//!
//! The ratio of two sequences is `2 * M / (len_a + len_b)` where `M` is the total
//! length of their matching blocks: the longest common block is found first, then
//! the search recurses into the unmatched text on either side of it. When several
//! blocks share the longest length, the one starting earliest in `a` (then in `b`)
//! is taken.

/// A common block: `a[a_start..a_start + len] == b[b_start..b_start + len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a_start: usize,
    b_start: usize,
    len: usize,
}

/// Similarity ratio of two strings in `[0, 1]`, compared character by character
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    // Tie-breaking favours `a`, so take the better of both directions to stay symmetric
    let matched = matching_characters(&a, &b).max(matching_characters(&b, &a));
    #[allow(clippy::cast_precision_loss)]
    {
        2.0 * matched as f64 / total as f64
    }
}

/// Total number of characters covered by matching blocks
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let block = longest_block(a, b, a_lo, a_hi, b_lo, b_hi);
        if block.len == 0 {
            continue;
        }
        matched += block.len;

        if a_lo < block.a_start && b_lo < block.b_start {
            pending.push((a_lo, block.a_start, b_lo, block.b_start));
        }
        let a_end = block.a_start + block.len;
        let b_end = block.b_start + block.len;
        if a_end < a_hi && b_end < b_hi {
            pending.push((a_end, a_hi, b_end, b_hi));
        }
    }

    matched
}

/// Longest common block within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`
fn longest_block(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> Block {
    let mut best = Block {
        a_start: a_lo,
        b_start: b_lo,
        len: 0,
    };

    // run[j + 1] = length of the common run ending at a[i - 1] and b[j]
    let mut run = vec![0usize; b.len() + 1];
    let mut next = vec![0usize; b.len() + 1];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            next[j + 1] = if a[i] == b[j] { run[j] + 1 } else { 0 };
            let len = next[j + 1];
            if len > best.len {
                best = Block {
                    a_start: i + 1 - len,
                    b_start: j + 1 - len,
                    len,
                };
            }
        }
        std::mem::swap(&mut run, &mut next);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identical_strings() {
        assert_close(ratio("pavilion", "pavilion"), 1.0);
        assert_close(ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_close(ratio("abc", "xyz"), 0.0);
        assert_close(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_partial_matches() {
        // One shared character out of three
        assert_close(ratio("r", "rs"), 2.0 / 3.0);
        // "lfp" vs "pl": a single one-character block
        assert_close(ratio("lfp", "pl"), 0.4);
        // "abcd" vs "bcda": block "bcd"
        assert_close(ratio("abcd", "bcda"), 0.75);
    }

    #[test]
    fn test_blocks_on_both_sides_are_counted() {
        // "xabcy" vs "xzabcz": blocks "abc" then "x"
        assert_close(ratio("xabcy", "xzabcz"), 8.0 / 11.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("infield reserve", "infield res"),
            ("ifr", "if"),
            ("left field", "right field"),
            ("lfp", "pl"),
        ];
        for (a, b) in pairs {
            assert_close(ratio(a, b), ratio(b, a));
        }
    }

    #[test]
    fn test_more_edits_score_lower() {
        let one_edit = ratio("pavilion", "pavilian");
        let two_edits = ratio("pavilion", "pavxlian");
        assert!(one_edit > two_edits);
        assert!(one_edit < 1.0);
    }
}
