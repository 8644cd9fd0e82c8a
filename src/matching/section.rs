//! Section comparison and lookup in manifest order, with abbreviation-aware equality.

use tracing::trace;

use crate::core::section::{section_key, CanonicalSection};
use crate::manifest::store::ManifestTable;
use crate::matching::abbreviation::{abbreviations_equal, phrase_equals_abbreviation, phrases_equal};
use crate::matching::features::{canonical_digits, SectionFeatures};

/// Which comparison established that two sections are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMatch {
    /// Same text once trimmed and lower-cased
    Exact,
    /// Same number and one side has nothing but the number
    BareNumber,
    /// Same number and matching phrases
    Phrase,
    /// Same number and a phrase abbreviated by the other side's code
    PhraseAbbreviation,
    /// Same number and similar codes
    Abbreviation,
}

/// Decide whether two section strings name the same section.
///
/// Sections are anchored on their first digit run and are never equal when those
/// differ. See [`compare_sections`] for the comparison that matched.
pub fn sections_equal(first: &str, second: &str, strict: bool) -> bool {
    compare_sections(first, second, strict).is_some()
}

/// Compare two section strings, reporting how they matched
pub fn compare_sections(first: &str, second: &str, strict: bool) -> Option<SectionMatch> {
    if section_key(first) == section_key(second) {
        return Some(SectionMatch::Exact);
    }

    let a = SectionFeatures::extract(first);
    let b = SectionFeatures::extract(second);

    if canonical_digits(&a.digits) != canonical_digits(&b.digits) {
        return None;
    }

    if a.is_bare_number() || b.is_bare_number() {
        return Some(SectionMatch::BareNumber);
    }

    for phrase_a in non_empty(a.phrases()) {
        for phrase_b in non_empty(b.phrases()) {
            if phrases_equal(phrase_a, phrase_b, strict) {
                return Some(SectionMatch::Phrase);
            }
        }
    }

    for phrase_a in non_empty(a.phrases()) {
        for code_b in non_empty(b.abbreviations()) {
            if phrase_equals_abbreviation(phrase_a, code_b, strict) {
                return Some(SectionMatch::PhraseAbbreviation);
            }
        }
    }

    for phrase_b in non_empty(b.phrases()) {
        for code_a in non_empty(a.abbreviations()) {
            if phrase_equals_abbreviation(phrase_b, code_a, strict) {
                return Some(SectionMatch::PhraseAbbreviation);
            }
        }
    }

    for code_a in non_empty(a.abbreviations()) {
        for code_b in non_empty(b.abbreviations()) {
            if abbreviations_equal(code_a, code_b) {
                return Some(SectionMatch::Abbreviation);
            }
        }
    }

    None
}

fn non_empty<const N: usize>(parts: [&str; N]) -> impl Iterator<Item = &str> {
    parts.into_iter().filter(|part| !part.is_empty())
}

/// Find the canonical section an arbitrary section string refers to.
///
/// Sections are tried in manifest order and the first equal one wins. Blank input
/// never matches.
pub fn query_section<'a>(
    manifest: &'a ManifestTable,
    section: &str,
    strict: bool,
) -> Option<&'a CanonicalSection> {
    let wanted = section_key(section);
    if wanted.is_empty() {
        return None;
    }

    manifest.sections().iter().find(|candidate| {
        let matched = compare_sections(&candidate.key, &wanted, strict);
        if let Some(how) = matched {
            trace!(candidate = %candidate.key, input = %wanted, ?how, "section matched");
        }
        matched.is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SectionId;

    #[test]
    fn test_exact_match() {
        assert_eq!(
            compare_sections("Suite 221", "  suite 221 ", false),
            Some(SectionMatch::Exact)
        );
    }

    #[test]
    fn test_digits_must_agree() {
        assert!(!sections_equal("Section 12", "Section 13", false));
        assert!(!sections_equal("136", "Reserve 137", false));
    }

    #[test]
    fn test_leading_zeros_ignored() {
        assert!(sections_equal("Reserve 7", "reserve 007", false));
    }

    #[test]
    fn test_bare_number_matches_any_decoration() {
        assert_eq!(
            compare_sections("136", "Reserve 136", false),
            Some(SectionMatch::BareNumber)
        );
        assert_eq!(
            compare_sections("Field Box 136", "136", false),
            Some(SectionMatch::BareNumber)
        );
    }

    #[test]
    fn test_phrase_match() {
        assert_eq!(
            compare_sections("Right Field Pavilion 302", "Pavilion 302", false),
            Some(SectionMatch::Phrase)
        );
    }

    #[test]
    fn test_phrase_abbreviation_match() {
        assert_eq!(
            compare_sections("Infield Reserve 7", "IFR7", false),
            Some(SectionMatch::PhraseAbbreviation)
        );
        assert_eq!(
            compare_sections("311PL", "Left Field Pavilion 311", false),
            Some(SectionMatch::PhraseAbbreviation)
        );
        assert_eq!(
            compare_sections("Reserve 31", "31RS", false),
            Some(SectionMatch::PhraseAbbreviation)
        );
    }

    #[test]
    fn test_abbreviation_match() {
        assert_eq!(
            compare_sections("MVP12", "12MVPC", false),
            Some(SectionMatch::Abbreviation)
        );
    }

    #[test]
    fn test_unrelated_sections_with_same_number() {
        assert!(!sections_equal("Top Deck 6", "Field Box 6", false));
        assert!(!sections_equal("TD6", "FB6", false));
    }

    #[test]
    fn test_query_section_first_match_wins() {
        let manifest = ManifestTable::from_sections(vec![
            CanonicalSection::new("Top Deck 6", SectionId(1)),
            CanonicalSection::new("Field Box 6", SectionId(2)),
            CanonicalSection::new("6", SectionId(3)),
        ])
        .unwrap();

        let found = query_section(&manifest, "FIELD BOX 6", false).map(|s| s.section_id);
        assert_eq!(found, Some(SectionId(2)));

        // Decorated with something unrelated: only the bare-number section accepts it
        let found = query_section(&manifest, "Loge 6", false).map(|s| s.section_id);
        assert_eq!(found, Some(SectionId(3)));
    }

    #[test]
    fn test_query_section_blank_input() {
        let manifest = ManifestTable::from_sections(vec![CanonicalSection::new(
            "Green Monster SRO",
            SectionId(1),
        )])
        .unwrap();
        assert!(query_section(&manifest, "   ", false).is_none());
    }
}
