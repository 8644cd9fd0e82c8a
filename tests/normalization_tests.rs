//! End-to-end normalization behavior against a small ballpark manifest.

use section_normalizer::grading::grader::GradeSummary;
use section_normalizer::matching::abbreviation::phrase_equals_abbreviation;
use section_normalizer::matching::features::SectionFeatures;
use section_normalizer::matching::row::normalize_row;
use section_normalizer::parsing::samples::parse_samples_text;
use section_normalizer::{
    ManifestTable, MatchingConfig, NormalizationResult, Normalizer, RowId, SectionId,
};

const MANIFEST_CSV: &str = "section_id,section_name,row_id,row_name
5,Suite 221,,
40,Reserve 40,1,A
40,Reserve 40,2,B
40,Reserve 40,3,C
7,Infield Reserve 7,1,A
7,Infield Reserve 7,2,B
311,Left Field Pavilion 311,10,1
311,Left Field Pavilion 311,11,2
136,136,20,1
";

fn manifest() -> ManifestTable {
    ManifestTable::from_csv(MANIFEST_CSV).expect("manifest should load")
}

fn resolved(section: i64, row: i64) -> NormalizationResult {
    NormalizationResult::resolved(SectionId(section), RowId(row))
}

/// Requests used by the invariance checks, with their expected answers
fn scenarios() -> Vec<(&'static str, &'static str, NormalizationResult)> {
    vec![
        ("Suite 221", "", NormalizationResult::suite(SectionId(5))),
        ("RESERVE 40", "row c", resolved(40, 3)),
        ("Reserve 040", "c", resolved(40, 3)),
        ("Reserve 07", "a", resolved(7, 1)),
        ("IFR7", "B", resolved(7, 2)),
        ("311PL", "1", resolved(311, 10)),
        ("Field Box 136", "1", resolved(136, 20)),
        ("Reserve 40", "A-Z", NormalizationResult::invalid()),
        ("Reserve 40", "D", NormalizationResult::invalid()),
        ("Nonexistent Deck 99", "1", NormalizationResult::invalid()),
        ("Suite 999", "", NormalizationResult::invalid()),
    ]
}

#[test]
fn test_scenarios() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);

    for (section, row, expected) in scenarios() {
        assert_eq!(
            normalizer.normalize(section, row),
            expected,
            "normalizing {section:?} / {row:?}"
        );
    }
}

#[test]
fn test_case_and_whitespace_invariance() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);

    for (section, row, expected) in scenarios() {
        let shouted = format!("  {}\t", section.to_uppercase());
        let padded_row = if row.is_empty() {
            "   ".to_string()
        } else {
            format!(" {} ", row.to_lowercase())
        };
        assert_eq!(
            normalizer.normalize(&shouted, &padded_row),
            expected,
            "normalizing {shouted:?} / {padded_row:?}"
        );
    }
}

#[test]
fn test_any_row_range_is_invalid() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);

    for row in ["1-2", "A-Z", "aa-xx", "-", "Row 1-10", "c-"] {
        let result = normalizer.normalize("Reserve 40", row);
        assert!(!result.valid, "row {row:?} should be rejected");
        assert_eq!(result.section_id, None);
        assert_eq!(result.row_id, None);
    }
}

#[test]
fn test_different_digits_never_match() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);

    assert!(!normalizer.normalize("Reserve 41", "a").valid);
    assert!(!normalizer.normalize("IFR8", "a").valid);
    assert!(!normalizer.normalize("Left Field Pavilion 312", "1").valid);
}

#[test]
fn test_bare_number_section_accepts_decorations() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);

    for section in ["136", "Loge 136", "Box136", "136 Standing"] {
        assert_eq!(
            normalizer.normalize(section, "1"),
            resolved(136, 20),
            "normalizing {section:?}"
        );
    }
}

#[test]
fn test_bare_number_input_matches_decorated_section() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);
    assert_eq!(normalizer.normalize("40", "b"), resolved(40, 2));
}

#[test]
fn test_suite_with_row_is_invalid() {
    let manifest = manifest();
    let normalizer = Normalizer::new(&manifest);
    assert_eq!(
        normalizer.normalize("Suite 221", "1"),
        NormalizationResult::invalid()
    );
}

#[test]
fn test_strict_mode_rejects_loose_abbreviations() {
    let manifest = manifest();
    let loose = Normalizer::new(&manifest);
    let strict = Normalizer::with_config(&manifest, MatchingConfig { strict: true });

    assert_eq!(loose.normalize("311PL", "2"), resolved(311, 11));
    assert_eq!(strict.normalize("311PL", "2"), NormalizationResult::invalid());

    // Word initials still work in strict mode
    assert_eq!(strict.normalize("IFR7", "a"), resolved(7, 1));
}

#[test]
fn test_normalize_row_examples() {
    assert_eq!(normalize_row("37Wc"), "37");
    assert_eq!(normalize_row("Cc"), "cc");
    assert_eq!(normalize_row("row 12"), "12");

    for row in ["37Wc", "Cc", "row 12", "Row 007", "Standing Room"] {
        let once = normalize_row(row);
        assert_eq!(normalize_row(&once), once);
    }
}

#[test]
fn test_section_features_example() {
    let features = SectionFeatures::extract("Infield Reserve IFR7");
    assert_eq!(features.preceding_phrase, "infield reserve");
    assert_eq!(features.prefix, "ifr");
    assert_eq!(features.digits, "7");
    assert_eq!(features.suffix, "");
    assert_eq!(features.following_phrase, "");
}

#[test]
fn test_pavilion_abbreviations() {
    assert!(phrase_equals_abbreviation("left field pavilion", "pl", false));
    assert!(phrase_equals_abbreviation("right field pavilion", "pr", false));
}

#[test]
fn test_grade_normalized_samples() {
    let samples_csv = "section,row,n_section_id,n_row_id,valid
Reserve 40,C,40,3,true
Suite 221,,5,,true
IFR7,B,7,2,true
Reserve 40,1-10,,,false
311PL,2,311,11,true
";
    let manifest = manifest();
    let mut samples = parse_samples_text(samples_csv).unwrap();
    Normalizer::new(&manifest).normalize_samples(&mut samples);

    let (summary, _) = GradeSummary::grade(&samples);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.correct, 5);
    assert_eq!(summary.score, 5);

    // Strict mode declines the pavilion code rather than guessing
    let mut strict_samples = parse_samples_text(samples_csv).unwrap();
    Normalizer::with_config(&manifest, MatchingConfig { strict: true })
        .normalize_samples(&mut strict_samples);
    let (summary, _) = GradeSummary::grade(&strict_samples);
    assert_eq!(summary.missed, 1);
    assert_eq!(summary.score, 4);
}

#[test]
fn test_suite_record_after_rows_redeclares_section() {
    let csv = "section_id,section_name,row_id,row_name
40,Reserve 40,3,C
41,Reserve 40,,
";
    let manifest = ManifestTable::from_csv(csv).unwrap();
    let normalizer = Normalizer::new(&manifest);

    assert_eq!(
        normalizer.normalize("Reserve 40", ""),
        NormalizationResult::suite(SectionId(41))
    );
    assert_eq!(
        normalizer.normalize("Reserve 40", "C"),
        NormalizationResult::invalid()
    );
}
