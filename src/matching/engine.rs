//! The `Normalizer`, which routes a (section, row) request to a manifest result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::result::NormalizationResult;
use crate::core::sample::SampleRecord;
use crate::core::section::{section_key, CanonicalSection};
use crate::core::types::Resolution;
use crate::manifest::store::ManifestTable;
use crate::matching::row::{is_row_range, query_row};
use crate::matching::section::query_section;

/// Configuration for the normalizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Require abbreviations to follow word initials and skip fuzzy ratio checks
    #[serde(default)]
    pub strict: bool,
}

/// Result of normalizing one request, with how it was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalization<'a> {
    /// The answer reported to callers
    pub result: NormalizationResult,

    /// Path the request took
    pub resolution: Resolution,

    /// Canonical section the input matched, even when the row did not resolve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_key: Option<&'a str>,
}

impl<'a> Normalization<'a> {
    fn unresolved(resolution: Resolution, section: Option<&'a CanonicalSection>) -> Self {
        Self {
            result: NormalizationResult::invalid(),
            resolution,
            section_key: section.map(|s| s.key.as_str()),
        }
    }
}

/// Resolves raw (section, row) pairs against a manifest
pub struct Normalizer<'a> {
    manifest: &'a ManifestTable,
    config: MatchingConfig,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer with default (non-strict) configuration
    pub fn new(manifest: &'a ManifestTable) -> Self {
        Self {
            manifest,
            config: MatchingConfig::default(),
        }
    }

    /// Create a normalizer with custom configuration
    pub fn with_config(manifest: &'a ManifestTable, config: MatchingConfig) -> Self {
        Self { manifest, config }
    }

    pub fn config(&self) -> MatchingConfig {
        self.config
    }

    /// Normalize a single (section, row) input.
    ///
    /// An empty row means the section is addressed on its own and must be a
    /// manifest key as written (ignoring case and surrounding whitespace).
    pub fn normalize(&self, section: &str, row: &str) -> NormalizationResult {
        self.resolve(section, row).result
    }

    /// Normalize a single input, keeping track of how it resolved
    pub fn resolve(&self, section: &str, row: &str) -> Normalization<'a> {
        let manifest = self.manifest;

        if row.trim().is_empty() {
            let key = section_key(section);
            return match manifest.get(&key) {
                Some(found) => {
                    debug!(section = %key, id = %found.section_id, "suite resolved");
                    Normalization {
                        result: NormalizationResult::suite(found.section_id),
                        resolution: Resolution::Suite,
                        section_key: Some(found.key.as_str()),
                    }
                }
                None => {
                    debug!(section = %key, "suite not in manifest");
                    Normalization::unresolved(Resolution::SectionNotFound, None)
                }
            };
        }

        if is_row_range(row) {
            debug!(row, "row range rejected");
            return Normalization::unresolved(Resolution::RowRange, None);
        }

        let Some(found) = query_section(manifest, section, self.config.strict) else {
            debug!(section, "no matching section");
            return Normalization::unresolved(Resolution::SectionNotFound, None);
        };

        match query_row(found, row) {
            Some(row_id) => {
                debug!(section = %found.key, row, %row_id, "resolved");
                Normalization {
                    result: NormalizationResult::resolved(found.section_id, row_id),
                    resolution: Resolution::Resolved,
                    section_key: Some(found.key.as_str()),
                }
            }
            None => {
                debug!(section = %found.key, row, "no matching row");
                Normalization::unresolved(Resolution::RowNotFound, Some(found))
            }
        }
    }

    /// Fill in the output of every sample
    pub fn normalize_samples(&self, samples: &mut [SampleRecord]) {
        for sample in samples.iter_mut() {
            sample.output = self.normalize(&sample.input.section, &sample.input.row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RowId, SectionId};

    fn make_test_manifest() -> ManifestTable {
        ManifestTable::from_sections(vec![
            CanonicalSection::new("Suite 221", SectionId(5)),
            CanonicalSection::new("Reserve 40", SectionId(40))
                .with_rows([("A", RowId(1)), ("B", RowId(2)), ("Row C", RowId(3))]),
            CanonicalSection::new("Infield Reserve 7", SectionId(70))
                .with_rows([("1", RowId(71)), ("2", RowId(72))]),
            CanonicalSection::new("Green Monster SRO", SectionId(99)),
        ])
        .unwrap()
    }

    #[test]
    fn test_suite_section() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        assert_eq!(
            normalizer.normalize("Suite 221\t", ""),
            NormalizationResult::suite(SectionId(5))
        );
        assert_eq!(
            normalizer.normalize("Green Monster Sro", "  "),
            NormalizationResult::suite(SectionId(99))
        );
    }

    #[test]
    fn test_empty_row_on_section_with_rows_is_suite() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        let outcome = normalizer.resolve("Reserve 40", "");
        assert_eq!(outcome.result, NormalizationResult::suite(SectionId(40)));
        assert_eq!(outcome.resolution, Resolution::Suite);
    }

    #[test]
    fn test_suite_lookup_is_exact() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        // No fuzzy matching without a row
        let outcome = normalizer.resolve("Suite221", "");
        assert_eq!(outcome.result, NormalizationResult::invalid());
        assert_eq!(outcome.resolution, Resolution::SectionNotFound);
    }

    #[test]
    fn test_section_and_row_resolved() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        assert_eq!(
            normalizer.normalize("RESERVE 40", "row c"),
            NormalizationResult::resolved(SectionId(40), RowId(3))
        );
        assert_eq!(
            normalizer.normalize("IFR7", "Row 2"),
            NormalizationResult::resolved(SectionId(70), RowId(72))
        );
    }

    #[test]
    fn test_row_range_is_invalid() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        let outcome = normalizer.resolve("Reserve 40", "A-Z");
        assert_eq!(outcome.result, NormalizationResult::invalid());
        assert_eq!(outcome.resolution, Resolution::RowRange);
    }

    #[test]
    fn test_unknown_section() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        let outcome = normalizer.resolve("Nonexistent Deck 99", "1");
        assert_eq!(outcome.result, NormalizationResult::invalid());
        assert_eq!(outcome.resolution, Resolution::SectionNotFound);
    }

    #[test]
    fn test_unknown_row_reports_no_ids() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        let outcome = normalizer.resolve("Reserve 40", "Z");
        assert_eq!(outcome.result, NormalizationResult::invalid());
        assert_eq!(outcome.resolution, Resolution::RowNotFound);
        assert_eq!(outcome.section_key, Some("reserve 40"));
    }

    #[test]
    fn test_row_on_section_without_rows() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        let outcome = normalizer.resolve("Suite 221", "1");
        assert_eq!(outcome.result, NormalizationResult::invalid());
        assert_eq!(outcome.resolution, Resolution::RowNotFound);
    }

    #[test]
    fn test_normalize_samples() {
        let manifest = make_test_manifest();
        let normalizer = Normalizer::new(&manifest);

        let mut samples = vec![
            SampleRecord::new("reserve 40", "B", Some(SectionId(40)), Some(RowId(2)), true),
            SampleRecord::new("Suite 221", "", Some(SectionId(5)), None, true),
            SampleRecord::new("Reserve 40", "1-10", None, None, false),
        ];
        normalizer.normalize_samples(&mut samples);

        assert!(samples.iter().all(SampleRecord::is_match));
    }

    #[test]
    fn test_strict_config() {
        let manifest = ManifestTable::from_sections(vec![CanonicalSection::new(
            "Left Field Pavilion 311",
            SectionId(311),
        )
        .with_rows([("1", RowId(1))])])
        .unwrap();

        let lenient = Normalizer::new(&manifest);
        assert!(lenient.normalize("311PL", "1").valid);

        let strict = Normalizer::with_config(&manifest, MatchingConfig { strict: true });
        assert!(!strict.normalize("311PL", "1").valid);
        assert!(strict.config().strict);
    }
}
