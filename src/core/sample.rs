use serde::{Deserialize, Serialize};

use crate::core::result::NormalizationResult;
use crate::core::types::{RowId, SectionId};

/// Raw (section, row) pair as entered by a ticket source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleInput {
    pub section: String,
    #[serde(default)]
    pub row: String,
}

/// A graded sample: the input, the expected answer, and what the normalizer said.
///
/// Serialized one object per line when batch results are written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub input: SampleInput,
    pub expected: NormalizationResult,
    pub output: NormalizationResult,
}

impl SampleRecord {
    pub fn new(
        section: impl Into<String>,
        row: impl Into<String>,
        expected_section: Option<SectionId>,
        expected_row: Option<RowId>,
        expected_valid: bool,
    ) -> Self {
        Self {
            input: SampleInput {
                section: section.into(),
                row: row.into(),
            },
            expected: NormalizationResult {
                section_id: expected_section,
                row_id: expected_row,
                valid: expected_valid,
            },
            output: NormalizationResult::invalid(),
        }
    }

    /// Does the output agree with the expected answer on every field?
    pub fn is_match(&self) -> bool {
        self.expected == self.output
    }
}
