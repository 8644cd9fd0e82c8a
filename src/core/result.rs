use serde::{Deserialize, Serialize};

use crate::core::types::{RowId, SectionId};

/// Outcome of normalizing one (section, row) request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub section_id: Option<SectionId>,
    pub row_id: Option<RowId>,
    pub valid: bool,
}

impl NormalizationResult {
    /// A section resolved on its own (suite-style, no row)
    pub fn suite(section_id: SectionId) -> Self {
        Self {
            section_id: Some(section_id),
            row_id: None,
            valid: true,
        }
    }

    /// Both section and row resolved
    pub fn resolved(section_id: SectionId, row_id: RowId) -> Self {
        Self {
            section_id: Some(section_id),
            row_id: Some(row_id),
            valid: true,
        }
    }

    /// Nothing resolved; invalid results never carry ids
    pub fn invalid() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for NormalizationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let section = self
            .section_id
            .map_or_else(|| "none".to_string(), |id| id.to_string());
        let row = self
            .row_id
            .map_or_else(|| "none".to_string(), |id| id.to_string());
        write!(f, "section_id={section} row_id={row} valid={}", self.valid)
    }
}
