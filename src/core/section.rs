use serde::{Deserialize, Serialize};

use crate::core::types::{RowId, SectionId};
use crate::matching::row::normalize_row;

/// A single row of a canonical section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    /// Normalized row key (see [`normalize_row`])
    pub name: String,

    /// Row identifier from the manifest
    pub id: RowId,
}

/// A section of the venue manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSection {
    /// Trimmed, lower-cased section name; unique within a manifest
    pub key: String,

    /// Section identifier from the manifest
    pub section_id: SectionId,

    /// Rows in manifest order, or `None` for sections addressed by name alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<CanonicalRow>>,
}

impl CanonicalSection {
    /// Create a section without rows (a suite-style section)
    pub fn new(name: &str, section_id: SectionId) -> Self {
        Self {
            key: section_key(name),
            section_id,
            rows: None,
        }
    }

    /// Add rows to this section, normalizing each row name
    #[must_use]
    pub fn with_rows<'a>(mut self, rows: impl IntoIterator<Item = (&'a str, RowId)>) -> Self {
        for (name, id) in rows {
            self.insert_row(name, id);
        }
        self
    }

    /// Insert a row under its normalized name.
    ///
    /// A row whose normalized name is already present keeps its position and takes
    /// the new id. Returns the previous id in that case.
    pub fn insert_row(&mut self, name: &str, id: RowId) -> Option<RowId> {
        let name = normalize_row(name);
        let rows = self.rows.get_or_insert_with(Vec::new);

        if let Some(existing) = rows.iter_mut().find(|r| r.name == name) {
            return Some(std::mem::replace(&mut existing.id, id));
        }

        rows.push(CanonicalRow { name, id });
        None
    }

    /// Does this section carry a row mapping?
    pub fn has_rows(&self) -> bool {
        self.rows.as_ref().is_some_and(|rows| !rows.is_empty())
    }

    /// Number of rows (zero for suite sections)
    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }

    /// Iterate over rows in manifest order
    pub fn rows(&self) -> impl Iterator<Item = &CanonicalRow> {
        self.rows.iter().flatten()
    }
}

/// Normalize a section name into its manifest key
pub fn section_key(name: &str) -> String {
    name.trim().to_lowercase()
}
