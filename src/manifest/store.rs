use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::section::{section_key, CanonicalSection};
use crate::manifest::builder::ManifestBuilder;
use crate::parsing::manifest::{parse_manifest_file, parse_manifest_text};
use crate::parsing::ParseError;
use crate::utils::validation::MAX_SECTIONS;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] ParseError),

    #[error("Failed to parse manifest JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid manifest record on line {line}: missing section id or name")]
    MissingSection { line: usize },

    #[error("Duplicate section in manifest: '{0}'")]
    DuplicateSection(String),

    #[error("Section with empty name in manifest")]
    EmptySectionKey,

    #[error("Too many sections: {0} exceeds maximum allowed ({MAX_SECTIONS})")]
    TooManySections(usize),
}

/// Manifest snapshot format version
pub const MANIFEST_VERSION: &str = "1.0.0";

/// Serializable manifest snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestData {
    pub version: String,
    pub created_at: String,
    pub sections: Vec<CanonicalSection>,
}

/// The canonical section table for one venue.
///
/// Built once, then only read. Sections keep manifest order, which decides the
/// winner when a loose input matches more than one section.
#[derive(Debug, Clone, Default)]
pub struct ManifestTable {
    /// All sections in manifest order
    sections: Vec<CanonicalSection>,

    /// Index: section key -> index in sections vec
    key_to_index: HashMap<String, usize>,
}

impl ManifestTable {
    /// Create a table from sections, in order.
    ///
    /// Keys are normalized (trimmed, lower-cased) on the way in.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::DuplicateSection` if two sections share a key,
    /// `ManifestError::EmptySectionKey` for a blank key, or
    /// `ManifestError::TooManySections` past the section limit.
    pub fn from_sections(sections: Vec<CanonicalSection>) -> Result<Self, ManifestError> {
        if sections.len() > MAX_SECTIONS {
            return Err(ManifestError::TooManySections(sections.len()));
        }

        let mut table = Self {
            sections: Vec::with_capacity(sections.len()),
            key_to_index: HashMap::with_capacity(sections.len()),
        };

        for mut section in sections {
            section.key = section_key(&section.key);
            if section.key.is_empty() {
                return Err(ManifestError::EmptySectionKey);
            }
            if table.key_to_index.contains_key(&section.key) {
                return Err(ManifestError::DuplicateSection(section.key));
            }
            table
                .key_to_index
                .insert(section.key.clone(), table.sections.len());
            table.sections.push(section);
        }

        Ok(table)
    }

    /// Load a manifest file: `.json` snapshots, anything else as CSV
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any record is invalid.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            let content = std::fs::read_to_string(path)?;
            Self::from_json(&content)
        } else {
            let mut builder = ManifestBuilder::new();
            builder.add_records(parse_manifest_file(path)?)?;
            builder.build()
        }
    }

    /// Build a table from manifest CSV text
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed or any record is invalid.
    pub fn from_csv(text: &str) -> Result<Self, ManifestError> {
        let mut builder = ManifestBuilder::new();
        builder.add_records(parse_manifest_text(text)?)?;
        builder.build()
    }

    /// Parse a table from a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the sections are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let data: ManifestData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != MANIFEST_VERSION {
            warn!(
                expected = MANIFEST_VERSION,
                found = %data.version,
                "manifest version mismatch"
            );
        }

        Self::from_sections(data.sections)
    }

    /// Export the table as a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        let data = ManifestData {
            version: MANIFEST_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            sections: self.sections.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Get a section by its key (trimmed, lower-cased name)
    pub fn get(&self, key: &str) -> Option<&CanonicalSection> {
        self.key_to_index.get(key).map(|&idx| &self.sections[idx])
    }

    /// Is there a section with this key?
    pub fn contains(&self, key: &str) -> bool {
        self.key_to_index.contains_key(key)
    }

    /// All sections in manifest order
    pub fn sections(&self) -> &[CanonicalSection] {
        &self.sections
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of rows across all sections
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(CanonicalSection::row_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RowId, SectionId};

    const MANIFEST_CSV: &str = "section_id,section_name,row_id,row_name
5,Suite 221,,
7,Reserve 40,3,Row C
7,Reserve 40,4,D
12,136,1,1
";

    #[test]
    fn test_from_csv() {
        let table = ManifestTable::from_csv(MANIFEST_CSV).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.row_count(), 3);
        assert!(table.contains("suite 221"));
        assert!(!table.contains("Suite 221"));

        let keys: Vec<&str> = table.sections().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["suite 221", "reserve 40", "136"]);
    }

    #[test]
    fn test_from_csv_missing_section_name() {
        let csv = "section_id,section_name,row_id,row_name\n5,,1,A\n";
        let err = ManifestTable::from_csv(csv).unwrap_err();
        assert!(matches!(err, ManifestError::MissingSection { line: 2 }));
    }

    #[test]
    fn test_from_csv_bad_integer() {
        let csv = "section_id,section_name,row_id,row_name\n5,Box 1,one,A\n";
        let err = ManifestTable::from_csv(csv).unwrap_err();
        assert!(matches!(err, ManifestError::ParseError(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let table = ManifestTable::from_csv(MANIFEST_CSV).unwrap();
        let json = table.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"created_at\""));

        let reloaded = ManifestTable::from_json(&json).unwrap();
        assert_eq!(reloaded.sections(), table.sections());
    }

    #[test]
    fn test_duplicate_sections_rejected() {
        let result = ManifestTable::from_sections(vec![
            CanonicalSection::new("Box 1", SectionId(1)),
            CanonicalSection::new("BOX 1 ", SectionId(2)),
        ]);
        assert!(matches!(result, Err(ManifestError::DuplicateSection(key)) if key == "box 1"));
    }

    #[test]
    fn test_from_sections_normalizes_keys() {
        let mut section = CanonicalSection::new("x", SectionId(1)).with_rows([("A", RowId(1))]);
        section.key = "  Field Box 6 ".to_string();

        let table = ManifestTable::from_sections(vec![section]).unwrap();
        assert!(table.get("field box 6").is_some());
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut section = CanonicalSection::new("x", SectionId(1));
        section.key = "   ".to_string();
        assert!(matches!(
            ManifestTable::from_sections(vec![section]),
            Err(ManifestError::EmptySectionKey)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("manifest.csv");
        std::fs::write(&csv_path, MANIFEST_CSV).unwrap();
        let table = ManifestTable::load(&csv_path).unwrap();
        assert_eq!(table.len(), 3);

        let json_path = dir.path().join("manifest.json");
        std::fs::write(&json_path, table.to_json().unwrap()).unwrap();
        let from_json = ManifestTable::load(&json_path).unwrap();
        assert_eq!(from_json.sections(), table.sections());
    }
}
