use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::section::{section_key, CanonicalSection};
use crate::core::types::{RowId, SectionId};
use crate::manifest::store::{ManifestError, ManifestTable};
use crate::utils::validation::check_section_limit;

/// One manifest line: a section, optionally with one of its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    /// 1-based source line, for error messages
    pub line: usize,
    pub section_id: Option<SectionId>,
    pub section_name: Option<String>,
    pub row_id: Option<RowId>,
    pub row_name: Option<String>,
}

impl ManifestRecord {
    /// Record for a section addressed without rows
    pub fn suite(line: usize, section_id: i64, section_name: &str) -> Self {
        Self {
            line,
            section_id: Some(SectionId(section_id)),
            section_name: Some(section_name.to_string()),
            row_id: None,
            row_name: None,
        }
    }

    /// Record adding a row to a section
    pub fn row(
        line: usize,
        section_id: i64,
        section_name: &str,
        row_id: i64,
        row_name: &str,
    ) -> Self {
        Self {
            line,
            section_id: Some(SectionId(section_id)),
            section_name: Some(section_name.to_string()),
            row_id: Some(RowId(row_id)),
            row_name: Some(row_name.to_string()),
        }
    }
}

/// Accumulates manifest records into a [`ManifestTable`].
///
/// Loading rules:
///
/// - Every record needs a section id and a non-blank section name.
/// - A record without row fields declares a section addressed by name alone. If the
///   key was already declared, the section keeps its position but takes the new
///   section id and drops any rows loaded so far.
/// - A record with both row id and row name adds that row to its section, creating
///   the section if needed. The first section id seen for a key is kept.
/// - A record with only one of the two row fields is skipped.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    sections: Vec<CanonicalSection>,
    key_to_index: HashMap<String, usize>,
    skipped: usize,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one record
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MissingSection` if the record has no section id or
    /// name, or `ManifestError::TooManySections` if the section limit is reached.
    pub fn add_record(&mut self, record: ManifestRecord) -> Result<(), ManifestError> {
        let line = record.line;
        let (Some(section_id), Some(name)) = (record.section_id, record.section_name.as_deref())
        else {
            return Err(ManifestError::MissingSection { line });
        };

        let key = section_key(name);
        if key.is_empty() {
            return Err(ManifestError::MissingSection { line });
        }

        match (record.row_id, record.row_name.as_deref()) {
            (None, None) => {
                if let Some(&idx) = self.key_to_index.get(&key) {
                    let section = &mut self.sections[idx];
                    debug!(
                        line,
                        section = %key,
                        dropped_rows = section.row_count(),
                        "section redeclared without rows"
                    );
                    section.section_id = section_id;
                    section.rows = None;
                } else {
                    self.push_section(CanonicalSection::new(&key, section_id))?;
                }
            }
            (Some(row_id), Some(row_name)) => {
                let idx = match self.key_to_index.get(&key) {
                    Some(&idx) => idx,
                    None => self.push_section(CanonicalSection::new(&key, section_id))?,
                };
                let section = &mut self.sections[idx];

                if section.section_id != section_id {
                    warn!(
                        line,
                        section = %key,
                        kept = %section.section_id,
                        ignored = %section_id,
                        "conflicting section id"
                    );
                }
                if let Some(previous) = section.insert_row(row_name, row_id) {
                    debug!(line, section = %key, row = row_name, %previous, "row id replaced");
                }
            }
            _ => {
                warn!(line, section = %key, "record has only one of row id and row name, skipping");
                self.skipped += 1;
            }
        }

        Ok(())
    }

    /// Apply every record in order
    ///
    /// # Errors
    ///
    /// Stops at the first record that fails [`add_record`](Self::add_record).
    pub fn add_records(
        &mut self,
        records: impl IntoIterator<Item = ManifestRecord>,
    ) -> Result<(), ManifestError> {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Number of records skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Finish building
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ManifestTable::from_sections`].
    pub fn build(self) -> Result<ManifestTable, ManifestError> {
        debug!(
            sections = self.sections.len(),
            skipped = self.skipped,
            "manifest built"
        );
        ManifestTable::from_sections(self.sections)
    }

    fn push_section(&mut self, section: CanonicalSection) -> Result<usize, ManifestError> {
        if check_section_limit(self.sections.len()).is_some() {
            return Err(ManifestError::TooManySections(self.sections.len()));
        }
        let idx = self.sections.len();
        self.key_to_index.insert(section.key.clone(), idx);
        self.sections.push(section);
        Ok(idx)
    }
}
