use std::path::Path;

use crate::core::types::{RowId, SectionId};
use crate::manifest::builder::ManifestRecord;
use crate::parsing::{parse_optional_integer, split_fields, ParseError};

/// Expected manifest columns, in order
pub const MANIFEST_COLUMNS: [&str; 4] = ["section_id", "section_name", "row_id", "row_name"];

/// Parse a manifest CSV file into records
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_manifest_file(path: &Path) -> Result<Vec<ManifestRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest_text(&content)
}

/// Parse manifest CSV text into records.
///
/// The first non-empty line is a header and is skipped. Each following line holds
/// `section_id,section_name,row_id,row_name`; trailing row columns may be left off.
/// A quoted field must be closed on the line it starts on.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 2 or more than 4
/// fields or an unterminated quote, or `ParseError::InvalidInteger` if an id is
/// not an integer.
pub fn parse_manifest_text(text: &str) -> Result<Vec<ManifestRecord>, ParseError> {
    let mut records = Vec::new();
    let mut header_seen = false;

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields = split_fields(line, ',', line_num)?;

        if fields.len() < 2 || fields.len() > MANIFEST_COLUMNS.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                fields.len(),
                MANIFEST_COLUMNS.len()
            )));
        }

        let field = |idx: usize| fields.get(idx).map_or("", String::as_str);
        let name_at = |idx: usize| {
            Some(field(idx).trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        records.push(ManifestRecord {
            line: line_num,
            section_id: parse_optional_integer(field(0), line_num)?.map(SectionId),
            section_name: name_at(1),
            row_id: parse_optional_integer(field(2), line_num)?.map(RowId),
            row_name: name_at(3),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_text() {
        let csv = "section_id,section_name,row_id,row_name
5,Suite 221,,
7,Reserve 40,3,Row C
7,Reserve 40,4,D
";
        let records = parse_manifest_text(csv).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].section_id, Some(SectionId(5)));
        assert_eq!(records[0].section_name.as_deref(), Some("Suite 221"));
        assert_eq!(records[0].row_id, None);
        assert_eq!(records[0].row_name, None);

        assert_eq!(records[1].row_id, Some(RowId(3)));
        assert_eq!(records[1].row_name.as_deref(), Some("Row C"));
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_parse_manifest_short_lines_and_blanks() {
        let csv = "\nsection_id,section_name,row_id,row_name\n\n5,Suite 221\n";
        let records = parse_manifest_text(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].row_name, None);
    }

    #[test]
    fn test_parse_manifest_invalid_id() {
        let csv = "section_id,section_name,row_id,row_name\nfive,Suite 221,,\n";
        let err = parse_manifest_text(csv).unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger { line: 2, .. }));
    }

    #[test]
    fn test_parse_manifest_too_many_fields() {
        let csv = "section_id,section_name,row_id,row_name\n1,Box,2,A,extra\n";
        assert!(matches!(
            parse_manifest_text(csv),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_manifest_quoted_line_break_is_rejected() {
        let csv = "section_id,section_name,row_id,row_name\n7,\"Reserve\n40\",3,C\n";
        let err = parse_manifest_text(csv).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("Line 2")));
    }
}
