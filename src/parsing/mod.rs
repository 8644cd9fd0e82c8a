//! Parsers for manifest, sample and result files.
//!
//! This module provides parsers for:
//!
//! - **Manifest CSV files**: `section_id,section_name,row_id,row_name` records
//! - **Sample CSV files**: inputs with expected answers, used for batch runs and grading
//! - **Result streams**: newline-delimited JSON sample records written by a batch run
//!
//! ## Example
//!
//! ```rust
//! use section_normalizer::parsing::manifest::parse_manifest_text;
//!
//! let csv = "section_id,section_name,row_id,row_name\n5,Suite 221,,\n7,Reserve 40,3,Row C\n";
//! let records = parse_manifest_text(csv).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].row_name.as_deref(), Some("Row C"));
//! ```
//!
//! ## Sample Columns
//!
//! | Column         | Description                         | Required |
//! |----------------|-------------------------------------|----------|
//! | section        | Raw section text                    | Yes      |
//! | row            | Raw row text, may be empty          | Yes      |
//! | n_section_id   | Expected section id, may be empty   | Yes      |
//! | n_row_id       | Expected row id, may be empty       | Yes      |
//! | valid          | Expected validity (`true`/`false`/`1`/`0`) | Yes |

use thiserror::Error;

pub mod manifest;
pub mod results;
pub mod samples;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid integer on line {line}: '{value}'")]
    InvalidInteger { line: usize, value: String },

    #[error("Invalid boolean on line {line}: '{value}'")]
    InvalidBoolean { line: usize, value: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Too many records: {0} exceeds maximum allowed")]
    TooManyRecords(usize),
}

/// Split one CSV line into fields.
///
/// Fields may be wrapped in double quotes, in which case they can contain the
/// delimiter and `""` stands for a literal quote. Records are one per line, so a
/// quoted field cannot contain a line break.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a quoted field is not closed on the same
/// line.
pub(crate) fn split_fields(
    line: &str,
    delimiter: char,
    line_num: usize,
) -> Result<Vec<String>, ParseError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '"' if field.is_empty() => quoted = true,
            c if c == delimiter && !quoted => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    if quoted {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has an unterminated quoted field"
        )));
    }
    fields.push(field);

    Ok(fields)
}

/// Parse an optional integer id; empty text means no id
pub(crate) fn parse_optional_integer(value: &str, line: usize) -> Result<Option<i64>, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ParseError::InvalidInteger {
            line,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_fields() {
        assert_eq!(
            split_fields("5,Suite 221,,", ',', 1).unwrap(),
            vec!["5", "Suite 221", "", ""]
        );
    }

    #[test]
    fn test_split_quoted_fields() {
        assert_eq!(
            split_fields(r#"1,"Box, Upper",2,"Row ""A""""#, ',', 1).unwrap(),
            vec!["1", "Box, Upper", "2", r#"Row "A""#]
        );
    }

    #[test]
    fn test_split_unterminated_quote() {
        let err = split_fields("7,\"Reserve", ',', 4).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("Line 4")));
    }

    #[test]
    fn test_parse_optional_integer() {
        assert_eq!(parse_optional_integer(" 42 ", 1).unwrap(), Some(42));
        assert_eq!(parse_optional_integer("", 1).unwrap(), None);
        assert!(matches!(
            parse_optional_integer("4x", 3),
            Err(ParseError::InvalidInteger { line: 3, .. })
        ));
    }
}
