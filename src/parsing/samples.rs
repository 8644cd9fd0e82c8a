use std::path::Path;

use crate::core::sample::SampleRecord;
use crate::core::types::{RowId, SectionId};
use crate::parsing::{parse_optional_integer, split_fields, ParseError};
use crate::utils::validation::MAX_SAMPLES;

/// Parse a samples CSV file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_samples_file(path: &Path) -> Result<Vec<SampleRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_samples_text(&content)
}

/// Column positions found in the header line
struct Columns {
    section: usize,
    row: usize,
    section_id: usize,
    row_id: usize,
    valid: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ParseError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            section: find("section")?,
            row: find("row")?,
            section_id: find("n_section_id")?,
            row_id: find("n_row_id")?,
            valid: find("valid")?,
        })
    }
}

/// Parse samples CSV text.
///
/// The first non-empty line names the columns `section`, `row`, `n_section_id`,
/// `n_row_id` and `valid`, in any order. Section and row text is kept verbatim.
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if the header lacks a column,
/// `ParseError::InvalidFormat` for short lines, `ParseError::InvalidInteger` or
/// `ParseError::InvalidBoolean` for bad expected values, or
/// `ParseError::TooManyRecords` past the sample limit.
pub fn parse_samples_text(text: &str) -> Result<Vec<SampleRecord>, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_idx, header)) = lines.next() else {
        return Err(ParseError::InvalidFormat("No header line found".to_string()));
    };
    let columns = Columns::from_header(&split_fields(header, ',', header_idx + 1)?)?;
    let width = [
        columns.section,
        columns.row,
        columns.section_id,
        columns.row_id,
        columns.valid,
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
        + 1;

    let mut samples = Vec::new();
    for (i, line) in lines {
        let line_num = i + 1;
        let fields = split_fields(line, ',', line_num)?;
        if fields.len() < width {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected at least {width}",
                fields.len()
            )));
        }

        if samples.len() >= MAX_SAMPLES {
            return Err(ParseError::TooManyRecords(samples.len()));
        }

        samples.push(SampleRecord::new(
            fields[columns.section].as_str(),
            fields[columns.row].as_str(),
            parse_optional_integer(&fields[columns.section_id], line_num)?.map(SectionId),
            parse_optional_integer(&fields[columns.row_id], line_num)?.map(RowId),
            parse_bool(&fields[columns.valid], line_num)?,
        ));
    }

    Ok(samples)
}

/// Parse a boolean: integers are true when non-zero, otherwise the first letter
/// decides (`t`/`T` or `f`/`F`).
///
/// # Errors
///
/// Returns `ParseError::InvalidBoolean` for anything else.
pub fn parse_bool(value: &str, line: usize) -> Result<bool, ParseError> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n != 0);
    }
    match value.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('t') => Ok(true),
        Some('f') => Ok(false),
        _ => Err(ParseError::InvalidBoolean {
            line,
            value: value.to_string(),
        }),
    }
}
