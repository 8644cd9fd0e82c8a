use std::path::Path;

use tracing::trace;

use crate::core::sample::SampleRecord;
use crate::parsing::ParseError;

/// Parse a file of newline-delimited JSON sample records
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read.
pub fn parse_results_file(path: &Path) -> Result<Vec<SampleRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_results_text(&content))
}

/// Collect the sample records from newline-delimited JSON.
///
/// Normalizers are free to print other output; any line that is not a JSON object
/// with `input`, `expected` and `output` is ignored.
pub fn parse_results_text(text: &str) -> Vec<SampleRecord> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match serde_json::from_str::<SampleRecord>(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    trace!(line = i + 1, error = %e, "ignoring non-result line");
                    None
                }
            }
        })
        .collect()
}
