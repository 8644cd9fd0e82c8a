//! Centralized limits and request validation.

/// Maximum number of sections allowed in a single manifest (DOS protection)
pub const MAX_SECTIONS: usize = 100_000;

/// Maximum number of records read from a single samples file
pub const MAX_SAMPLES: usize = 1_000_000;

/// Longest acronym expanded into its ordered subsequences (`2^n - 1` members)
pub const MAX_SUBSEQUENCE_SOURCE_LEN: usize = 12;

/// Maximum length in bytes of a section or row in an HTTP request
pub const MAX_FIELD_LENGTH: usize = 256;

/// Maximum number of requests in one HTTP batch
pub const MAX_BATCH_SIZE: usize = 1_000;

/// Check if adding another section would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new section.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_section_limit(count: usize) -> Option<String> {
    if count >= MAX_SECTIONS {
        Some(format!(
            "Too many sections: adding another would exceed maximum of {MAX_SECTIONS}"
        ))
    } else {
        None
    }
}

/// Request validation error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field '{0}' exceeds {MAX_FIELD_LENGTH} bytes")]
    FieldTooLong(&'static str),
    #[error("Field '{0}' contains control characters")]
    ControlCharacters(&'static str),
    #[error("Batch of {0} requests exceeds maximum of {MAX_BATCH_SIZE}")]
    BatchTooLarge(usize),
    #[error("Batch is empty")]
    EmptyBatch,
}

/// Validate one free-text request field (section or row).
///
/// Tabs are allowed since ticket feeds often carry them; other control characters
/// are not.
///
/// # Errors
///
/// Returns `ValidationError::FieldTooLong` if the value exceeds
/// [`MAX_FIELD_LENGTH`], or `ValidationError::ControlCharacters` if it contains
/// control characters other than tab.
pub fn validate_field(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_FIELD_LENGTH {
        return Err(ValidationError::FieldTooLong(name));
    }
    if value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(ValidationError::ControlCharacters(name));
    }
    Ok(())
}

/// Validate the size of a batch request.
///
/// # Errors
///
/// Returns `ValidationError::EmptyBatch` for an empty batch or
/// `ValidationError::BatchTooLarge` if it exceeds [`MAX_BATCH_SIZE`].
pub fn validate_batch_size(len: usize) -> Result<(), ValidationError> {
    match len {
        0 => Err(ValidationError::EmptyBatch),
        n if n > MAX_BATCH_SIZE => Err(ValidationError::BatchTooLarge(n)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_section_limit() {
        assert!(check_section_limit(0).is_none());
        assert!(check_section_limit(MAX_SECTIONS - 1).is_none());
        assert!(check_section_limit(MAX_SECTIONS).is_some());
    }

    #[test]
    fn test_validate_field() {
        assert!(validate_field("section", "Infield Reserve IFR7\t").is_ok());
        assert_eq!(
            validate_field("row", &"a".repeat(MAX_FIELD_LENGTH + 1)),
            Err(ValidationError::FieldTooLong("row"))
        );
        assert_eq!(
            validate_field("section", "Suite\u{0}221"),
            Err(ValidationError::ControlCharacters("section"))
        );
    }

    #[test]
    fn test_validate_batch_size() {
        assert_eq!(validate_batch_size(0), Err(ValidationError::EmptyBatch));
        assert!(validate_batch_size(1).is_ok());
        assert!(validate_batch_size(MAX_BATCH_SIZE).is_ok());
        assert_eq!(
            validate_batch_size(MAX_BATCH_SIZE + 1),
            Err(ValidationError::BatchTooLarge(MAX_BATCH_SIZE + 1))
        );
    }
}
