//! Field validation applied to entities after deserialization
//!
//! Serde already rejects unknown and missing fields; these checks cover the
//! constraints serde cannot express. Ids accept any `i32`; only the text
//! column widths are checked here.

use thiserror::Error;

/// Errors produced by field validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    #[error("{field} must be at most {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },
}

/// Validate a text column against its declared width (in characters)
pub fn validate_text(
    field: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), FieldValidationError> {
    if value.chars().count() > max_length {
        return Err(FieldValidationError::TooLong { field, max_length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_counts_characters() {
        assert!(validate_text("name", "", 10).is_ok());
        assert!(validate_text("name", "ñandú", 5).is_ok());
        assert!(matches!(
            validate_text("name", &"a".repeat(101), 100),
            Err(FieldValidationError::TooLong { max_length: 100, .. })
        ));
    }
}
