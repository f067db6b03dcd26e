use crate::core::{OperationSpec, UploadedFile};
use crate::utils::ValidationError;

/// Validates a batch before any transform work is scheduled.
pub fn validate_batch(files: &[UploadedFile], operation: &OperationSpec) -> Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::NoFiles);
    }
    operation.validate()
}

/// Parses an integer form field, naming the field in the error.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid(field, format!("'{}' is not an integer", raw.trim())))
}

/// Parses a `true` / `false` form field (case-insensitive).
pub fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ValidationError::invalid(
            field,
            format!("expected 'true' or 'false', got '{other}'"),
        )),
    }
}
