//! Error types for the image converter.
//!
//! Provides a hierarchy of error types using `thiserror`. Validation errors
//! carry messages that are safe to show to clients; transform and archive
//! errors carry causes that are only ever logged.

use thiserror::Error;

/// Request or operation validation errors.
///
/// Detected before any transform work starts. The `Display` text is returned
/// to the client verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The batch contains no files
    #[error("At least one file is required")]
    NoFiles,
    /// A required form field was not sent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// A form field was sent but could not be accepted
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    /// The request body could not be decoded
    #[error("Malformed request: {0}")]
    Malformed(String),
}

/// Per-file transform failures.
///
/// Each variant names the file it happened on so the log line is enough to
/// reproduce the failure.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The codec could not read the input bytes
    #[error("Failed to decode '{file}': {message}")]
    Decode { file: String, message: String },
    /// The codec could not write the requested output
    #[error("Failed to encode '{file}' as {format}: {message}")]
    Encode {
        file: String,
        format: String,
        message: String,
    },
    /// Resizing failed inside the codec
    #[error("Failed to resize '{file}': {message}")]
    Resize { file: String, message: String },
    /// The input is in a format the service cannot write back
    #[error("Unsupported image format for '{file}': {message}")]
    UnsupportedFormat { file: String, message: String },
    /// The transform ran longer than the configured per-file timeout
    #[error("Transform of '{file}' timed out after {secs}s")]
    TimedOut { file: String, secs: u64 },
    /// The blocking task running the transform panicked or was cancelled
    #[error("Transform of '{file}' did not complete: {message}")]
    Aborted { file: String, message: String },
}

/// Archive serialization errors.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The zip writer rejected an entry or failed to finish
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// Writing entry bytes failed
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

/// Main error type for the converter.
///
/// All errors in the pipeline are converted to this type before they reach
/// the HTTP layer.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// Request or operation validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image processing failed for one file of the batch
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// The output archive could not be written
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Worker pool failure (closed semaphore, lost task)
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration could not be parsed or is out of range
    #[error("Config error: {0}")]
    Config(String),

    /// Codec runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

impl ConverterError {
    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn runtime<T: Into<String>>(msg: T) -> Self {
        Self::Runtime(msg.into())
    }

    /// Whether the failure is the client's fault (HTTP 400) rather than ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl TransformError {
    pub fn decode(file: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            file: file.to_string(),
            message: err.to_string(),
        }
    }

    pub fn encode(file: &str, format: &str, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            file: file.to_string(),
            format: format.to_string(),
            message: err.to_string(),
        }
    }

    pub fn resize(file: &str, err: impl std::fmt::Display) -> Self {
        Self::Resize {
            file: file.to_string(),
            message: err.to_string(),
        }
    }

    pub fn unsupported(file: &str, msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file: file.to_string(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_client_readable() {
        assert_eq!(
            ValidationError::MissingField("quality").to_string(),
            "Missing required field: quality"
        );
        assert_eq!(
            ValidationError::invalid("width", "must be a positive integer").to_string(),
            "Invalid width: must be a positive integer"
        );
    }

    #[test]
    fn only_validation_is_a_client_error() {
        let err: ConverterError = ValidationError::NoFiles.into();
        assert!(err.is_client_error());

        let err: ConverterError = TransformError::decode("a.png", "not an image").into();
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("a.png"));

        assert!(!ConverterError::worker("closed").is_client_error());
    }
}
