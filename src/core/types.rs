//! Core request-scoped types: uploaded files, operations and their results.

use std::fmt;

use crate::utils::{ImageFormat, ValidationError};

/// One file part of a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Name the client declared for the file
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

// Keep multi-megabyte buffers out of debug logs.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What to do to every file of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationSpec {
    /// Re-encode into `target`; `extension` is the format string as requested
    Convert {
        target: ImageFormat,
        extension: String,
    },
    /// Resize to `width`×`height`, or to fit inside that box
    Resize {
        width: u32,
        height: u32,
        preserve_aspect_ratio: bool,
    },
    /// Re-encode as JPEG at `quality` (1 = smallest, 100 = best)
    Compress { quality: u8 },
}

impl OperationSpec {
    pub const MIN_QUALITY: i64 = 1;
    pub const MAX_QUALITY: i64 = 100;

    /// Builds a convert operation from the requested format string.
    pub fn convert(format: &str) -> Result<Self, ValidationError> {
        let extension = format.trim().to_lowercase();
        if extension.is_empty() {
            return Err(ValidationError::MissingField("format"));
        }
        let target = extension.parse::<ImageFormat>()?;
        Ok(Self::Convert { target, extension })
    }

    /// Builds a resize operation; both dimensions must be positive.
    pub fn resize(width: i64, height: i64, preserve_aspect_ratio: bool) -> Result<Self, ValidationError> {
        Ok(Self::Resize {
            width: positive_dimension("width", width)?,
            height: positive_dimension("height", height)?,
            preserve_aspect_ratio,
        })
    }

    /// Builds a compress operation; quality outside 1..=100 is rejected, never clamped.
    pub fn compress(quality: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN_QUALITY..=Self::MAX_QUALITY).contains(&quality) {
            return Err(ValidationError::invalid(
                "quality",
                format!("must be between 1 and 100, got {quality}"),
            ));
        }
        Ok(Self::Compress {
            quality: quality as u8,
        })
    }

    /// Re-checks the invariants of a value built without the constructors.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Convert { extension, .. } if extension.is_empty() => {
                Err(ValidationError::MissingField("format"))
            }
            Self::Convert { .. } => Ok(()),
            Self::Resize { width, height, .. } => {
                positive_dimension("width", i64::from(*width))?;
                positive_dimension("height", i64::from(*height))?;
                Ok(())
            }
            Self::Compress { quality } => Self::compress(i64::from(*quality)).map(|_| ()),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Convert { .. } => OperationKind::Convert,
            Self::Resize { .. } => OperationKind::Resize,
            Self::Compress { .. } => OperationKind::Compress,
        }
    }
}

fn positive_dimension(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::invalid(field, "must be a positive integer"));
    }
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= i32::MAX as u32)
        .ok_or_else(|| ValidationError::invalid(field, "is too large"))
}

/// The operation without its parameters, used for naming and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Convert,
    Resize,
    Compress,
}

impl OperationKind {
    /// File name of the archive sent back to the client.
    pub fn archive_name(&self) -> &'static str {
        match self {
            Self::Convert => "converted-images.zip",
            Self::Resize => "resized-images.zip",
            Self::Compress => "compressed-images.zip",
        }
    }

    /// Generic message returned on any server-side failure.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Convert => "Error converting images",
            Self::Resize => "Error resizing images",
            Self::Compress => "Error compressing images",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Convert => "convert",
            Self::Resize => "resize",
            Self::Compress => "compress",
        };
        f.write_str(name)
    }
}

/// Output of one transformed file.
#[derive(Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// Entry name inside the archive
    pub name: String,
    /// Encoded output image
    pub bytes: Vec<u8>,
}

impl fmt::Debug for TransformResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformResult")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_bounds_are_rejected_not_clamped() {
        assert!(OperationSpec::compress(0).is_err());
        assert!(OperationSpec::compress(101).is_err());
        assert!(OperationSpec::compress(-5).is_err());
        assert_eq!(
            OperationSpec::compress(1).unwrap(),
            OperationSpec::Compress { quality: 1 }
        );
        assert_eq!(
            OperationSpec::compress(100).unwrap(),
            OperationSpec::Compress { quality: 100 }
        );
    }

    #[test]
    fn resize_dimensions_must_be_positive() {
        assert!(OperationSpec::resize(0, 10, false).is_err());
        assert!(OperationSpec::resize(10, -1, true).is_err());
        assert!(OperationSpec::resize(i64::from(u32::MAX), 10, true).is_err());
        let op = OperationSpec::resize(100, 50, true).unwrap();
        assert_eq!(op.kind(), OperationKind::Resize);
        assert!(op.validate().is_ok());
    }

    #[test]
    fn convert_keeps_requested_extension() {
        let op = OperationSpec::convert("JPG").unwrap();
        assert_eq!(
            op,
            OperationSpec::Convert {
                target: ImageFormat::JPEG,
                extension: "jpg".to_string(),
            }
        );
        assert_eq!(
            OperationSpec::convert("  "),
            Err(ValidationError::MissingField("format"))
        );
        assert!(OperationSpec::convert("bmp").is_err());
    }

    #[test]
    fn validate_catches_hand_built_values() {
        let op = OperationSpec::Resize {
            width: 0,
            height: 10,
            preserve_aspect_ratio: false,
        };
        assert!(op.validate().is_err());
        assert!(OperationSpec::Compress { quality: 0 }.validate().is_err());
        assert!(OperationSpec::Compress { quality: 101 }.validate().is_err());
    }

    #[test]
    fn archive_names_per_operation() {
        assert_eq!(OperationKind::Convert.archive_name(), "converted-images.zip");
        assert_eq!(OperationKind::Resize.archive_name(), "resized-images.zip");
        assert_eq!(OperationKind::Compress.archive_name(), "compressed-images.zip");
    }

    #[test]
    fn debug_hides_payload() {
        let file = UploadedFile::new("a.png", vec![0u8; 4096]);
        let dbg = format!("{file:?}");
        assert!(dbg.contains("a.png"));
        assert!(dbg.contains("4096"));
    }
}
