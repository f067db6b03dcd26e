pub mod error;
pub mod formats;
pub mod names;
pub mod validation;

pub use error::{ArchiveError, ConverterError, ConverterResult, TransformError, ValidationError};
pub use formats::ImageFormat;
pub use validation::{parse_flag, parse_integer, validate_batch};
