//! Batch image conversion service.
//!
//! Accepts multipart uploads, converts, resizes or compresses every file with
//! libvips and streams the results back as one zip archive.

// Module declarations in dependency order
pub mod utils;
pub mod config;
pub mod core;
pub mod worker;
pub mod processing;
pub mod api;

// Public exports for external consumers
pub use config::Config;
pub use core::{AppState, OperationKind, OperationSpec, TransformResult, UploadedFile};
pub use utils::{ConverterError, ConverterResult, ImageFormat};
pub use api::create_router;
