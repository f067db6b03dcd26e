//! Image processing pipeline: per-file transforms, batching and archiving.

pub mod archive;
pub mod batch;
pub mod libvips;

pub use archive::ArchiveBuilder;
pub use batch::{BatchConfig, BatchProcessor};
