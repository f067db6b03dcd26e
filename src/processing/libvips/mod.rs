// src/processing/libvips/mod.rs

//! Native image processing via libvips-rs.
//!
//! # Architecture
//!
//! - [`runtime`]: One-time, process-wide libvips initialisation.
//! - [`apply`]: Decodes one upload, applies the operation, re-encodes it.
//! - [`resize`]: Maps the resize operation to `ops::thumbnail_image_with_opts`.
//! - [`formats`]: Maps an output format and quality to `ops::*save_buffer_with_opts`.

mod executor;
mod formats;
mod resize;
pub mod runtime;

#[cfg(test)]
pub(crate) mod fixtures;

pub use executor::apply;
