// src/processing/libvips/executor.rs

//! Per-file transform on top of libvips.
//!
//! Everything here is synchronous and CPU bound. Callers run it inside
//! `tokio::task::spawn_blocking`; `VipsImage` values never cross threads.

use std::str::FromStr;

use libvips::VipsImage;
use tracing::debug;

use crate::core::{OperationSpec, TransformResult, UploadedFile};
use crate::utils::{names, ImageFormat, TransformError};

use super::formats::{save_image_as, save_jpeg};
use super::resize::apply_resize;

type Result<T> = std::result::Result<T, TransformError>;

/// Applies `operation` to one uploaded file and names the output.
pub fn apply(file: &UploadedFile, operation: &OperationSpec) -> Result<TransformResult> {
    let name = file.name.as_str();

    let image = VipsImage::new_from_buffer(&file.bytes, "")
        .map_err(|e| TransformError::decode(name, e))?;

    debug!(
        "Loaded '{}': {}×{} ({} bytes)",
        name,
        image.get_width(),
        image.get_height(),
        file.bytes.len()
    );

    let result = match operation {
        OperationSpec::Convert { target, extension } => TransformResult {
            name: names::converted_name(name, extension),
            bytes: save_image_as(&image, name, *target, None)?,
        },
        OperationSpec::Resize {
            width,
            height,
            preserve_aspect_ratio,
        } => {
            let native = native_format(file)?;
            let resized = apply_resize(&image, name, *width, *height, *preserve_aspect_ratio)?;
            debug!(
                "Resized '{}' to {}×{}",
                name,
                resized.get_width(),
                resized.get_height()
            );
            let extension = names::original_extension(name)
                .unwrap_or_else(|| native.primary_extension());
            TransformResult {
                name: names::resized_name(name, extension),
                bytes: save_image_as(&resized, name, native, None)?,
            }
        }
        OperationSpec::Compress { quality } => TransformResult {
            name: names::compressed_name(name),
            bytes: save_jpeg(&image, name, *quality)?,
        },
    };

    debug!(
        "'{}' → '{}' ({} → {} bytes)",
        name,
        result.name,
        file.bytes.len(),
        result.bytes.len()
    );

    Ok(result)
}

/// The format a resized file is written back in.
///
/// The content decides first; the declared extension is the fallback for
/// containers the sniffer does not recognise.
fn native_format(file: &UploadedFile) -> Result<ImageFormat> {
    if let Some(format) = ImageFormat::sniff(&file.bytes) {
        return Ok(format);
    }

    names::original_extension(&file.name)
        .and_then(|ext| ImageFormat::from_str(ext).ok())
        .ok_or_else(|| {
            TransformError::unsupported(&file.name, "cannot write the input's format back")
        })
}
