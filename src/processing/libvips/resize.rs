// src/processing/libvips/resize.rs

//! Resize logic mapping the resize operation to libvips thumbnailing.

use libvips::{ops, VipsImage};

use crate::utils::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

/// Resizes `image` to the `width`×`height` box.
///
/// With `preserve_aspect_ratio` the image is scaled, up or down, until it
/// fits inside the box without cropping. Without it the image is stretched
/// to exactly `width`×`height`.
pub fn apply_resize(
    image: &VipsImage,
    file: &str,
    width: u32,
    height: u32,
    preserve_aspect_ratio: bool,
) -> Result<VipsImage> {
    use ops::{Size, ThumbnailImageOptions};

    let opts = ThumbnailImageOptions {
        height: height as i32,
        size: if preserve_aspect_ratio { Size::Both } else { Size::Force },
        ..ThumbnailImageOptions::default()
    };

    ops::thumbnail_image_with_opts(image, width as i32, &opts)
        .map_err(|e| TransformError::resize(file, e))
}
