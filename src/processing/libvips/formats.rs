// src/processing/libvips/formats.rs

//! Maps an output format and quality to libvips buffer save operations.
//!
//! Every encoder writes to memory; nothing touches the filesystem.

use libvips::ops::{
    self,
    ForeignHeifCompression, ForeignKeep, ForeignSubsample, ForeignTiffCompression,
    ForeignTiffPredictor,
};
use libvips::VipsImage;

use crate::utils::{ImageFormat, TransformError};

type Result<T> = std::result::Result<T, TransformError>;

const PNG_COMPRESSION: i32 = 7; // 0-9 zlib level
const PNG_EFFORT: i32 = 4;
const WEBP_EFFORT: i32 = 4;
const AVIF_EFFORT: i32 = 2;
const LOSSLESS_QUALITY: u8 = 100;

/// Encodes `image` as JPEG.
///
/// At quality 100 trellis quantisation and overshoot deringing are enabled
/// for near-lossless output; otherwise a standard optimised JPEG is written.
pub fn save_jpeg(image: &VipsImage, file: &str, quality: u8) -> Result<Vec<u8>> {
    let lossless = quality == LOSSLESS_QUALITY;

    let opts = ops::JpegsaveBufferOptions {
        q: i32::from(quality),
        optimize_coding: true,
        optimize_scans: true,
        trellis_quant: lossless,
        overshoot_deringing: lossless,
        // quant_table 3 = mozjpeg quantisation table
        quant_table: 3,
        subsample_mode: ForeignSubsample::On, // 4:2:0 chroma subsampling
        keep: ForeignKeep::None,              // strip metadata
        ..ops::JpegsaveBufferOptions::default()
    };

    ops::jpegsave_buffer_with_opts(image, &opts)
        .map_err(|e| TransformError::encode(file, "jpeg", e))
}

/// Encodes `image` as PNG, palette-quantised below quality 100.
pub fn save_png(image: &VipsImage, file: &str, quality: u8) -> Result<Vec<u8>> {
    let opts = ops::PngsaveBufferOptions {
        compression: PNG_COMPRESSION,
        palette: quality < LOSSLESS_QUALITY,
        q: i32::from(quality),
        effort: PNG_EFFORT,
        keep: ForeignKeep::None,
        ..ops::PngsaveBufferOptions::default()
    };

    ops::pngsave_buffer_with_opts(image, &opts)
        .map_err(|e| TransformError::encode(file, "png", e))
}

/// Encodes `image` as WebP, lossless at quality 100.
pub fn save_webp(image: &VipsImage, file: &str, quality: u8) -> Result<Vec<u8>> {
    let q = i32::from(quality);

    let opts = ops::WebpsaveBufferOptions {
        q,
        lossless: quality == LOSSLESS_QUALITY,
        alpha_q: q,
        effort: WEBP_EFFORT,
        smart_subsample: false,
        keep: ForeignKeep::None,
        ..ops::WebpsaveBufferOptions::default()
    };

    ops::webpsave_buffer_with_opts(image, &opts)
        .map_err(|e| TransformError::encode(file, "webp", e))
}

/// Encodes `image` as AVIF (AV1 in a HEIF container).
pub fn save_avif(image: &VipsImage, file: &str, quality: u8) -> Result<Vec<u8>> {
    let opts = ops::HeifsaveBufferOptions {
        q: i32::from(quality),
        lossless: quality == LOSSLESS_QUALITY,
        compression: ForeignHeifCompression::Av1,
        effort: AVIF_EFFORT,
        subsample_mode: ForeignSubsample::On,
        keep: ForeignKeep::None,
        ..ops::HeifsaveBufferOptions::default()
    };

    ops::heifsave_buffer_with_opts(image, &opts)
        .map_err(|e| TransformError::encode(file, "avif", e))
}

/// Encodes `image` as TIFF with deflate compression.
pub fn save_tiff(image: &VipsImage, file: &str, quality: u8) -> Result<Vec<u8>> {
    let opts = ops::TiffsaveBufferOptions {
        compression: ForeignTiffCompression::Deflate,
        predictor: ForeignTiffPredictor::Horizontal,
        q: i32::from(quality),
        keep: ForeignKeep::None,
        ..ops::TiffsaveBufferOptions::default()
    };

    ops::tiffsave_buffer_with_opts(image, &opts)
        .map_err(|e| TransformError::encode(file, "tiff", e))
}

/// Dispatches to the encoder for `format`.
///
/// `quality` defaults to the format's own default when `None`.
pub fn save_image_as(
    image: &VipsImage,
    file: &str,
    format: ImageFormat,
    quality: Option<u8>,
) -> Result<Vec<u8>> {
    let quality = quality.unwrap_or_else(|| format.default_quality());
    match format {
        ImageFormat::JPEG => save_jpeg(image, file, quality),
        ImageFormat::PNG => save_png(image, file, quality),
        ImageFormat::WebP => save_webp(image, file, quality),
        ImageFormat::AVIF => save_avif(image, file, quality),
        ImageFormat::TIFF => save_tiff(image, file, quality),
    }
}
