//! In-memory test images generated with libvips.

use libvips::{ops, VipsImage};

use super::runtime;

pub fn start() {
    runtime::ensure_started(0).unwrap();
}

/// Gaussian noise, one 8-bit band; compresses badly, like a photo.
pub fn noise(width: i32, height: i32) -> VipsImage {
    start();
    let opts = ops::GaussnoiseOptions {
        sigma: 40.0,
        mean: 128.0,
        ..ops::GaussnoiseOptions::default()
    };
    let noise = ops::gaussnoise_with_opts(width, height, &opts).unwrap();
    ops::cast(&noise, ops::BandFormat::Uchar).unwrap()
}

pub fn png(width: i32, height: i32) -> Vec<u8> {
    ops::pngsave_buffer(&noise(width, height)).unwrap()
}

pub fn jpeg(width: i32, height: i32) -> Vec<u8> {
    ops::jpegsave_buffer(&noise(width, height)).unwrap()
}

pub fn dimensions(bytes: &[u8]) -> (i32, i32) {
    let image = VipsImage::new_from_buffer(bytes, "").unwrap();
    (image.get_width(), image.get_height())
}
