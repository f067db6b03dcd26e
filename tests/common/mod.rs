#![allow(dead_code)]

use std::io::{Cursor, Read};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use libvips::{ops, VipsImage};
use tower::ServiceExt;
use zip::ZipArchive;

use image_converter::processing::libvips::runtime;
use image_converter::{AppState, Config, create_router};

const BOUNDARY: &str = "----image-converter-test-boundary";

pub fn router() -> Router {
    router_with(Config::default())
}

pub fn router_with(config: Config) -> Router {
    create_router(AppState::new(config).unwrap())
}

/// Gaussian noise, one 8-bit band.
pub fn noise(width: i32, height: i32) -> VipsImage {
    runtime::ensure_started(0).unwrap();
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

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct Form {
    body: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, name: &str, bytes: &[u8]) -> Self {
        self.file_field("files", name, bytes)
    }

    pub fn file_field(mut self, field: &str, name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (Response<()>, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap().to_vec();
    (Response::from_parts(parts, ()), bytes)
}

pub fn header_value(response: &Response<()>, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `(name, contents)` of every archive entry, in archive order.
pub fn unzip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

pub fn error_message(bytes: &[u8]) -> String {
    let body: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    body["error"].as_str().unwrap().to_string()
}
