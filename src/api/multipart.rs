//! Decoding of the `multipart/form-data` batch upload.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use tracing::debug;

use crate::core::UploadedFile;
use crate::utils::ValidationError;
use crate::utils::names::UNNAMED_FILE;

use super::errors::ApiError;

/// Field carrying the uploaded files; browsers may append `[]`.
pub const FILES_FIELD: &str = "files";
const FILES_FIELD_ARRAY: &str = "files[]";

/// A fully read upload: file parts plus the scalar fields.
#[derive(Debug, Default)]
pub struct BatchForm {
    files: Vec<UploadedFile>,
    fields: HashMap<String, String>,
}

impl BatchForm {
    /// Reads every part of the request body.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                FILES_FIELD | FILES_FIELD_ARRAY => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    // An empty file input still submits one nameless, empty part.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let file_name = if file_name.is_empty() {
                        UNNAMED_FILE.to_string()
                    } else {
                        file_name
                    };
                    form.files.push(UploadedFile::new(file_name, bytes.to_vec()));
                }
                _ => {
                    let text = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, text);
                }
            }
        }

        debug!(
            "Read upload: {} files, fields {:?}",
            form.files.len(),
            form.fields.keys().collect::<Vec<_>>()
        );
        Ok(form)
    }

    /// A scalar field, trimmed; blank values count as absent.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, field: &'static str) -> Result<&str, ValidationError> {
        self.text(field).ok_or(ValidationError::MissingField(field))
    }

    pub fn into_files(self) -> Vec<UploadedFile> {
        self.files
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large("Upload exceeds the size limit");
    }
    ValidationError::malformed(err.body_text()).into()
}
