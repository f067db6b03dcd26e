//! Conversion of pipeline errors into HTTP responses.

use axum::{
    Json,
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::core::OperationKind;
use crate::utils::{ConverterError, ValidationError};

use super::dto::ErrorResponse;

/// An HTTP error with a client-safe message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Maps a failed batch to a response.
    ///
    /// Validation problems keep their message. Everything else is logged
    /// here and replaced by the operation's generic failure message.
    pub fn from_converter(kind: OperationKind, err: ConverterError) -> Self {
        match err {
            ConverterError::Validation(validation) => validation.into(),
            other => {
                error!("Error processing {} batch: {}", kind, other);
                Self::internal(kind.failure_message())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}
