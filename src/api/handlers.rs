//! Axum handlers for the batch endpoints.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::{AppState, OperationKind, OperationSpec, UploadedFile};
use crate::utils::{parse_flag, parse_integer};

use super::dto::{HealthResponse, WelcomeResponse};
use super::errors::ApiError;
use super::multipart::BatchForm;

/// `POST /convert`: `files`, `format`
pub async fn convert_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let form = BatchForm::read(multipart?).await?;
    let operation = OperationSpec::convert(form.require("format")?)?;
    run_batch(&state, form.into_files(), operation).await
}

/// `POST /resize`: `files`, `width`, `height`, optional `maintainAspectRatio`
pub async fn resize_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let form = BatchForm::read(multipart?).await?;
    let width = parse_integer("width", form.require("width")?)?;
    let height = parse_integer("height", form.require("height")?)?;
    let preserve_aspect_ratio = form
        .text("maintainAspectRatio")
        .map(|raw| parse_flag("maintainAspectRatio", raw))
        .transpose()?
        .unwrap_or(false);

    let operation = OperationSpec::resize(width, height, preserve_aspect_ratio)?;
    run_batch(&state, form.into_files(), operation).await
}

/// `POST /compress`: `files`, `quality`
pub async fn compress_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let form = BatchForm::read(multipart?).await?;
    let quality = parse_integer("quality", form.require("quality")?)?;
    let operation = OperationSpec::compress(quality)?;
    run_batch(&state, form.into_files(), operation).await
}

/// `GET /convert`
pub async fn welcome_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        status: 200,
        message: "Welcome to Experiment".to_string(),
    })
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

async fn run_batch(
    state: &AppState,
    files: Vec<UploadedFile>,
    operation: OperationSpec,
) -> Result<Response, ApiError> {
    let kind = operation.kind();
    let archive = state
        .processor()
        .run(files, &operation)
        .await
        .map_err(|e| ApiError::from_converter(kind, e))?;

    Ok(zip_response(kind, archive))
}

fn zip_response(kind: OperationKind, archive: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", kind.archive_name()),
            ),
        ],
        archive,
    )
        .into_response()
}
