//! Router assembly.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::core::AppState;

use super::handlers::{
    compress_handler, convert_handler, health_handler, resize_handler, welcome_handler,
};

/// Create the HTTP router.
///
/// The batch endpoints are served both at the root and under `/api`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().body_limit_bytes();

    let operations: Router<AppState> = Router::new()
        .route("/convert", get(welcome_handler).post(convert_handler))
        .route("/resize", post(resize_handler))
        .route("/compress", post(compress_handler));

    Router::new()
        .merge(operations.clone())
        .nest("/api", operations)
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
