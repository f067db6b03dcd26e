//! JSON bodies returned by the API.

use serde::Serialize;

/// Body of every 4xx/5xx response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// `GET /convert` greeting.
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub status: u16,
    pub message: String,
}
