//! Server error types and response handling

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by the endpoint handlers
///
/// Clients only ever see a fixed message; the detail goes to the log.
#[derive(Debug)]
pub enum ApiError {
    /// The upstream RPC failed or answered with something unusable
    Upstream(String),
    /// The manifest file is missing or unreadable
    ManifestMissing(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Upstream(detail) => {
                tracing::error!("Gas price upstream error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch gas price")
            }
            ApiError::ManifestMissing(detail) => {
                tracing::warn!("Manifest unavailable: {}", detail);
                (StatusCode::NOT_FOUND, "manifest not found")
            }
        };

        (
            status,
            [(header::CACHE_CONTROL, "no-store")],
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}
