// Manifest endpoint - serves the static mini-app manifest verbatim

use super::{ApiError, ServerState};
use axum::{extract::State, http::header, response::IntoResponse};
use std::sync::Arc;

/// Handler for GET /.well-known/farcaster.json
pub async fn get_manifest(
    State(state): State<Arc<ServerState>>,
) -> Result<impl IntoResponse, ApiError> {
    let contents = tokio::fs::read_to_string(&state.manifest_path)
        .await
        .map_err(|e| ApiError::ManifestMissing(format!("{}: {}", state.manifest_path.display(), e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        contents,
    ))
}
