//! API route handlers
//!
//! - `health`: liveness and readiness
//! - `intelligence`: embeddings, semantic search, summaries, note AI metadata
//! - `documents`: the in-memory document collaborator

pub mod documents;
pub mod health;
pub mod intelligence;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "notelens server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/embed",
            "/api/v1/search",
            "/api/v1/summarize",
            "/api/v1/notes/{id}/ai-meta",
            "/api/v1/documents",
            "/api/v1/documents/{id}",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
