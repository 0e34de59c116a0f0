use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matcher::TextDocument;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response from document upsert
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentUpsertResponse {
    pub id: u64,
    pub status: String,
}

/// Insert or replace a document in the store.
///
/// A supplied `embedding` must be a JSON array of numbers; anything else is
/// dropped so the next search recomputes it.
pub async fn upsert_document(
    State(state): State<Arc<ServerState>>,
    Json(mut document): Json<TextDocument>,
) -> ServerResult<impl IntoResponse> {
    if let Some(raw) = document.embedding.as_deref() {
        if let Err(err) = semantic::decode_vector(raw) {
            tracing::warn!(id = document.id, error = %err, "dropping unreadable embedding");
            document.embedding = None;
        }
    }

    let id = document.id;
    state.store.upsert_document(document)?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentUpsertResponse {
            id,
            status: "stored".to_string(),
        }),
    ))
}

/// Get document by ID
pub async fn get_document(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    state
        .store
        .document_by_id(id)?
        .map(Json)
        .ok_or(ServerError::NotFound)
}
