use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use crate::store::DocumentFilter;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use matcher::{SearchHit, SearchRequest};
use semantic::EmbeddingSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Embed request
#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    pub text: String,
}

/// Embed response
#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub vector: Vec<f32>,
    pub source: EmbeddingSource,
    pub dimension: usize,
}

/// Embed one text, remote first with local fallback.
pub async fn embed_text(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<EmbedRequest>,
) -> ServerResult<impl IntoResponse> {
    let vector = state.intelligence.embed(&request.text).await?;
    let dimension = vector.dimension();

    Ok(Json(EmbedResponse {
        source: vector.source,
        dimension,
        vector: vector.into_values(),
    }))
}

/// Semantic search request
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,

    /// Restrict candidates to one course
    #[serde(default)]
    pub course_id: Option<u64>,

    /// Keep only the best N results before paging (0 or absent: no cap)
    #[serde(default)]
    pub top_k: Option<usize>,

    #[serde(default)]
    pub page: Option<usize>,

    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Semantic search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub results: Vec<SearchHit>,
}

/// Rank the stored notes against a query.
///
/// Vectors computed along the way are written back to the store so the next
/// search can reuse them.
pub async fn search_notes(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<SearchBody>,
) -> ServerResult<impl IntoResponse> {
    if body.query.trim().is_empty() {
        return Err(ServerError::EmptyInput("query must not be empty".into()));
    }

    let candidates = state.store.candidate_documents(DocumentFilter {
        course_id: body.course_id,
    })?;

    let mut request = SearchRequest::new(body.query);
    request.top_k = body.top_k.unwrap_or(0);
    if let Some(page) = body.page {
        request.page = page;
    }
    if let Some(page_size) = body.page_size {
        request.page_size = page_size;
    }

    let outcome = state.intelligence.search(&request, &candidates).await?;

    for (id, values) in &outcome.computed {
        state
            .store
            .store_embedding(*id, semantic::encode_vector(values))?;
    }
    tracing::debug!(
        candidates = candidates.len(),
        persisted = outcome.computed.len(),
        "search complete"
    );

    let page = outcome.page;
    Ok(Json(SearchResponse {
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        results: page.items,
    }))
}

/// Summarize request: a stored note or inline text
#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    #[serde(default)]
    pub note_id: Option<u64>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Summarize response
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Summarize a note or inline text.
///
/// With `note_id` the note's content is summarized and the result stored as
/// the note's AI metadata. `note_id` wins when both fields are present.
pub async fn summarize_text(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<SummarizeBody>,
) -> ServerResult<impl IntoResponse> {
    let (text, note_id) = match (body.note_id, body.content) {
        (Some(id), _) => {
            let note = state
                .store
                .document_by_id(id)?
                .ok_or(ServerError::NotFound)?;
            (note.content, Some(id))
        }
        (None, Some(content)) => (content, None),
        (None, None) => {
            return Err(ServerError::BadRequest(
                "provide note_id or content".to_string(),
            ))
        }
    };

    if text.trim().is_empty() {
        return Err(ServerError::EmptyInput(
            "content is empty, nothing to summarize".to_string(),
        ));
    }

    let result = state.intelligence.summarize(&text).await?;
    tracing::debug!(origin = %result.origin, note_id = ?note_id, "summary ready");

    if let Some(id) = note_id {
        state.store.upsert_ai_meta(
            id,
            result.summary.clone(),
            result.keywords.clone(),
            Utc::now(),
        )?;
    }

    Ok(Json(SummarizeResponse {
        summary: result.summary,
        keywords: result.keywords,
    }))
}

/// Stored AI metadata of a note
#[derive(Debug, Serialize, Deserialize)]
pub struct AiMetaResponse {
    pub note_id: u64,
    pub summary: String,
    pub keywords: Vec<String>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

/// Get a note's AI metadata; empty when the note was never summarized.
pub async fn note_ai_meta(
    State(state): State<Arc<ServerState>>,
    Path(note_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    if state.store.document_by_id(note_id)?.is_none() {
        return Err(ServerError::NotFound);
    }

    let response = match state.store.ai_meta(note_id)? {
        Some(meta) => AiMetaResponse {
            note_id,
            summary: meta.summary,
            keywords: meta.keywords,
            last_reviewed_at: Some(meta.last_reviewed_at),
        },
        None => AiMetaResponse {
            note_id,
            summary: String::new(),
            keywords: Vec::new(),
            last_reviewed_at: None,
        },
    };

    Ok(Json(response))
}
