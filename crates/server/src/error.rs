use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notelens::IntelligenceError;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Blank text or query.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Semantic error: {0}")]
    Semantic(#[from] semantic::SemanticError),

    #[error("Match error: {0}")]
    Match(#[from] matcher::MatchError),

    #[error("Summarize error: {0}")]
    Summarize(#[from] summarize::SummarizeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_) | ServerError::EmptyInput(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound | ServerError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ServerError::Semantic(_) | ServerError::Match(_) | ServerError::Summarize(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServerError::Store(StoreError::Backend(_))
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::EmptyInput(_) => "EMPTY_INPUT",
            ServerError::Semantic(_) => "SEMANTIC_ERROR",
            ServerError::Match(_) => "MATCH_ERROR",
            ServerError::Summarize(_) => "SUMMARIZE_ERROR",
            ServerError::Store(StoreError::NotFound(_)) => "NOT_FOUND",
            ServerError::Store(StoreError::Backend(_)) => "STORE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = %error_code, error = %message, "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: error_code,
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<IntelligenceError> for ServerError {
    fn from(err: IntelligenceError) -> Self {
        if err.is_empty_input() {
            return ServerError::EmptyInput(err.to_string());
        }
        match err {
            IntelligenceError::Semantic(e) => ServerError::Semantic(e),
            IntelligenceError::Match(e) => ServerError::Match(e),
            IntelligenceError::Summarize(e) => ServerError::Summarize(e),
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
