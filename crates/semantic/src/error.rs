use thiserror::Error;

/// Errors surfaced by the embedding layer.
///
/// Only [`SemanticError::EmptyInput`] ever escapes
/// [`EmbeddingService::embed`](crate::EmbeddingService::embed); provider
/// failures are absorbed by the local fallback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SemanticError {
    /// The text was empty after trimming.
    #[error("input text is empty")]
    EmptyInput,
    /// The remote provider failed: network, timeout, status or body.
    #[error("embedding provider failed: {0}")]
    Provider(String),
    /// Provider settings cannot produce a working client.
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
    /// A document's stored vector could not be decoded.
    #[error("cached vector is unreadable: {0}")]
    CachedVector(String),
}
