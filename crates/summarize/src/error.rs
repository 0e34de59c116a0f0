use thiserror::Error;

/// Errors produced while summarizing.
///
/// Callers of [`SummarizationService`](crate::SummarizationService) only
/// ever see [`SummarizeError::EmptyInput`]; the other variants are internal
/// path decisions that end in a degraded result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("input text is empty")]
    EmptyInput,
    /// The remote provider is not configured or every attempt failed.
    #[error("summary provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// The provider answered, but not with the JSON we asked for.
    #[error("provider output is not valid summary JSON: {0}")]
    PartialDecode(String),
}
