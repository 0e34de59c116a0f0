//! notelens summaries
//!
//! Produces a short summary and a keyword list for a note. The remote path
//! asks an OpenAI-compatible chat model for strict JSON; the local path takes
//! the leading sentences and the most frequent tokens.
//!
//! ## Fallback order
//!
//! 1. Remote, when a completion provider is configured. Up to two attempts.
//!    JSON is pulled out of whatever the model wrapped around it; if that
//!    fails the raw reply becomes the summary (`remote_raw`).
//! 2. Local, when the provider is missing, every attempt failed, or the
//!    remote result came back with neither summary nor keywords.
//!
//! Blank input is the only error a caller sees.
//!
//! ```
//! use summarize::{SummarizationService, SummaryOrigin};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = SummarizationService::local_only();
//! let result = service.summarize("Heaps are trees. Heaps are fast.").await.unwrap();
//! assert_eq!(result.origin, SummaryOrigin::Local);
//! assert_eq!(result.keywords[0], "are");
//! # }
//! ```

pub mod error;
pub mod local;
pub mod remote;
pub mod retry;
pub mod types;

pub use crate::error::SummarizeError;
pub use crate::local::{LocalSummarizer, LocalSummaryConfig};
pub use crate::remote::{
    build_prompt, decode_summary, extract_json, parse_completion, ChatCompletionProvider,
    CompletionError, CompletionProvider, RemoteSummarizer, SYSTEM_PROMPT,
};
pub use crate::retry::{execute_with_retry_async, RetryConfig, RetryResult};
pub use crate::types::{SummaryOrigin, SummaryResult};

use std::sync::Arc;

use semantic::ProviderConfig;
use tracing::{debug, warn};

/// Remote-then-local summarization pipeline.
#[derive(Clone)]
pub struct SummarizationService {
    remote: Option<RemoteSummarizer>,
    local: LocalSummarizer,
}

impl SummarizationService {
    /// Builds the service from provider settings and local limits.
    ///
    /// An unconfigured provider leaves the service local-only.
    pub fn new(provider: &ProviderConfig, local: LocalSummaryConfig) -> Self {
        let remote = if provider.is_configured() {
            match ChatCompletionProvider::new(provider) {
                Ok(p) => Some(RemoteSummarizer::new(Arc::new(p))),
                Err(err) => {
                    warn!(error = %err, "completion provider unusable, summaries will be local");
                    None
                }
            }
        } else {
            debug!("completion provider not configured, summaries will be local");
            None
        };
        Self {
            remote,
            local: LocalSummarizer::new(local),
        }
    }

    pub fn with_remote(remote: RemoteSummarizer, local: LocalSummaryConfig) -> Self {
        Self {
            remote: Some(remote),
            local: LocalSummarizer::new(local),
        }
    }

    pub fn local_only() -> Self {
        Self {
            remote: None,
            local: LocalSummarizer::default(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Summarizes `text`.
    ///
    /// # Errors
    /// [`SummarizeError::EmptyInput`] when `text` is blank.
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        match self.try_remote(text).await {
            Ok(result) if !result.is_empty() => Ok(result),
            Ok(_) => {
                warn!("remote summary was empty, using local summary");
                Ok(self.summarize_local(text))
            }
            Err(err) => {
                debug!(error = %err, "using local summary");
                Ok(self.summarize_local(text))
            }
        }
    }

    /// Remote stage.
    ///
    /// # Errors
    /// [`SummarizeError::ProviderUnavailable`] when no provider is
    /// configured or it failed.
    pub async fn try_remote(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        match &self.remote {
            Some(remote) => remote.summarize(text).await,
            None => Err(SummarizeError::ProviderUnavailable(
                "no completion provider configured".into(),
            )),
        }
    }

    /// Local stage. Never fails.
    pub fn summarize_local(&self, text: &str) -> SummaryResult {
        self.local.summarize(text)
    }
}

impl std::fmt::Debug for SummarizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizationService")
            .field(
                "remote",
                &self.remote.as_ref().map(|r| r.provider_name().to_string()),
            )
            .field("local", self.local.config())
            .finish()
    }
}
