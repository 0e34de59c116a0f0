//! notelens embeddings
//!
//! Turns note text into vectors for similarity search. Two producers sit
//! behind one service:
//!
//! - **Remote** - an OpenAI-compatible `/embeddings` endpoint, used when an
//!   API key is configured. Vectors come back exactly as the provider sent them.
//! - **Local** - a 256-bucket hashed bag-of-words, L2-normalized. Cheap,
//!   deterministic, always available.
//!
//! The service is a degrade-don't-fail pipeline: `try_remote` first, then
//! `embed_local`. A provider outage shows up as a `warn` log line and a
//! `local` source tag, never as an error. The only thing that fails a call
//! is blank input.
//!
//! Documents may carry a previously serialized vector. `embed_cached` uses it
//! when it decodes and recomputes otherwise. The service itself never writes
//! anything back; persisting fresh vectors is the caller's business.
//!
//! ```
//! use semantic::{EmbeddingService, EmbeddingSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = EmbeddingService::local_only();
//! let v = service.embed("Graph theory, week 3").await.unwrap();
//! assert_eq!(v.source, EmbeddingSource::Local);
//! assert_eq!(v.dimension(), 256);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod types;

mod local;
mod normalize;
mod remote;

pub use crate::config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use crate::error::SemanticError;
pub use crate::local::{bucket_for, LocalEmbedder, LOCAL_DIMENSION};
pub use crate::normalize::{decode_vector, encode_vector, l2_normalize_in_place};
pub use crate::remote::{first_embedding, EmbeddingProvider, OpenAiEmbeddingProvider};
pub use crate::types::{EmbeddingSource, EmbeddingVector};

use std::sync::Arc;

use tracing::{debug, warn};

/// Remote-then-local embedding pipeline.
#[derive(Clone)]
pub struct EmbeddingService {
    remote: Option<Arc<dyn EmbeddingProvider>>,
    local: LocalEmbedder,
}

impl EmbeddingService {
    /// Builds the service from provider settings.
    ///
    /// An unconfigured provider (blank API key) leaves the service local-only.
    /// So does a provider whose client cannot be built; that case is logged.
    pub fn new(cfg: &ProviderConfig) -> Self {
        if !cfg.is_configured() {
            debug!("embedding provider not configured, using local embedder only");
            return Self::local_only();
        }
        match OpenAiEmbeddingProvider::new(cfg) {
            Ok(provider) => Self::with_provider(Arc::new(provider)),
            Err(err) => {
                warn!(error = %err, "embedding provider unusable, using local embedder only");
                Self::local_only()
            }
        }
    }

    /// Uses `provider` for the remote stage.
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            remote: Some(provider),
            local: LocalEmbedder::new(),
        }
    }

    pub fn local_only() -> Self {
        Self {
            remote: None,
            local: LocalEmbedder::new(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Embeds `text`, remote first, local on any provider failure.
    ///
    /// # Errors
    /// [`SemanticError::EmptyInput`] when `text` is blank. Nothing else.
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SemanticError::EmptyInput);
        }
        if let Some(vector) = self.try_remote(text).await {
            return Ok(vector);
        }
        Ok(self.embed_local(text))
    }

    /// Remote stage. `None` when no provider is configured or it failed.
    pub async fn try_remote(&self, text: &str) -> Option<EmbeddingVector> {
        let provider = self.remote.as_ref()?;
        match provider.embed(text).await {
            Ok(values) if !values.is_empty() => {
                debug!(provider = provider.name(), dim = values.len(), "remote embedding");
                Some(EmbeddingVector::new(values, EmbeddingSource::Remote))
            }
            Ok(_) => {
                warn!(provider = provider.name(), "remote embedding was empty, falling back to local");
                None
            }
            Err(err) => {
                warn!(provider = provider.name(), error = %err, "remote embedding failed, falling back to local");
                None
            }
        }
    }

    /// Local stage. Always succeeds; blank text yields the zero vector.
    pub fn embed_local(&self, text: &str) -> EmbeddingVector {
        EmbeddingVector::new(self.local.embed(text), EmbeddingSource::Local)
    }

    /// Uses a document's serialized vector when it decodes, otherwise
    /// computes a fresh one through [`embed`](Self::embed).
    ///
    /// # Errors
    /// [`SemanticError::EmptyInput`] when there is no usable cache and `text`
    /// is blank.
    pub async fn embed_cached(
        &self,
        serialized: Option<&str>,
        text: &str,
    ) -> Result<EmbeddingVector, SemanticError> {
        if let Some(raw) = serialized.filter(|raw| !raw.trim().is_empty()) {
            match decode_vector(raw) {
                Ok(values) => return Ok(EmbeddingVector::new(values, EmbeddingSource::Cached)),
                Err(err) => warn!(error = %err, "ignoring unreadable cached vector"),
            }
        }
        self.embed(text).await
    }
}

impl std::fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingService")
            .field("remote", &self.remote.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider {
        result: Result<Vec<f32>, SemanticError>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(result: Result<Vec<f32>, SemanticError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl EmbeddingProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, SemanticError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let service = EmbeddingService::local_only();
        assert_eq!(service.embed("").await, Err(SemanticError::EmptyInput));
        assert_eq!(service.embed(" \n\t").await, Err(SemanticError::EmptyInput));
    }

    #[tokio::test]
    async fn unconfigured_service_uses_local() {
        let service = EmbeddingService::new(&ProviderConfig::default());
        assert!(!service.has_remote());
        let v = service.embed("linear algebra").await.unwrap();
        assert_eq!(v.source, EmbeddingSource::Local);
        assert_eq!(v.values, LocalEmbedder::new().embed("linear algebra"));
    }

    #[tokio::test]
    async fn remote_success_is_returned_verbatim() {
        let provider = FixedProvider::new(Ok(vec![3.0, 4.0, 0.0]));
        let service = EmbeddingService::with_provider(provider.clone());
        let v = service.embed("anything").await.unwrap();
        assert_eq!(v.source, EmbeddingSource::Remote);
        assert_eq!(v.values, vec![3.0, 4.0, 0.0]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_failure_degrades_to_local() {
        let provider = FixedProvider::new(Err(SemanticError::Provider("HTTP error 500".into())));
        let service = EmbeddingService::with_provider(provider);
        let v = service.embed("hello world").await.unwrap();
        assert_eq!(v.source, EmbeddingSource::Local);
        assert_eq!(v.dimension(), LOCAL_DIMENSION);
    }

    #[tokio::test]
    async fn empty_remote_vector_degrades_to_local() {
        let service = EmbeddingService::with_provider(FixedProvider::new(Ok(Vec::new())));
        let v = service.embed("hello").await.unwrap();
        assert_eq!(v.source, EmbeddingSource::Local);
    }

    #[tokio::test]
    async fn cached_vector_is_preferred() {
        let provider = FixedProvider::new(Ok(vec![9.0]));
        let service = EmbeddingService::with_provider(provider.clone());
        let v = service
            .embed_cached(Some("[0.1, 0.2, 0.3]"), "ignored text")
            .await
            .unwrap();
        assert_eq!(v.source, EmbeddingSource::Cached);
        assert_eq!(v.values, vec![0.1, 0.2, 0.3]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreadable_cache_is_recomputed() {
        let service = EmbeddingService::local_only();
        for cached in [Some("{broken"), Some("[]"), Some("   "), None] {
            let v = service.embed_cached(cached, "fresh text").await.unwrap();
            assert_eq!(v.source, EmbeddingSource::Local, "{cached:?}");
        }
    }

    #[tokio::test]
    async fn blank_text_without_cache_is_rejected() {
        let service = EmbeddingService::local_only();
        assert_eq!(
            service.embed_cached(Some("nope"), "  ").await,
            Err(SemanticError::EmptyInput)
        );
    }

    #[test]
    fn local_stage_on_blank_text_is_zero() {
        let v = EmbeddingService::local_only().embed_local("");
        assert!(v.is_zero());
        assert_eq!(v.dimension(), LOCAL_DIMENSION);
    }
}
