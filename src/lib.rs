//! Workspace umbrella crate for notelens content intelligence.
//!
//! This crate wires the embedding, search and summarization services from a
//! single [`NotelensConfig`] so callers (the HTTP server, batch jobs, tests)
//! deal with one entry point.
//!
//! ```
//! use notelens::{ContentIntelligence, EmbeddingSource, NotelensConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ci = ContentIntelligence::from_config(&NotelensConfig::default());
//! let v = ci.embed("graph search").await.unwrap();
//! assert_eq!(v.source, EmbeddingSource::Local);
//! assert_eq!(v.dimension(), 256);
//! # }
//! ```

pub mod config;

pub use crate::config::{
    ConfigLoadError, NotelensConfig, DEFAULT_COMPLETION_MODEL, DEFAULT_EMBEDDING_MODEL,
};
pub use canonical::{ellipsize, split_sentences, tokenize, truncate_chars};
pub use matcher::{
    cosine_similarity, highlight, highlight_query, MatchError, Page, SearchEngine, SearchHit,
    SearchOutcome, SearchRequest, SimilarityResult, TextDocument,
};
pub use semantic::{
    decode_vector, encode_vector, EmbeddingProvider, EmbeddingService, EmbeddingSource,
    EmbeddingVector, ProviderConfig, SemanticError, LOCAL_DIMENSION,
};
pub use summarize::{
    CompletionError, CompletionProvider, LocalSummaryConfig, RemoteSummarizer,
    SummarizationService, SummarizeError, SummaryOrigin, SummaryResult,
};

use std::error::Error;
use std::fmt;

use tracing::debug;

/// Any failure the facade can surface. Only blank input reaches here in
/// practice; provider trouble degrades to the local paths.
#[derive(Debug, Clone, PartialEq)]
pub enum IntelligenceError {
    Semantic(SemanticError),
    Match(MatchError),
    Summarize(SummarizeError),
}

impl IntelligenceError {
    /// `true` when the caller sent blank text or a blank query.
    pub fn is_empty_input(&self) -> bool {
        matches!(
            self,
            IntelligenceError::Semantic(SemanticError::EmptyInput)
                | IntelligenceError::Match(MatchError::EmptyQuery)
                | IntelligenceError::Match(MatchError::Semantic(SemanticError::EmptyInput))
                | IntelligenceError::Summarize(SummarizeError::EmptyInput)
        )
    }
}

impl fmt::Display for IntelligenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntelligenceError::Semantic(err) => write!(f, "embedding failure: {err}"),
            IntelligenceError::Match(err) => write!(f, "search failure: {err}"),
            IntelligenceError::Summarize(err) => write!(f, "summarization failure: {err}"),
        }
    }
}

impl Error for IntelligenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IntelligenceError::Semantic(err) => Some(err),
            IntelligenceError::Match(err) => Some(err),
            IntelligenceError::Summarize(err) => Some(err),
        }
    }
}

impl From<SemanticError> for IntelligenceError {
    fn from(value: SemanticError) -> Self {
        IntelligenceError::Semantic(value)
    }
}

impl From<MatchError> for IntelligenceError {
    fn from(value: MatchError) -> Self {
        IntelligenceError::Match(value)
    }
}

impl From<SummarizeError> for IntelligenceError {
    fn from(value: SummarizeError) -> Self {
        IntelligenceError::Summarize(value)
    }
}

/// The three operations of the content-intelligence subsystem.
///
/// Cheap to clone; every clone shares the same HTTP clients.
#[derive(Debug, Clone)]
pub struct ContentIntelligence {
    search: SearchEngine,
    summaries: SummarizationService,
}

impl ContentIntelligence {
    /// Builds every service from explicit configuration.
    pub fn from_config(cfg: &NotelensConfig) -> Self {
        let embeddings = EmbeddingService::new(&cfg.embedding);
        let summaries = SummarizationService::new(&cfg.completion, cfg.local_summary);
        debug!(
            remote_embeddings = embeddings.has_remote(),
            remote_summaries = summaries.has_remote(),
            "content intelligence ready"
        );
        Self::from_services(embeddings, summaries)
    }

    /// Assembles the facade from prebuilt services, e.g. with mock providers.
    pub fn from_services(embeddings: EmbeddingService, summaries: SummarizationService) -> Self {
        Self {
            search: SearchEngine::new(embeddings),
            summaries,
        }
    }

    /// Local-only instance; never touches the network.
    pub fn local_only() -> Self {
        Self::from_services(
            EmbeddingService::local_only(),
            SummarizationService::local_only(),
        )
    }

    pub fn embeddings(&self) -> &EmbeddingService {
        self.search.embeddings()
    }

    pub fn summaries(&self) -> &SummarizationService {
        &self.summaries
    }

    /// Embeds one text, remote first.
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector, IntelligenceError> {
        Ok(self.embeddings().embed(text).await?)
    }

    /// Ranks `candidates` against the request's query.
    pub async fn search(
        &self,
        request: &SearchRequest,
        candidates: &[TextDocument],
    ) -> Result<SearchOutcome, IntelligenceError> {
        Ok(self.search.search(request, candidates).await?)
    }

    /// Summary plus keywords, remote first.
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult, IntelligenceError> {
        Ok(self.summaries.summarize(text).await?)
    }
}

impl Default for ContentIntelligence {
    fn default() -> Self {
        Self::local_only()
    }
}
