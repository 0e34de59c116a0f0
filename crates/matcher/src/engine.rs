use std::time::Instant;

use semantic::{EmbeddingService, EmbeddingSource, EmbeddingVector};
use tracing::debug;

use crate::highlight::{excerpt, highlight};
use crate::rank::{paginate, rank};
use crate::types::{MatchError, SearchHit, SearchOutcome, SearchRequest, TextDocument};


/// Semantic search over a candidate set loaded per request.
///
/// There is no index: every search embeds the query, embeds (or decodes) each
/// candidate, ranks the lot and decorates the requested page.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    embeddings: EmbeddingService,
}

impl SearchEngine {
    pub fn new(embeddings: EmbeddingService) -> Self {
        Self { embeddings }
    }

    pub fn embeddings(&self) -> &EmbeddingService {
        &self.embeddings
    }

    /// Ranks `candidates` against `req.query` and returns the requested page.
    ///
    /// # Errors
    /// [`MatchError::EmptyQuery`] for a blank query. Provider trouble never
    /// fails a search; it degrades to local vectors.
    pub async fn search(
        &self,
        req: &SearchRequest,
        candidates: &[TextDocument],
    ) -> Result<SearchOutcome, MatchError> {
        let query = req.query.trim();
        if query.is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        let req = req.clone().normalized();
        let start = Instant::now();

        let query_vector = self.embeddings.embed(query).await?;

        let mut vectors = Vec::with_capacity(candidates.len());
        let mut computed = Vec::new();
        for (idx, doc) in candidates.iter().enumerate() {
            let vector = self.candidate_vector(doc).await?;
            if self.is_persistable(&vector) {
                computed.push((doc.id, vector.values.clone()));
            }
            vectors.push((idx, vector.values));
        }

        let ranked = rank(&query_vector.values, &vectors);
        let page = paginate(ranked, req.top_k, req.page, req.page_size);

        let tokens = canonical::tokenize(query);
        let items = page
            .items
            .iter()
            .map(|hit| {
                let doc = &candidates[hit.id];
                SearchHit {
                    document_id: doc.id,
                    similarity: hit.score,
                    excerpt: excerpt(&doc.description, &doc.content),
                    highlighted_title: highlight(&doc.title, &tokens),
                    highlighted_description: highlight(&doc.description, &tokens),
                }
            })
            .collect();

        debug!(
            query_source = %query_vector.source,
            candidates = candidates.len(),
            computed = computed.len(),
            total = page.total,
            latency_ms = start.elapsed().as_millis() as u64,
            "semantic search"
        );

        Ok(SearchOutcome {
            page: crate::types::Page {
                items,
                total: page.total,
                page: page.page,
                page_size: page.page_size,
                total_pages: page.total_pages,
            },
            computed,
        })
    }

    /// Fresh vectors in the service's primary space. A local fallback built
    /// while a remote provider is configured is used for this search only,
    /// so an outage never overwrites stored vectors.
    fn is_persistable(&self, vector: &EmbeddingVector) -> bool {
        if vector.is_zero() {
            return false;
        }
        match vector.source {
            EmbeddingSource::Cached => false,
            EmbeddingSource::Remote => true,
            EmbeddingSource::Local => !self.embeddings.has_remote(),
        }
    }

    /// Cached vector when usable, otherwise a fresh one. A candidate with no
    /// text at all gets the local zero vector and scores 0.
    async fn candidate_vector(&self, doc: &TextDocument) -> Result<EmbeddingVector, MatchError> {
        let text = doc.search_text();
        if text.is_empty() {
            let cached = doc
                .embedding
                .as_deref()
                .and_then(|raw| semantic::decode_vector(raw).ok());
            return Ok(match cached {
                Some(values) => EmbeddingVector::new(values, EmbeddingSource::Cached),
                None => self.embeddings.embed_local(""),
            });
        }
        Ok(self
            .embeddings
            .embed_cached(doc.embedding.as_deref(), &text)
            .await?)
    }
}
