use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use notelens::{
    encode_vector, CompletionError, CompletionProvider, ContentIntelligence, EmbeddingProvider,
    EmbeddingService, EmbeddingSource, LocalSummaryConfig, RemoteSummarizer, SearchRequest,
    SemanticError, SummarizationService, SummaryOrigin, TextDocument,
};

fn note(id: u64, title: &str, description: &str) -> TextDocument {
    TextDocument {
        id,
        title: title.into(),
        description: description.into(),
        ..Default::default()
    }
}

/// Provider that fails for anything mentioning "outage" and otherwise
/// answers with a 3-d vector keyed on a few words.
struct KeywordProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl EmbeddingProvider for KeywordProvider {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = text.to_lowercase();
        if text.contains("outage") {
            return Err(SemanticError::Provider("503 Service Unavailable".into()));
        }
        let hit = |w: &str| if text.contains(w) { 3.0 } else { 0.0 };
        Ok(vec![hit("rust"), hit("graph"), hit("pasta")])
    }
}

struct CannedCompletion(&'static str);

#[async_trait]
impl CompletionProvider for CannedCompletion {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, CompletionError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn local_search_ranks_matching_note_first() {
    let ci = ContentIntelligence::local_only();
    let notes = vec![
        note(1, "Pasta", "pasta theory"),
        note(2, "Rust", "rust graph"),
    ];

    let outcome = ci
        .search(&SearchRequest::new("Rust"), &notes)
        .await
        .unwrap();

    assert_eq!(outcome.page.total, 2);
    let first = &outcome.page.items[0];
    assert_eq!(first.document_id, 2);
    // rust twice, graph once: 2 / sqrt(5)
    assert!((first.similarity - 2.0 / 5f32.sqrt()).abs() < 1e-5);
    assert_eq!(first.highlighted_title, "<em>Rust</em>");
    assert_eq!(first.highlighted_description, "<em>rust</em> graph");
    assert_eq!(first.excerpt, "rust graph");
    assert_eq!(outcome.page.items[1].similarity, 0.0);

    // both candidates were embedded fresh
    let ids: Vec<u64> = outcome.computed.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn cached_vectors_skip_the_provider() {
    let provider = Arc::new(KeywordProvider {
        calls: AtomicUsize::new(0),
    });
    let ci = ContentIntelligence::from_services(
        EmbeddingService::with_provider(provider.clone()),
        SummarizationService::local_only(),
    );

    let mut cached = note(7, "Graphs", "graph traversal");
    cached.embedding = Some(encode_vector(&[0.0, 1.0, 0.0]));
    let fresh = note(8, "Rust", "ownership");

    let outcome = ci
        .search(&SearchRequest::new("graph"), &[fresh, cached])
        .await
        .unwrap();

    // query + the uncached note
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(outcome.page.items[0].document_id, 7);
    assert_eq!(outcome.computed, vec![(8, vec![3.0, 0.0, 0.0])]);
}

#[tokio::test]
async fn failing_provider_degrades_to_local_vectors() {
    let provider = Arc::new(KeywordProvider {
        calls: AtomicUsize::new(0),
    });
    let ci = ContentIntelligence::from_services(
        EmbeddingService::with_provider(provider),
        SummarizationService::local_only(),
    );

    let v = ci.embed("outage report").await.unwrap();
    assert_eq!(v.source, EmbeddingSource::Local);
    assert_eq!(v.dimension(), 256);
    assert!((v.norm() - 1.0).abs() < 1e-5);

    let v = ci.embed("rust").await.unwrap();
    assert_eq!(v.source, EmbeddingSource::Remote);
    assert_eq!(v.values, vec![3.0, 0.0, 0.0]);
}

#[tokio::test]
async fn remote_summary_flows_through_facade() {
    let summaries = SummarizationService::with_remote(
        RemoteSummarizer::new(Arc::new(CannedCompletion(
            "{\"summary\": \"Graphs, briefly.\", \"keywords\": [\"graph\", \"bfs\"]}",
        ))),
        LocalSummaryConfig::default(),
    );
    let ci = ContentIntelligence::from_services(EmbeddingService::local_only(), summaries);

    let r = ci.summarize("BFS visits graphs level by level.").await.unwrap();
    assert_eq!(r.origin, SummaryOrigin::Remote);
    assert_eq!(r.summary, "Graphs, briefly.");
    assert_eq!(r.keywords, vec!["graph", "bfs"]);
}

#[tokio::test]
async fn local_pipeline_is_deterministic() {
    let a = ContentIntelligence::local_only();
    let b = ContentIntelligence::local_only();
    let text = "Dijkstra finds shortest paths. It needs non-negative weights. Heaps help.";

    assert_eq!(a.embed(text).await.unwrap(), b.embed(text).await.unwrap());
    assert_eq!(
        a.summarize(text).await.unwrap(),
        b.summarize(text).await.unwrap()
    );

    // casing and punctuation do not change the local vector
    assert_eq!(
        a.embed("Hello, World!").await.unwrap(),
        a.embed("hello world").await.unwrap()
    );
}
