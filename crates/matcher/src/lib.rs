//! # notelens matcher (`matcher`)
//!
//! ## Purpose
//!
//! Semantic search over notes. A request carries a query and the candidate
//! documents loaded for it (optionally filtered by course); there is no
//! vector index. The engine embeds the query, reuses each candidate's cached
//! vector when it decodes, embeds the rest, and ranks by cosine similarity.
//!
//! ## Core pieces
//!
//! - [`cosine_similarity`]: dot over norms on the shared prefix; 0 against a
//!   zero or empty vector.
//! - [`rank`]: stable descending sort, equal scores keep input order.
//! - [`paginate`]: TopK cutoff first, then 1-based pages.
//! - [`highlight`] / [`excerpt`]: `<em>` markup and a 180-codepoint preview.
//! - [`SearchEngine`]: the whole flow, returning the page plus the vectors it
//!   had to compute so the caller can persist them.
//!
//! ## Example
//!
//! ```
//! use matcher::{SearchEngine, SearchRequest, TextDocument};
//! use semantic::EmbeddingService;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = SearchEngine::new(EmbeddingService::local_only());
//! let docs = vec![
//!     TextDocument { id: 1, title: "Graph theory".into(), ..Default::default() },
//!     TextDocument { id: 2, title: "Pasta".into(), ..Default::default() },
//! ];
//! let outcome = engine.search(&SearchRequest::new("graph"), &docs).await.unwrap();
//! assert_eq!(outcome.page.items[0].document_id, 1);
//! assert_eq!(outcome.page.items[0].highlighted_title, "<em>Graph</em> theory");
//! # }
//! ```

pub mod engine;
pub mod highlight;
pub mod rank;
pub mod types;

pub use crate::engine::SearchEngine;
pub use crate::highlight::{excerpt, highlight, highlight_query, EXCERPT_CHARS};
pub use crate::rank::{cosine_similarity, paginate, rank};
pub use crate::types::{
    normalize_paging, MatchError, Page, SearchHit, SearchOutcome, SearchRequest,
    SimilarityResult, TextDocument, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
