use semantic::SemanticError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page size applied when a request asks for something outside
/// [`MAX_PAGE_SIZE`].
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: usize = 100;

/// A searchable note as the document store hands it over.
///
/// `embedding` is the vector persisted by an earlier search, serialized as a
/// JSON array of numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TextDocument {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<u64>,
}

impl TextDocument {
    /// Text that gets embedded: title, description and content joined by
    /// newlines, blank parts skipped.
    pub fn search_text(&self) -> String {
        [&self.title, &self.description, &self.content]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Paging and cutoff knobs for one search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Keep only the best `top_k` results before paging. `0` means no cap.
    #[serde(default)]
    pub top_k: usize,
    /// 1-based page number.
    #[serde(default = "SearchRequest::default_page")]
    pub page: usize,
    #[serde(default = "SearchRequest::default_page_size")]
    pub page_size: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: 0,
            page: Self::default_page(),
            page_size: Self::default_page_size(),
        }
    }

    pub(crate) fn default_page() -> usize {
        1
    }

    pub(crate) fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }

    /// Clamps paging into the accepted range: page below 1 becomes 1, a page
    /// size outside `1..=100` becomes 10.
    pub fn normalized(mut self) -> Self {
        let (page, page_size) = normalize_paging(self.page, self.page_size);
        self.page = page;
        self.page_size = page_size;
        self
    }
}

/// Shared paging normalization.
pub fn normalize_paging(page: usize, page_size: usize) -> (usize, usize) {
    let page = page.max(1);
    let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    };
    (page, page_size)
}

/// One scored candidate. `rank` is the 0-based position after sorting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimilarityResult<K = u64> {
    pub id: K,
    pub score: f32,
    pub rank: usize,
}

/// A page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of results after the TopK cutoff, across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// A decorated search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub document_id: u64,
    pub similarity: f32,
    pub excerpt: String,
    pub highlighted_title: String,
    pub highlighted_description: String,
}

/// What a search produced.
///
/// `computed` lists the candidate vectors that had to be built during this
/// search (no usable cached vector), so the caller can persist them. Local
/// fallbacks produced while a remote provider is configured are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub page: Page<SearchHit>,
    pub computed: Vec<(u64, Vec<f32>)>,
}

/// Errors surfaced by the search layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MatchError {
    /// The query was empty after trimming.
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("embedding error: {0}")]
    Semantic(#[from] SemanticError),
}
