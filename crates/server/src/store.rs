//! Document collaborator.
//!
//! Notes, courses and the rest of the platform live elsewhere; search and
//! summaries only need a handful of record operations, captured by
//! [`DocumentStore`]. [`InMemoryDocumentStore`] backs the bundled server and
//! the tests.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use matcher::TextDocument;
use serde::{Deserialize, Serialize};

/// Errors raised by a document store backend.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(u64),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Candidate selection for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Restrict to one course; `None` means every document.
    pub course_id: Option<u64>,
}

/// Stored AI output for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAiMeta {
    pub note_id: u64,
    pub summary: String,
    pub keywords: Vec<String>,
    pub last_reviewed_at: DateTime<Utc>,
}

/// Record access the content-intelligence endpoints rely on.
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`, ordered by id.
    fn candidate_documents(&self, filter: DocumentFilter) -> Result<Vec<TextDocument>, StoreError>;

    fn document_by_id(&self, id: u64) -> Result<Option<TextDocument>, StoreError>;

    /// Inserts or replaces a document.
    fn upsert_document(&self, doc: TextDocument) -> Result<(), StoreError>;

    /// Replaces a document's serialized embedding. Last write wins.
    fn store_embedding(&self, id: u64, serialized: String) -> Result<(), StoreError>;

    /// Creates or overwrites the AI metadata of a note.
    fn upsert_ai_meta(
        &self,
        note_id: u64,
        summary: String,
        keywords: Vec<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    fn ai_meta(&self, note_id: u64) -> Result<Option<NoteAiMeta>, StoreError>;
}

/// `DashMap`-backed store; suitable for tests and single-node demos.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<u64, TextDocument>,
    ai_meta: DashMap<u64, NoteAiMeta>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `docs`.
    pub fn with_documents(docs: impl IntoIterator<Item = TextDocument>) -> Self {
        let store = Self::new();
        for doc in docs {
            store.documents.insert(doc.id, doc);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn candidate_documents(&self, filter: DocumentFilter) -> Result<Vec<TextDocument>, StoreError> {
        let mut docs: Vec<TextDocument> = self
            .documents
            .iter()
            .filter(|entry| match filter.course_id {
                Some(course) => entry.value().course_id == Some(course),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary
        docs.sort_by_key(|doc| doc.id);
        Ok(docs)
    }

    fn document_by_id(&self, id: u64) -> Result<Option<TextDocument>, StoreError> {
        Ok(self.documents.get(&id).map(|entry| entry.value().clone()))
    }

    fn upsert_document(&self, doc: TextDocument) -> Result<(), StoreError> {
        self.documents.insert(doc.id, doc);
        Ok(())
    }

    fn store_embedding(&self, id: u64, serialized: String) -> Result<(), StoreError> {
        match self.documents.get_mut(&id) {
            Some(mut entry) => {
                entry.embedding = Some(serialized);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn upsert_ai_meta(
        &self,
        note_id: u64,
        summary: String,
        keywords: Vec<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.ai_meta.insert(
            note_id,
            NoteAiMeta {
                note_id,
                summary,
                keywords,
                last_reviewed_at: reviewed_at,
            },
        );
        Ok(())
    }

    fn ai_meta(&self, note_id: u64) -> Result<Option<NoteAiMeta>, StoreError> {
        Ok(self.ai_meta.get(&note_id).map(|entry| entry.value().clone()))
    }
}
