//! notelens server - HTTP REST API for note content intelligence
//!
//! Exposes embeddings, semantic search over stored notes and summaries over
//! HTTP, backed by an in-memory document store.
//!
//! # Features
//!
//! - **Authentication**: API key-based authentication with rate limiting
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: `server` config file plus `NOTELENS_SERVER__*`
//!   environment variables; provider settings from a notelens YAML file and
//!   `OPENAI_*` variables
//! - **Graceful Shutdown**: SIGTERM and Ctrl+C
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//!
//! ## Protected Endpoints (API Key Required)
//!
//! - `POST /api/v1/embed` - Embed a text
//! - `POST /api/v1/search` - Semantic search over stored notes
//! - `POST /api/v1/summarize` - Summary and keywords for a note or text
//! - `GET /api/v1/notes/{id}/ai-meta` - Stored summary and keywords of a note
//! - `POST /api/v1/documents` - Insert or replace a note
//! - `GET /api/v1/documents/{id}` - Get a note by ID

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
pub use store::{DocumentFilter, DocumentStore, InMemoryDocumentStore, NoteAiMeta, StoreError};
