use crate::config::ServerConfig;
use crate::store::{DocumentStore, InMemoryDocumentStore};
use dashmap::DashMap;
use notelens::ContentIntelligence;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: API key -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, std::time::Instant)>>,

    /// Embedding, search and summary services (shared across requests)
    pub intelligence: ContentIntelligence,

    /// Document collaborator
    pub store: Arc<dyn DocumentStore>,
}

impl ServerState {
    /// State with an empty in-memory store.
    pub fn new(config: ServerConfig, intelligence: ContentIntelligence) -> Self {
        Self::with_store(config, intelligence, Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn with_store(
        config: ServerConfig,
        intelligence: ContentIntelligence,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            intelligence,
            store,
        }
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Check rate limit for API key
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = std::time::Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}
