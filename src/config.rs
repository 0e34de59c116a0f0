//! YAML configuration for notelens.
//!
//! One file describes both providers and the local summarizer limits. Every
//! section is optional; a missing API key simply keeps that path local.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! embedding:
//!   api_key: "sk-..."
//!   base_url: "https://api.openai.com/v1"
//!   model: "text-embedding-3-small"
//!   timeout_secs: 30
//!
//! completion:
//!   api_key: "sk-..."
//!   model: "gpt-4o-mini"
//!
//! local_summary:
//!   max_sentences: 3
//!   max_summary_chars: 300
//!   max_keywords: 8
//!   min_keyword_chars: 2
//! ```
//!
//! Blank provider fields are filled from `OPENAI_API_KEY`, `OPENAI_BASE_URL`,
//! `OPENAI_MODEL`, `OPENAI_EMBEDDING_MODEL` and `OPENAI_TIMEOUT_SECONDS` by
//! [`NotelensConfig::apply_env`]. Values written in the file win unless they
//! equal the built-in default.

use std::fs;
use std::path::Path;

use semantic::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use summarize::LocalSummaryConfig;
use thiserror::Error;

/// Chat model used when neither the file nor the environment names one.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Embedding model used when neither the file nor the environment names one.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Everything the content-intelligence services need, passed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotelensConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Remote `/embeddings` provider.
    #[serde(default = "default_embedding")]
    pub embedding: ProviderConfig,

    /// Remote `/chat/completions` provider.
    #[serde(default = "default_completion")]
    pub completion: ProviderConfig,

    #[serde(default)]
    pub local_summary: LocalSummaryConfig,
}

impl NotelensConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let mut config: NotelensConfig = serde_yaml::from_str(yaml)?;
        config.fill_default_models();
        config.validate()?;
        Ok(config)
    }

    /// Fills blank or defaulted provider fields from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Same as [`apply_env`](Self::apply_env) with an injectable lookup.
    ///
    /// `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `OPENAI_TIMEOUT_SECONDS` feed
    /// both providers. `OPENAI_MODEL` names the chat model and
    /// `OPENAI_EMBEDDING_MODEL` the embedding model.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY");
        let base_url = get("OPENAI_BASE_URL");
        let timeout = get("OPENAI_TIMEOUT_SECONDS").and_then(|v| v.trim().parse::<u64>().ok());

        for (provider, model, default_model) in [
            (
                &mut self.embedding,
                get("OPENAI_EMBEDDING_MODEL"),
                DEFAULT_EMBEDDING_MODEL,
            ),
            (
                &mut self.completion,
                get("OPENAI_MODEL"),
                DEFAULT_COMPLETION_MODEL,
            ),
        ] {
            if provider.api_key.trim().is_empty() {
                if let Some(key) = &api_key {
                    provider.api_key = key.trim().to_string();
                }
            }
            if provider.base_url.trim().is_empty() || provider.base_url == DEFAULT_BASE_URL {
                if let Some(url) = &base_url {
                    provider.base_url = url.trim().to_string();
                }
            }
            if provider.model.trim().is_empty() || provider.model == default_model {
                if let Some(model) = model {
                    provider.model = model.trim().to_string();
                }
            }
            if provider.timeout_secs == DEFAULT_TIMEOUT_SECS || provider.timeout_secs == 0 {
                if let Some(secs) = timeout {
                    provider.timeout_secs = secs;
                }
            }
        }
    }

    /// A section that omits `model` still gets a usable one.
    fn fill_default_models(&mut self) {
        if self.embedding.model.trim().is_empty() {
            self.embedding.model = DEFAULT_EMBEDDING_MODEL.to_string();
        }
        if self.completion.model.trim().is_empty() {
            self.completion.model = DEFAULT_COMPLETION_MODEL.to_string();
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        validate_provider("embedding", &self.embedding)?;
        validate_provider("completion", &self.completion)?;

        let local = &self.local_summary;
        if local.max_sentences == 0 {
            return Err(ConfigLoadError::Validation(
                "local_summary.max_sentences must be >= 1".to_string(),
            ));
        }
        if local.max_summary_chars == 0 {
            return Err(ConfigLoadError::Validation(
                "local_summary.max_summary_chars must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_provider(section: &str, provider: &ProviderConfig) -> Result<(), ConfigLoadError> {
    let base = provider.base_url.trim();
    if !base.is_empty() && !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigLoadError::Validation(format!(
            "{section}.base_url must start with http:// or https://"
        )));
    }
    if provider.timeout_secs > 600 {
        return Err(ConfigLoadError::Validation(format!(
            "{section}.timeout_secs must be <= 600"
        )));
    }
    Ok(())
}

impl Default for NotelensConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            embedding: default_embedding(),
            completion: default_completion(),
            local_summary: LocalSummaryConfig::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_embedding() -> ProviderConfig {
    ProviderConfig {
        model: DEFAULT_EMBEDDING_MODEL.to_string(),
        ..ProviderConfig::default()
    }
}

fn default_completion() -> ProviderConfig {
    ProviderConfig {
        model: DEFAULT_COMPLETION_MODEL.to_string(),
        ..ProviderConfig::default()
    }
}
