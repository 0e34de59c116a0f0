use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for an OpenAI-compatible provider.
///
/// The same shape drives both the embedding endpoint and the chat-completion
/// endpoint; only the model differs in practice. A provider whose
/// [`api_key`](Self::api_key) is blank counts as "not configured" and is
/// never called.
///
/// # Example
/// ```
/// use semantic::ProviderConfig;
///
/// let cfg = ProviderConfig {
///     api_key: "sk-test".into(),
///     model: "text-embedding-3-small".into(),
///     ..Default::default()
/// };
/// assert!(cfg.is_configured());
/// assert_eq!(cfg.endpoint("embeddings"), "https://api.openai.com/v1/embeddings");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bearer token sent as `Authorization: Bearer <key>`.
    pub api_key: String,
    /// Base URL without the trailing endpoint path, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model name forwarded verbatim in the request body.
    pub model: String,
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
}

/// Default base URL for OpenAI-compatible providers.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
            model: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Returns `true` when an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Request timeout; zero falls back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        let base = if self.base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.base_url.trim()
        };
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let cfg = ProviderConfig::default();
        assert!(!cfg.is_configured());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn whitespace_key_is_not_configured() {
        let cfg = ProviderConfig {
            api_key: "   ".into(),
            ..Default::default()
        };
        assert!(!cfg.is_configured());
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let cfg = ProviderConfig {
            base_url: "http://127.0.0.1:9000/v1/".into(),
            ..Default::default()
        };
        assert_eq!(
            cfg.endpoint("/chat/completions"),
            "http://127.0.0.1:9000/v1/chat/completions"
        );
    }

    #[test]
    fn blank_base_url_uses_default() {
        let cfg = ProviderConfig {
            base_url: "".into(),
            ..Default::default()
        };
        assert_eq!(cfg.endpoint("embeddings"), "https://api.openai.com/v1/embeddings");
    }

    #[test]
    fn zero_timeout_uses_default() {
        let cfg = ProviderConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn partial_yaml_like_input_fills_defaults() {
        let cfg: ProviderConfig =
            serde_json::from_str(r#"{"api_key":"k","model":"gpt-4o-mini"}"#).unwrap();
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
