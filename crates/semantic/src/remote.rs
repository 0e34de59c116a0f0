use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{ProviderConfig, SemanticError};

/// Something that can turn text into a vector over the network.
///
/// Implementations return the vector exactly as the provider produced it:
/// no normalization, no padding. Any failure, including an empty result,
/// is reported as [`SemanticError::Provider`].
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError>;
}

/// OpenAI-compatible `/embeddings` client.
pub struct OpenAiEmbeddingProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddingProvider {
    /// Builds a client bound to `cfg`.
    ///
    /// # Errors
    /// [`SemanticError::InvalidConfig`] when the API key is blank or the
    /// HTTP client cannot be constructed.
    pub fn new(cfg: &ProviderConfig) -> Result<Self, SemanticError> {
        if !cfg.is_configured() {
            return Err(SemanticError::InvalidConfig("api_key is empty".into()));
        }
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| SemanticError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint("embeddings"),
            api_key: cfg.api_key.trim().to_string(),
            model: cfg.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn name(&self) -> &str {
        "openai-embeddings"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let payload = json!({ "model": self.model, "input": [text] });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SemanticError::Provider(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SemanticError::Provider(format!("HTTP error {status}: {body}")));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| SemanticError::Provider(format!("Invalid JSON response: {e}")))?;

        first_embedding(value)
    }
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

/// Pulls `data[0].embedding` out of an `/embeddings` response.
pub fn first_embedding(value: Value) -> Result<Vec<f32>, SemanticError> {
    let response: EmbeddingsResponse = serde_json::from_value(value)
        .map_err(|e| SemanticError::Provider(format!("unexpected embeddings response: {e}")))?;
    let vector = response
        .data
        .into_iter()
        .next()
        .map(|item| item.embedding)
        .ok_or_else(|| SemanticError::Provider("response did not contain embeddings".into()))?;
    if vector.is_empty() {
        return Err(SemanticError::Provider("provider returned an empty vector".into()));
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_shape() {
        let v = first_embedding(json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.2, 3]}],
            "model": "text-embedding-3-small"
        }))
        .unwrap();
        assert_eq!(v, vec![0.1, 0.2, 3.0]);
    }

    #[test]
    fn only_first_data_item_is_used() {
        let v = first_embedding(json!({
            "data": [{"embedding": [1, 2]}, {"embedding": [9, 9]}]
        }))
        .unwrap();
        assert_eq!(v, vec![1.0, 2.0]);
    }

    #[test]
    fn non_openai_shapes_are_rejected() {
        assert!(first_embedding(json!({"embeddings": [[1.0, 2.0]]})).is_err());
        assert!(first_embedding(json!([0.5, 0.5])).is_err());
        assert!(first_embedding(json!([[7], [8]])).is_err());
    }

    #[test]
    fn remote_values_are_not_normalized() {
        let v = first_embedding(json!({"data": [{"embedding": [3.0, 4.0]}]})).unwrap();
        assert_eq!(v, vec![3.0, 4.0]);
    }

    #[test]
    fn empty_results_are_provider_errors() {
        assert!(matches!(
            first_embedding(json!({"data": []})),
            Err(SemanticError::Provider(_))
        ));
        assert!(matches!(
            first_embedding(json!({"data": [{"embedding": []}]})),
            Err(SemanticError::Provider(_))
        ));
    }

    #[test]
    fn malformed_shapes_are_provider_errors() {
        assert!(first_embedding(json!({"error": "bad"})).is_err());
        assert!(first_embedding(json!({"data": [{"vector": [1]}]})).is_err());
        assert!(first_embedding(json!({"data": ["nope"]})).is_err());
        assert!(first_embedding(json!(["a", "b"])).is_err());
        assert!(first_embedding(json!("text")).is_err());
    }

    #[test]
    fn unconfigured_provider_cannot_be_built() {
        let err = OpenAiEmbeddingProvider::new(&ProviderConfig::default()).err();
        assert!(matches!(err, Some(SemanticError::InvalidConfig(_))));
    }

    #[test]
    fn endpoint_is_derived_from_base_url() {
        let cfg = ProviderConfig {
            api_key: "k".into(),
            base_url: "http://localhost:1234/v1/".into(),
            model: "m".into(),
            timeout_secs: 5,
        };
        let provider = OpenAiEmbeddingProvider::new(&cfg).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:1234/v1/embeddings");
        assert_eq!(provider.name(), "openai-embeddings");
    }
}
