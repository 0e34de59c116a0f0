use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use semantic::ProviderConfig;

use crate::retry::{execute_with_retry_async, RetryConfig};
use crate::types::{SummaryOrigin, SummaryResult};
use crate::SummarizeError;

/// System message constraining the model to bare JSON.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes text and extracts \
concise keywords. Respond ONLY with JSON of the form {\"summary\": string, \"keywords\": \
[string, ...]} without any commentary.";

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.2;

/// User message: the instruction followed by the note text.
pub fn build_prompt(text: &str) -> String {
    format!(
        "Write a concise summary of the following text and extract 5-10 representative \
         keywords. Return JSON: {{\"summary\": string, \"keywords\": [string]}}. Text:\n\n{text}"
    )
}

/// Why a completion call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// Connection failure or timeout.
    #[error("HTTP request failed: {0}")]
    Transport(String),
    /// Non-2xx answer.
    #[error("HTTP error {0}: {1}")]
    Status(u16, String),
    /// The response body was not a completion envelope.
    #[error("invalid completion response: {0}")]
    Envelope(String),
    /// The envelope decoded but held no choices.
    #[error("completion response had no choices")]
    NoChoices,
}

impl CompletionError {
    /// Everything except an empty choice list is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CompletionError::NoChoices)
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// One request; returns the first choice's message content.
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}

/// Completion envelope, only the parts we read.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
pub struct ChatCompletionProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionProvider {
    /// # Errors
    /// [`SummarizeError::ProviderUnavailable`] when the API key is blank or
    /// the HTTP client cannot be built.
    pub fn new(cfg: &ProviderConfig) -> Result<Self, SummarizeError> {
        if !cfg.is_configured() {
            return Err(SummarizeError::ProviderUnavailable("api_key is empty".into()));
        }
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| SummarizeError::ProviderUnavailable(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint("chat/completions"),
            api_key: cfg.api_key.trim().to_string(),
            model: cfg.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionProvider {
    fn name(&self) -> &str {
        "openai-chat"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": TEMPERATURE,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status(status.as_u16(), body));
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Envelope(e.to_string()))?;

        envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(CompletionError::NoChoices)
    }
}

/// The JSON shape the model is asked for.
#[derive(Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Slice from the first `{` to the last `}`, or the whole input when there
/// is no such pair.
pub fn extract_json(content: &str) -> &str {
    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    }
}

/// Decodes model output into a summary and trimmed, non-empty keywords.
///
/// # Errors
/// [`SummarizeError::PartialDecode`] when the extracted text is not the
/// expected JSON object.
pub fn decode_summary(content: &str) -> Result<(String, Vec<String>), SummarizeError> {
    let payload: SummaryPayload = serde_json::from_str(extract_json(content))
        .map_err(|e| SummarizeError::PartialDecode(e.to_string()))?;
    let keywords = payload
        .keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    Ok((payload.summary.trim().to_string(), keywords))
}

/// Turns raw model output into a result, falling back to the raw text as
/// the summary when it does not decode.
pub fn parse_completion(content: &str) -> SummaryResult {
    let content = content.trim();
    match decode_summary(content) {
        Ok((summary, keywords)) => SummaryResult {
            summary,
            keywords,
            origin: SummaryOrigin::Remote,
        },
        Err(err) => {
            debug!(error = %err, "using raw completion text as summary");
            SummaryResult {
                summary: content.to_string(),
                keywords: Vec::new(),
                origin: SummaryOrigin::RemoteRaw,
            }
        }
    }
}

/// Remote summary with bounded retries.
#[derive(Clone)]
pub struct RemoteSummarizer {
    provider: std::sync::Arc<dyn CompletionProvider>,
    retry: RetryConfig,
}

impl RemoteSummarizer {
    pub fn new(provider: std::sync::Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// # Errors
    /// [`SummarizeError::ProviderUnavailable`] when every attempt failed or
    /// the provider returned no choices.
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        let prompt = build_prompt(text);
        let prompt = prompt.as_str();
        let provider = self.provider.as_ref();

        let outcome =
            execute_with_retry_async(&self.retry, CompletionError::is_retryable, |attempt| {
                if attempt > 0 {
                    debug!(provider = provider.name(), attempt, "retrying completion");
                }
                provider.complete(SYSTEM_PROMPT, prompt)
            })
            .await;

        let attempts = outcome.attempts;
        match outcome.into_result() {
            Ok(content) => Ok(parse_completion(&content)),
            Err(err) => {
                warn!(provider = provider.name(), attempts, error = %err, "completion failed");
                Err(SummarizeError::ProviderUnavailable(err.to_string()))
            }
        }
    }
}
