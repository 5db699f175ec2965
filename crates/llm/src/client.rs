use std::fmt;
use std::time::Duration;

use crate::ai_types::{ChatRequest, ChatResponse};
use crate::error::LlmError;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default chat model for story text.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Environment override for the model name.
pub const ENV_LLM_MODEL: &str = "READOKU_LLM_MODEL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Wait before each attempt, in seconds. The first attempt goes out immediately.
const BACKOFF_SECS: [u64; 4] = [0, 1, 2, 4];

/// Error bodies are cut to this many bytes before they reach logs or errors.
const BODY_PREVIEW_LEN: usize = 200;

/// Outcome of a single HTTP round trip.
enum Attempt {
    Text(String),
    Retry(LlmError),
}

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
}

impl fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    /// Build a client for `base_url` (trailing slashes ignored).
    ///
    /// The model comes from `READOKU_LLM_MODEL` when set, else [`DEFAULT_MODEL`].
    ///
    /// # Errors
    /// `ClientInit` if the TLS backend cannot be initialised.
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        let model = match std::env::var(ENV_LLM_MODEL) {
            Ok(m) if !m.trim().is_empty() => m,
            _ => DEFAULT_MODEL.to_owned(),
        };
        Ok(Self { client, api_key, base_url: base_url.trim_end_matches('/').to_owned(), model })
    }

    #[must_use]
    pub fn with_model(self, model: String) -> Self {
        Self { model, ..self }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Run `request` and return the first choice's text.
    ///
    /// Connection failures, 429 and 5xx gateway statuses are retried on the
    /// [`BACKOFF_SECS`] schedule. A malformed body or a non-transient status
    /// fails at once.
    pub(crate) async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let mut last_error = LlmError::EmptyResponse;

        for (attempt, wait) in BACKOFF_SECS.into_iter().enumerate() {
            if wait > 0 {
                tracing::warn!(
                    attempt,
                    wait_secs = wait,
                    error = %last_error,
                    "retrying story generation request"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
            }

            match self.attempt(request).await? {
                Attempt::Text(text) => return Ok(text),
                Attempt::Retry(err) => last_error = err,
            }
        }

        Err(LlmError::RetriesExhausted(Box::new(last_error)))
    }

    /// One round trip. `Err` is final; `Ok(Attempt::Retry)` may be retried.
    async fn attempt(&self, request: &ChatRequest) -> Result<Attempt, LlmError> {
        let response = match self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Ok(Attempt::Retry(LlmError::HttpRequest(e))),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return Ok(Attempt::Retry(LlmError::HttpRequest(e))),
        };

        if !status.is_success() {
            let err = LlmError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, BODY_PREVIEW_LEN).to_owned(),
            };
            return if err.is_transient() { Ok(Attempt::Retry(err)) } else { Err(err) };
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|source| {
            LlmError::JsonParse {
                context: format!("chat completion (body: {})", truncate(&body, BODY_PREVIEW_LEN)),
                source,
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .map(Attempt::Text)
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Longest prefix of `s` that fits in `max_len` bytes without splitting a char.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let end = s.char_indices().map(|(i, _)| i).take_while(|&i| i <= max_len).last().unwrap_or(0);
    s.get(..end).unwrap_or_default()
}
