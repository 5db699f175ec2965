//! Failures of the story text generator.

use thiserror::Error;

/// Gateway statuses worth another attempt (rate limit, overload, upstream hiccups).
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 529];

#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection, timeout or body-read failure.
    #[error("generator request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Endpoint answered with a non-2xx status; `body` is a truncated preview.
    #[error("generator returned HTTP {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("unreadable generator response ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// No choices, or the first choice is blank.
    #[error("generator returned no story text")]
    EmptyResponse,
    #[error("could not build HTTP client: {0}")]
    ClientInit(String),
    #[error("generator still failing after retries: {0}")]
    RetriesExhausted(Box<LlmError>),
}

impl LlmError {
    /// Whether a fresh attempt could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => RETRYABLE_STATUSES.contains(code),
            Self::JsonParse { .. }
            | Self::EmptyResponse
            | Self::ClientInit(_)
            | Self::RetriesExhausted(_) => false,
        }
    }
}
