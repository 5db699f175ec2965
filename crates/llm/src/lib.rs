//! Story text generation for readoku.
//!
//! [`LlmClient`] talks to an OpenAI-compatible chat-completion endpoint with
//! bounded retry; the service layer only sees the [`StoryGenerator`] trait.

mod ai_types;
mod client;
mod error;
mod story;

#[cfg(test)]
mod retry_tests;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, ENV_LLM_MODEL, LlmClient, truncate};
pub use error::LlmError;
pub use story::StoryGenerator;
