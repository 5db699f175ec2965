//! Story text generation.

use async_trait::async_trait;

use crate::ai_types::{ChatRequest, Message, ResponseFormat};
use crate::client::LlmClient;
use crate::error::LlmError;

const SYSTEM_PROMPT: &str = "You write short graded-reader stories in plain English for \
language learners. Use simple vocabulary and short sentences. Reply with the story text only, \
without a title or commentary.";

/// Produces story text for a user prompt.
///
/// Implementations must not touch the ledger; quota accounting happens around
/// the call.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl StoryGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::new("system", SYSTEM_PROMPT), Message::new("user", prompt)],
            response_format: ResponseFormat { format_type: "text".to_owned() },
        };
        let text = self.chat_completion(&request).await?;
        tracing::debug!(model = %self.model, chars = text.len(), "story generated");
        Ok(text.trim().to_owned())
    }
}
