//! Typed error enum for the service layer.
//!
//! `NotFound`, `LimitExceeded` and `NoReadingRecord` are expected outcomes the
//! caller shows to the user. `StoreUnavailable` and `Generation` are faults.

use readoku_core::{CoreError, StoryId, UserId};
use readoku_llm::LlmError;
use readoku_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Story (or user) absent, or not owned by the caller.
    #[error("not found: {0}")]
    NotFound(String),

    /// Daily generation quota used up.
    #[error("daily generation limit of {limit} reached")]
    LimitExceeded { limit: u32 },

    /// Undo with nothing to undo.
    #[error("no reading record to undo")]
    NoReadingRecord,

    /// Any underlying persistence failure.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    /// External text generator failed; quota is not consumed.
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether a retry of the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::StoreUnavailable(e) => e.is_transient(),
            Self::Generation(e) => e.is_transient(),
            _ => false,
        }
    }

    pub(crate) fn story_not_found(story_id: StoryId) -> Self {
        Self::NotFound(format!("story {story_id}"))
    }

    pub(crate) fn user_not_found(user_id: UserId) -> Self {
        Self::NotFound(format!("user {user_id}"))
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Log a store failure with its context and wrap it.
///
/// Transient failures (pool timeout, read-only store) are logged at warn,
/// everything else at error.
pub(crate) fn store_failure(
    operation: &'static str,
    user_id: UserId,
    story_id: Option<StoryId>,
) -> impl FnOnce(StorageError) -> ServiceError {
    move |err| {
        let err = ServiceError::StoreUnavailable(err);
        let story_id = story_id.map(|s| s.0);
        if err.is_transient() {
            tracing::warn!(operation, user_id = %user_id, story_id, error = %err, "store busy");
        } else {
            tracing::error!(
                operation,
                user_id = %user_id,
                story_id,
                error = %err,
                "store operation failed"
            );
        }
        err
    }
}
