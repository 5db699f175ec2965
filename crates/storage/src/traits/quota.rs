use async_trait::async_trait;
use chrono::{DateTime, Utc};
use readoku_core::{QuotaState, UserId};

use crate::error::StorageError;

/// Generation quota columns of the user row.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Get the stored (not effective) quota state. `None` if the user does not exist.
    async fn get_quota_state(&self, user_id: UserId) -> Result<Option<QuotaState>, StorageError>;

    /// Overwrite `(generation_count, last_generation_at)`.
    /// Returns `false` if the user row does not exist.
    async fn update_generation_status(
        &self,
        user_id: UserId,
        generation_count: u32,
        last_generation_at: DateTime<Utc>,
    ) -> Result<bool, StorageError>;
}

/// Minimal user provisioning; account management lives with the auth service.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user with an empty quota. Fails with `Duplicate` on a taken email.
    async fn create_user(&self, email: &str) -> Result<UserId, StorageError>;
}
