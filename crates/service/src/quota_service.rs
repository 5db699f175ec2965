use std::sync::Arc;

use chrono::{DateTime, Utc};
use readoku_core::{DailyLimit, GenerationStatus, ReferenceClock, UserId};
use readoku_storage::StorageBackend;
use readoku_storage::traits::QuotaStore;

use crate::error::{ServiceError, store_failure};

/// Proof that a generation was admitted, carrying the effective count seen
/// at check time. Consumed by [`QuotaService::commit`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a permit must be committed once the generation succeeds"]
pub struct GenerationPermit {
    user_id: UserId,
    effective_count: u32,
}

impl GenerationPermit {
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    pub const fn effective_count(&self) -> u32 {
        self.effective_count
    }
}

/// Per-user daily generation gate.
///
/// Check and commit are separate round trips with the generator call in
/// between and no row lock, so two concurrent requests may both be admitted.
pub struct QuotaService {
    storage: Arc<StorageBackend>,
    clock: ReferenceClock,
}

impl QuotaService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, clock: ReferenceClock) -> Self {
        Self { storage, clock }
    }

    async fn effective_count(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<u32, ServiceError> {
        let state = self
            .storage
            .get_quota_state(user_id)
            .await
            .map_err(store_failure("get_quota_state", user_id, None))?
            .ok_or_else(|| ServiceError::user_not_found(user_id))?;
        Ok(state.effective_count(&self.clock, now))
    }

    /// Admit one generation if the effective count is below `limit`.
    pub async fn check_and_reserve(
        &self,
        user_id: UserId,
        limit: DailyLimit,
        now: DateTime<Utc>,
    ) -> Result<GenerationPermit, ServiceError> {
        let effective_count = self.effective_count(user_id, now).await?;
        if !limit.allows(effective_count) {
            tracing::debug!(
                user_id = %user_id,
                effective_count,
                limit = limit.get(),
                "generation limit reached"
            );
            return Err(ServiceError::LimitExceeded { limit: limit.get() });
        }
        Ok(GenerationPermit { user_id, effective_count })
    }

    /// Record a successful generation. Best effort: failures are logged and
    /// swallowed, leaving that generation uncounted.
    pub async fn commit(&self, permit: GenerationPermit, now: DateTime<Utc>) {
        let next = permit.effective_count.saturating_add(1);
        match self.storage.update_generation_status(permit.user_id, next, now).await {
            Ok(true) => {
                tracing::debug!(
                    user_id = %permit.user_id,
                    generation_count = next,
                    "generation recorded"
                );
            },
            Ok(false) => {
                tracing::warn!(
                    user_id = %permit.user_id,
                    "user vanished before quota commit, generation not counted"
                );
            },
            Err(e) => {
                tracing::warn!(
                    user_id = %permit.user_id,
                    error = %e,
                    "failed to record generation, not counted against quota"
                );
            },
        }
    }

    /// Read-only view of today's usage.
    pub async fn generation_status(
        &self,
        user_id: UserId,
        limit: DailyLimit,
        now: DateTime<Utc>,
    ) -> Result<GenerationStatus, ServiceError> {
        let current = self.effective_count(user_id, now).await?;
        Ok(GenerationStatus::new(current, limit))
    }
}
