//! Daily generation quota arithmetic.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ReferenceClock;
use crate::constants::DEFAULT_DAILY_GENERATION_LIMIT;
use crate::error::CoreError;
use crate::ids::UserId;

/// Stored quota columns of a user row.
///
/// `generation_count` is only meaningful for the day containing
/// `last_generation_at`; it is reset lazily by [`QuotaState::effective_count`],
/// never eagerly in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaState {
    pub user_id: UserId,
    pub generation_count: u32,
    pub last_generation_at: Option<DateTime<Utc>>,
}

impl QuotaState {
    /// The count that applies as of `now` after the day-boundary reset.
    #[must_use]
    pub fn effective_count(&self, clock: &ReferenceClock, now: DateTime<Utc>) -> u32 {
        match self.last_generation_at {
            Some(last) if last >= clock.day_start(now) => self.generation_count,
            _ => 0,
        }
    }
}

/// Per-user daily generation cap. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyLimit(NonZeroU32);

impl Default for DailyLimit {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_DAILY_GENERATION_LIMIT).unwrap_or(NonZeroU32::MIN))
    }
}

impl DailyLimit {
    /// Validate a configured limit; zero or negative is a configuration error.
    pub fn new(limit: i64) -> Result<Self, CoreError> {
        u32::try_from(limit)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| CoreError::Config {
                var: "DAILY_GENERATION_LIMIT",
                reason: format!("must be a positive integer, got {limit}"),
            })
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Whether another generation is allowed at `effective_count`.
    #[must_use]
    pub const fn allows(self, effective_count: u32) -> bool {
        effective_count < self.0.get()
    }
}

/// Read-only view for the client: how many generations were used today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub current_count: u32,
    pub limit: u32,
    pub remaining: u32,
}

impl GenerationStatus {
    #[must_use]
    pub const fn new(current_count: u32, limit: DailyLimit) -> Self {
        Self {
            current_count,
            limit: limit.get(),
            remaining: limit.get().saturating_sub(current_count),
        }
    }
}
