use std::sync::Arc;

use chrono::{DateTime, Utc};
use readoku_core::{ReadingWindows, ReferenceClock, StatsSnapshot, UserId, zero_filled_series};
use readoku_storage::StorageBackend;
use readoku_storage::traits::ReadingStore;

use crate::error::{ServiceError, store_failure};

/// Word-count statistics over the reading ledger. Nothing is cached; every
/// snapshot is read from the store in one consistent pass.
pub struct StatsService {
    storage: Arc<StorageBackend>,
    clock: ReferenceClock,
    days: u32,
}

impl StatsService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, clock: ReferenceClock, days: u32) -> Self {
        Self { storage, clock, days }
    }

    pub async fn compute_stats(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<StatsSnapshot, ServiceError> {
        let windows = ReadingWindows::at(&self.clock, now, self.days)?;
        let totals = self
            .storage
            .ledger_totals(user_id, &windows, self.clock.offset())
            .await
            .map_err(store_failure("compute_stats", user_id, None))?;

        Ok(StatsSnapshot {
            total_word_count: totals.total,
            today_word_count: totals.today,
            weekly_word_count: totals.week,
            monthly_word_count: totals.month,
            yearly_word_count: totals.year,
            daily_word_count_last_n_days: zero_filled_series(&windows.recent_dates, &totals.daily),
        })
    }
}
