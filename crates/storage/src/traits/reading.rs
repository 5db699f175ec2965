use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use readoku_core::{LedgerTotals, ReadingEvent, ReadingEventId, ReadingWindows, StoryId, UserId};

use crate::error::StorageError;

/// Append-only reading ledger.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Append a reading event and return it with its assigned id.
    async fn append_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
        word_count: u32,
        read_at: DateTime<Utc>,
    ) -> Result<ReadingEvent, StorageError>;

    /// Most recent event for the pair, by `read_at` then id, both descending.
    async fn latest_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<Option<ReadingEvent>, StorageError>;

    /// Delete an event owned by `user_id`. Returns `true` if a row was deleted;
    /// a foreign or unknown id deletes nothing.
    async fn delete_reading_event(
        &self,
        id: ReadingEventId,
        user_id: UserId,
    ) -> Result<bool, StorageError>;

    /// Number of events for the pair.
    async fn count_reading_events(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<u64, StorageError>;

    /// Word totals for every window in `windows`, plus the recent window
    /// grouped by calendar day at `offset` (days without events omitted).
    ///
    /// All figures come from one snapshot of the ledger.
    async fn ledger_totals(
        &self,
        user_id: UserId,
        windows: &ReadingWindows,
        offset: FixedOffset,
    ) -> Result<LedgerTotals, StorageError>;
}
