use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ReadingEventId, StoryId, UserId};

/// One "mark as read" action. Immutable once written; only the most recent
/// event of a `(user, story)` pair may be removed, by undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEvent {
    pub id: ReadingEventId,
    pub user_id: UserId,
    pub story_id: StoryId,
    pub word_count: u32,
    pub read_at: DateTime<Utc>,
}

impl ReadingEvent {
    /// Ordering key for "most recent": `read_at`, then id.
    #[must_use]
    pub const fn recency_key(&self) -> (DateTime<Utc>, ReadingEventId) {
        (self.read_at, self.id)
    }
}

/// Word-count sum for one calendar day in the reference timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWordCount {
    pub date: NaiveDate,
    pub word_count: u64,
}

/// Word totals for every statistics window, read from one view of the ledger
/// so a concurrent mark or undo shows up in all of them or in none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub total: u64,
    pub today: u64,
    pub week: u64,
    pub month: u64,
    pub year: u64,
    /// Per-day sums over the recent window; days without events are omitted.
    pub daily: Vec<DailyWordCount>,
}
