//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use readoku_core::{
    LedgerTotals, NewStory, QuotaState, ReadingEvent, ReadingEventId, ReadingWindows, Story,
    StoryId, StorySummary, UserId,
};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{QuotaStore, ReadingStore, StoryStore, UserStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    /// Liveness probe for the backing store.
    pub async fn ping(&self) -> Result<(), StorageError> {
        match self {
            Self::Postgres(s) => s.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── QuotaStore ───────────────────────────────────────────────────

#[async_trait]
impl QuotaStore for StorageBackend {
    async fn get_quota_state(&self, user_id: UserId) -> Result<Option<QuotaState>, StorageError> {
        dispatch!(self, QuotaStore, get_quota_state(user_id))
    }

    async fn update_generation_status(
        &self,
        user_id: UserId,
        generation_count: u32,
        last_generation_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        dispatch!(
            self,
            QuotaStore,
            update_generation_status(user_id, generation_count, last_generation_at)
        )
    }
}

// ── UserStore ────────────────────────────────────────────────────

#[async_trait]
impl UserStore for StorageBackend {
    async fn create_user(&self, email: &str) -> Result<UserId, StorageError> {
        dispatch!(self, UserStore, create_user(email))
    }
}

// ── StoryStore ───────────────────────────────────────────────────

#[async_trait]
impl StoryStore for StorageBackend {
    async fn create_story(&self, story: &NewStory) -> Result<Story, StorageError> {
        dispatch!(self, StoryStore, create_story(story))
    }

    async fn get_owned_story(
        &self,
        story_id: StoryId,
        user_id: UserId,
    ) -> Result<Option<Story>, StorageError> {
        dispatch!(self, StoryStore, get_owned_story(story_id, user_id))
    }

    async fn count_user_stories(&self, user_id: UserId) -> Result<u64, StorageError> {
        dispatch!(self, StoryStore, count_user_stories(user_id))
    }

    async fn list_user_stories(
        &self,
        user_id: UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<StorySummary>, StorageError> {
        dispatch!(self, StoryStore, list_user_stories(user_id, limit, offset))
    }
}

// ── ReadingStore ─────────────────────────────────────────────────

#[async_trait]
impl ReadingStore for StorageBackend {
    async fn append_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
        word_count: u32,
        read_at: DateTime<Utc>,
    ) -> Result<ReadingEvent, StorageError> {
        dispatch!(self, ReadingStore, append_reading_event(user_id, story_id, word_count, read_at))
    }

    async fn latest_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<Option<ReadingEvent>, StorageError> {
        dispatch!(self, ReadingStore, latest_reading_event(user_id, story_id))
    }

    async fn delete_reading_event(
        &self,
        id: ReadingEventId,
        user_id: UserId,
    ) -> Result<bool, StorageError> {
        dispatch!(self, ReadingStore, delete_reading_event(id, user_id))
    }

    async fn count_reading_events(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<u64, StorageError> {
        dispatch!(self, ReadingStore, count_reading_events(user_id, story_id))
    }

    async fn ledger_totals(
        &self,
        user_id: UserId,
        windows: &ReadingWindows,
        offset: FixedOffset,
    ) -> Result<LedgerTotals, StorageError> {
        dispatch!(self, ReadingStore, ledger_totals(user_id, windows, offset))
    }
}
