//! In-process storage backend.
//!
//! Same semantics as the PostgreSQL backend, with every operation serialized
//! behind one async mutex. Used by `serve --memory` and by tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use readoku_core::{
    DailyWordCount, LedgerTotals, NewStory, QuotaState, ReadingEvent, ReadingEventId,
    ReadingWindows, Story, StoryId, StorySummary, TimeRange, UserId,
};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::traits::{QuotaStore, ReadingStore, StoryStore, UserStore};

#[derive(Debug)]
struct UserRow {
    email: String,
    generation_count: u32,
    last_generation_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, UserRow>,
    stories: BTreeMap<StoryId, Story>,
    readings: BTreeMap<ReadingEventId, ReadingEvent>,
    next_id: i64,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id = self.next_id.saturating_add(1);
        self.next_id
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<State>>,
    read_only: Arc<AtomicBool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every write fails with [`StorageError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store is read-only".into()));
        }
        Ok(())
    }
}

fn sum_words<'a>(events: impl Iterator<Item = &'a ReadingEvent>) -> u64 {
    events.map(|e| u64::from(e.word_count)).fold(0_u64, u64::saturating_add)
}

#[async_trait]
impl QuotaStore for MemoryStorage {
    async fn get_quota_state(&self, user_id: UserId) -> Result<Option<QuotaState>, StorageError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&user_id).map(|u| QuotaState {
            user_id,
            generation_count: u.generation_count,
            last_generation_at: u.last_generation_at,
        }))
    }

    async fn update_generation_status(
        &self,
        user_id: UserId,
        generation_count: u32,
        last_generation_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        Ok(state.users.get_mut(&user_id).is_some_and(|u| {
            u.generation_count = generation_count;
            u.last_generation_at = Some(last_generation_at);
            true
        }))
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn create_user(&self, email: &str) -> Result<UserId, StorageError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == email) {
            return Err(StorageError::Duplicate(format!("email {email} already registered")));
        }
        let id = UserId(state.allocate_id());
        state.users.insert(
            id,
            UserRow { email: email.to_owned(), generation_count: 0, last_generation_at: None },
        );
        Ok(id)
    }
}

#[async_trait]
impl StoryStore for MemoryStorage {
    async fn create_story(&self, story: &NewStory) -> Result<Story, StorageError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&story.user_id) {
            return Err(StorageError::NotFound { entity: "user", id: story.user_id.to_string() });
        }
        let saved = Story {
            id: StoryId(state.allocate_id()),
            user_id: story.user_id,
            title: story.title.clone(),
            content: story.content.clone(),
            word_count: story.word_count,
            created_at: story.created_at,
        };
        state.stories.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn get_owned_story(
        &self,
        story_id: StoryId,
        user_id: UserId,
    ) -> Result<Option<Story>, StorageError> {
        let state = self.state.lock().await;
        Ok(state.stories.get(&story_id).filter(|s| s.user_id == user_id).cloned())
    }

    async fn count_user_stories(&self, user_id: UserId) -> Result<u64, StorageError> {
        let state = self.state.lock().await;
        Ok(state.stories.values().filter(|s| s.user_id == user_id).count() as u64)
    }

    async fn list_user_stories(
        &self,
        user_id: UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<StorySummary>, StorageError> {
        let state = self.state.lock().await;
        let mut owned: Vec<&Story> =
            state.stories.values().filter(|s| s.user_id == user_id).collect();
        owned.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(owned.into_iter().skip(skip).take(take).map(StorySummary::from).collect())
    }
}

#[async_trait]
impl ReadingStore for MemoryStorage {
    async fn append_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
        word_count: u32,
        read_at: DateTime<Utc>,
    ) -> Result<ReadingEvent, StorageError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        if !state.stories.contains_key(&story_id) {
            return Err(StorageError::NotFound { entity: "story", id: story_id.to_string() });
        }
        let event = ReadingEvent {
            id: ReadingEventId(state.allocate_id()),
            user_id,
            story_id,
            word_count,
            read_at,
        };
        state.readings.insert(event.id, event.clone());
        Ok(event)
    }

    async fn latest_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<Option<ReadingEvent>, StorageError> {
        let state = self.state.lock().await;
        Ok(state
            .readings
            .values()
            .filter(|e| e.user_id == user_id && e.story_id == story_id)
            .max_by_key(|e| e.recency_key())
            .cloned())
    }

    async fn delete_reading_event(
        &self,
        id: ReadingEventId,
        user_id: UserId,
    ) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        if state.readings.get(&id).is_some_and(|e| e.user_id == user_id) {
            state.readings.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn count_reading_events(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<u64, StorageError> {
        let state = self.state.lock().await;
        Ok(state
            .readings
            .values()
            .filter(|e| e.user_id == user_id && e.story_id == story_id)
            .count() as u64)
    }

    async fn ledger_totals(
        &self,
        user_id: UserId,
        windows: &ReadingWindows,
        offset: FixedOffset,
    ) -> Result<LedgerTotals, StorageError> {
        let state = self.state.lock().await;
        let events: Vec<&ReadingEvent> =
            state.readings.values().filter(|e| e.user_id == user_id).collect();
        let within = |range: TimeRange| {
            sum_words(events.iter().copied().filter(move |e| range.contains(e.read_at)))
        };

        let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
        for event in events.iter().filter(|e| windows.recent.contains(e.read_at)) {
            let day = event.read_at.with_timezone(&offset).date_naive();
            let total = by_day.entry(day).or_default();
            *total = total.saturating_add(u64::from(event.word_count));
        }
        let mut daily: Vec<DailyWordCount> = by_day
            .into_iter()
            .map(|(date, word_count)| DailyWordCount { date, word_count })
            .collect();
        daily.sort_by_key(|d| d.date);

        Ok(LedgerTotals {
            total: sum_words(events.iter().copied()),
            today: within(windows.today),
            week: within(windows.week),
            month: within(windows.month),
            year: within(windows.year),
            daily,
        })
    }
}
