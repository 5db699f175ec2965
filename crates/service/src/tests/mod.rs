use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use readoku_core::{LedgerConfig, NewStory, ReferenceClock, Story, UserId};
use readoku_llm::{LlmError, StoryGenerator};
use readoku_storage::traits::{StoryStore, UserStore};
use readoku_storage::{MemoryStorage, StorageBackend};


pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

pub fn tokyo() -> ReferenceClock {
    ReferenceClock::default()
}

/// Memory store plus a backend sharing its state, so tests can flip it read-only.
pub fn create_test_backend() -> (MemoryStorage, Arc<StorageBackend>) {
    let memory = MemoryStorage::new();
    let backend = Arc::new(StorageBackend::Memory(memory.clone()));
    (memory, backend)
}

pub async fn create_test_user(storage: &MemoryStorage) -> UserId {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    storage.create_user(&format!("user{n}@example.com")).await.unwrap()
}

pub async fn create_test_story(storage: &MemoryStorage, user_id: UserId, words: usize) -> Story {
    let content = vec!["word"; words].join(" ");
    let story = NewStory::from_generated(
        user_id,
        "test".to_owned(),
        content,
        at("2024-06-01T00:00:00Z"),
    );
    storage.create_story(&story).await.unwrap()
}

pub fn test_config(limit: i64) -> LedgerConfig {
    LedgerConfig {
        daily_limit: readoku_core::DailyLimit::new(limit).unwrap(),
        ..LedgerConfig::default()
    }
}

/// Generator returning a fixed text or a fixed failure.
pub struct FakeGenerator {
    reply: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Some(text.to_owned()), calls: AtomicUsize::new(0) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: None, calls: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl StoryGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(LlmError::HttpStatus { code: 503, body: "down".to_owned() })
    }
}
