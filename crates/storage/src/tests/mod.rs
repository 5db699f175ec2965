use chrono::{DateTime, Utc};
use readoku_core::{NewStory, Story, UserId};

use crate::MemoryStorage;
use crate::traits::{StoryStore, UserStore};

mod ledger_tests;
mod story_tests;

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

pub async fn create_test_user(storage: &MemoryStorage, email: &str) -> UserId {
    storage.create_user(email).await.unwrap()
}

pub async fn create_test_story(
    storage: &MemoryStorage,
    user_id: UserId,
    words: &str,
    created_at: &str,
) -> Story {
    let story =
        NewStory::from_generated(user_id, "test".to_owned(), words.to_owned(), at(created_at));
    storage.create_story(&story).await.unwrap()
}
