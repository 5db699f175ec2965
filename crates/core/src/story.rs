use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{StoryId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub word_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Listing row; content is left out of paginated lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummary {
    pub id: StoryId,
    pub user_id: UserId,
    pub title: String,
    pub word_count: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Story> for StorySummary {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id,
            user_id: story.user_id,
            title: story.title.clone(),
            word_count: story.word_count,
            created_at: story.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub word_count: u32,
    pub created_at: DateTime<Utc>,
}

impl NewStory {
    /// Build a story from generated text; the word count is derived here.
    #[must_use]
    pub fn from_generated(
        user_id: UserId,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let word_count = count_words(&content);
        Self { user_id, title, content, word_count, created_at }
    }
}

/// Story with the number of times its owner marked it read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDetail {
    #[serde(flatten)]
    pub story: Story,
    pub read_count: u64,
}

/// Whitespace-separated token count, saturating at `u32::MAX`.
#[must_use]
pub fn count_words(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}
