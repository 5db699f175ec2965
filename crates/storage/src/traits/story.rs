use async_trait::async_trait;
use readoku_core::{NewStory, Story, StoryId, StorySummary, UserId};

use crate::error::StorageError;

/// The slice of story persistence the ledger depends on.
#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Persist a story and return it with its assigned id.
    async fn create_story(&self, story: &NewStory) -> Result<Story, StorageError>;

    /// Get a story only if it exists and belongs to `user_id`.
    async fn get_owned_story(
        &self,
        story_id: StoryId,
        user_id: UserId,
    ) -> Result<Option<Story>, StorageError>;

    /// Number of stories owned by the user.
    async fn count_user_stories(&self, user_id: UserId) -> Result<u64, StorageError>;

    /// Page of the user's stories, newest first.
    async fn list_user_stories(
        &self,
        user_id: UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<StorySummary>, StorageError>;
}
