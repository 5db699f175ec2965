//! StoryStore implementation for PgStorage.

use super::*;

use crate::traits::StoryStore;
use async_trait::async_trait;
use readoku_core::NewStory;

#[async_trait]
impl StoryStore for PgStorage {
    async fn create_story(&self, story: &NewStory) -> Result<Story, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO stories (user_id, title, content, word_count, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STORY_COLUMNS}"
        ))
        .bind(story.user_id.0)
        .bind(&story.title)
        .bind(&story.content)
        .bind(i64::from(story.word_count))
        .bind(story.created_at)
        .fetch_one(&self.pool)
        .await?;
        row_to_story(&row)
    }

    async fn get_owned_story(
        &self,
        story_id: StoryId,
        user_id: UserId,
    ) -> Result<Option<Story>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE id = $1 AND user_id = $2"
        ))
        .bind(story_id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_story(&r)).transpose()
    }

    async fn count_user_stories(&self, user_id: UserId) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stories WHERE user_id = $1")
            .bind(user_id.0)
            .fetch_one(&self.pool)
            .await?;
        non_negative_u64(count, "story count")
    }

    async fn list_user_stories(
        &self,
        user_id: UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<StorySummary>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {STORY_SUMMARY_COLUMNS} FROM stories
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(user_id.0)
        .bind(u64_to_i64(limit))
        .bind(u64_to_i64(offset))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_story_summary).collect()
    }
}
