use std::sync::Arc;

use chrono::{DateTime, Utc};
use readoku_core::{
    LedgerConfig, MAX_PROMPT_CHARS, NewStory, Paginated, Story, StoryDetail, StoryId,
    StorySummary, UserId, paginate_with_default,
};
use readoku_llm::StoryGenerator;
use readoku_storage::StorageBackend;
use readoku_storage::traits::{ReadingStore, StoryStore};

use crate::error::{ServiceError, store_failure};
use crate::quota_service::QuotaService;

/// Story generation behind the quota gate, plus the listing and detail
/// views the reading screens need.
pub struct StoryService {
    storage: Arc<StorageBackend>,
    generator: Arc<dyn StoryGenerator>,
    quota: Arc<QuotaService>,
    config: LedgerConfig,
}

impl StoryService {
    #[must_use]
    pub fn new(
        storage: Arc<StorageBackend>,
        generator: Arc<dyn StoryGenerator>,
        quota: Arc<QuotaService>,
        config: LedgerConfig,
    ) -> Self {
        Self { storage, generator, quota, config }
    }

    /// Gate, generate, persist, then count the generation.
    ///
    /// A generator failure consumes no quota. A failed quota commit is logged
    /// and the story is still returned.
    pub async fn generate_story(
        &self,
        user_id: UserId,
        prompt: &str,
        now: DateTime<Utc>,
    ) -> Result<Story, ServiceError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ServiceError::InvalidInput("prompt must not be empty".to_owned()));
        }
        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(ServiceError::InvalidInput(format!(
                "prompt exceeds {MAX_PROMPT_CHARS} characters"
            )));
        }

        let permit = self.quota.check_and_reserve(user_id, self.config.daily_limit, now).await?;

        let content = self.generator.generate(prompt).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "story generation failed");
            ServiceError::Generation(e)
        })?;

        let story = self
            .storage
            .create_story(&NewStory::from_generated(user_id, prompt.to_owned(), content, now))
            .await
            .map_err(store_failure("create_story", user_id, None))?;

        self.quota.commit(permit, now).await;
        tracing::info!(
            user_id = %user_id,
            story_id = %story.id,
            words = story.word_count,
            "story generated"
        );
        Ok(story)
    }

    /// Newest-first page of the user's stories.
    pub async fn list_stories(
        &self,
        user_id: UserId,
        page: i64,
        limit: i64,
    ) -> Result<Paginated<StorySummary>, ServiceError> {
        let total = self
            .storage
            .count_user_stories(user_id)
            .await
            .map_err(store_failure("count_user_stories", user_id, None))?;
        let info = paginate_with_default(page, limit, total, self.config.default_page_limit);
        let items = self
            .storage
            .list_user_stories(user_id, info.limit, info.offset)
            .await
            .map_err(store_failure("list_user_stories", user_id, None))?;
        Ok(Paginated::new(items, total, info))
    }

    /// Story with its read count.
    pub async fn get_story(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<StoryDetail, ServiceError> {
        let story = self
            .storage
            .get_owned_story(story_id, user_id)
            .await
            .map_err(store_failure("get_owned_story", user_id, Some(story_id)))?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, story_id = %story_id, "story not found");
                ServiceError::story_not_found(story_id)
            })?;
        let read_count = self
            .storage
            .count_reading_events(user_id, story_id)
            .await
            .map_err(store_failure("count_reading_events", user_id, Some(story_id)))?;
        Ok(StoryDetail { story, read_count })
    }
}
