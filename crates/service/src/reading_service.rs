use std::sync::Arc;

use chrono::{DateTime, Utc};
use readoku_core::{ReadingEvent, StoryId, UserId};
use readoku_storage::StorageBackend;
use readoku_storage::traits::{ReadingStore, StoryStore};

use crate::error::{ServiceError, store_failure};

/// Records and undoes "mark as read" events.
pub struct ReadingService {
    storage: Arc<StorageBackend>,
}

impl ReadingService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Append a reading event for a story the user owns.
    ///
    /// The word count is taken from the stored story. Ownership check and
    /// insert are two round trips.
    pub async fn mark_read(
        &self,
        user_id: UserId,
        story_id: StoryId,
        now: DateTime<Utc>,
    ) -> Result<ReadingEvent, ServiceError> {
        let Some(story) = self
            .storage
            .get_owned_story(story_id, user_id)
            .await
            .map_err(store_failure("get_owned_story", user_id, Some(story_id)))?
        else {
            tracing::debug!(user_id = %user_id, story_id = %story_id, "mark read on unknown story");
            return Err(ServiceError::story_not_found(story_id));
        };

        let event = self
            .storage
            .append_reading_event(user_id, story_id, story.word_count, now)
            .await
            .map_err(store_failure("append_reading_event", user_id, Some(story_id)))?;
        tracing::debug!(
            user_id = %user_id,
            story_id = %story_id,
            event_id = %event.id,
            words = event.word_count,
            "story marked read"
        );
        Ok(event)
    }

    /// Remove the most recent event for the pair and return it.
    pub async fn undo_last_read(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<ReadingEvent, ServiceError> {
        let Some(latest) = self
            .storage
            .latest_reading_event(user_id, story_id)
            .await
            .map_err(store_failure("latest_reading_event", user_id, Some(story_id)))?
        else {
            tracing::debug!(user_id = %user_id, story_id = %story_id, "nothing to undo");
            return Err(ServiceError::NoReadingRecord);
        };

        let deleted = self
            .storage
            .delete_reading_event(latest.id, user_id)
            .await
            .map_err(store_failure("delete_reading_event", user_id, Some(story_id)))?;
        if !deleted {
            // Lost a race with a concurrent undo.
            tracing::debug!(
                user_id = %user_id,
                event_id = %latest.id,
                "reading event already gone"
            );
            return Err(ServiceError::NoReadingRecord);
        }
        tracing::debug!(
            user_id = %user_id,
            story_id = %story_id,
            event_id = %latest.id,
            "read undone"
        );
        Ok(latest)
    }

    /// Number of times the user marked the story read.
    pub async fn story_read_count(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<u64, ServiceError> {
        self.storage
            .count_reading_events(user_id, story_id)
            .await
            .map_err(store_failure("count_reading_events", user_id, Some(story_id)))
    }
}
