//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod quota;
mod reading;
mod stories;

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use readoku_core::{
    ReadingEvent, ReadingEventId, Story, StoryId, StorySummary, UserId,
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    /// Round-trip a trivial query; backs the `/db-health` probe.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub(crate) const STORY_COLUMNS: &str = "id, user_id, title, content, word_count, created_at";
pub(crate) const STORY_SUMMARY_COLUMNS: &str = "id, user_id, title, word_count, created_at";
pub(crate) const READING_COLUMNS: &str = "id, user_id, story_id, word_count, read_at";

/// Convert `u64` to `i64` for SQL binds.
/// Saturates to `i64::MAX`; LIMIT/OFFSET beyond that are meaningless anyway.
pub(crate) fn u64_to_i64(val: u64) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

/// Read a non-negative BIGINT column as `u64`.
pub(crate) fn non_negative_u64(value: i64, column: &str) -> Result<u64, StorageError> {
    u64::try_from(value).map_err(|e| StorageError::corrupt(format!("{column} is negative"), e))
}

/// Read a non-negative BIGINT column as `u32`.
pub(crate) fn non_negative_u32(value: i64, column: &str) -> Result<u32, StorageError> {
    u32::try_from(value).map_err(|e| StorageError::corrupt(format!("{column} out of range"), e))
}

pub(crate) fn row_to_story(row: &sqlx::postgres::PgRow) -> Result<Story, StorageError> {
    Ok(Story {
        id: StoryId(row.try_get("id")?),
        user_id: UserId(row.try_get("user_id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        word_count: non_negative_u32(row.try_get("word_count")?, "stories.word_count")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

pub(crate) fn row_to_story_summary(
    row: &sqlx::postgres::PgRow,
) -> Result<StorySummary, StorageError> {
    Ok(StorySummary {
        id: StoryId(row.try_get("id")?),
        user_id: UserId(row.try_get("user_id")?),
        title: row.try_get("title")?,
        word_count: non_negative_u32(row.try_get("word_count")?, "stories.word_count")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

pub(crate) fn row_to_reading_event(
    row: &sqlx::postgres::PgRow,
) -> Result<ReadingEvent, StorageError> {
    Ok(ReadingEvent {
        id: ReadingEventId(row.try_get("id")?),
        user_id: UserId(row.try_get("user_id")?),
        story_id: StoryId(row.try_get("story_id")?),
        word_count: non_negative_u32(row.try_get("word_count")?, "reading_records.word_count")?,
        read_at: row.try_get::<DateTime<Utc>, _>("read_at")?,
    })
}
