//! ReadingStore implementation for PgStorage.

use super::*;

use crate::traits::ReadingStore;
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use readoku_core::{DailyWordCount, LedgerTotals, ReadingWindows};

#[async_trait]
impl ReadingStore for PgStorage {
    async fn append_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
        word_count: u32,
        read_at: DateTime<Utc>,
    ) -> Result<ReadingEvent, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO reading_records (user_id, story_id, word_count, read_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {READING_COLUMNS}"
        ))
        .bind(user_id.0)
        .bind(story_id.0)
        .bind(i64::from(word_count))
        .bind(read_at)
        .fetch_one(&self.pool)
        .await?;
        row_to_reading_event(&row)
    }

    async fn latest_reading_event(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<Option<ReadingEvent>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {READING_COLUMNS} FROM reading_records
             WHERE user_id = $1 AND story_id = $2
             ORDER BY read_at DESC, id DESC
             LIMIT 1"
        ))
        .bind(user_id.0)
        .bind(story_id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_reading_event(&r)).transpose()
    }

    async fn delete_reading_event(
        &self,
        id: ReadingEventId,
        user_id: UserId,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM reading_records WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_reading_events(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reading_records WHERE user_id = $1 AND story_id = $2",
        )
        .bind(user_id.0)
        .bind(story_id.0)
        .fetch_one(&self.pool)
        .await?;
        non_negative_u64(count, "reading count")
    }

    async fn ledger_totals(
        &self,
        user_id: UserId,
        windows: &ReadingWindows,
        offset: FixedOffset,
    ) -> Result<LedgerTotals, StorageError> {
        // Both statements must see the same rows; a mark or undo committed in
        // between would otherwise land in some windows and not others.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut sums = sqlx::query(
            "SELECT
                COALESCE(SUM(word_count), 0)::BIGINT AS total,
                COALESCE(SUM(word_count) FILTER (WHERE read_at >= $2 AND read_at < $3), 0)::BIGINT
                    AS today,
                COALESCE(SUM(word_count) FILTER (WHERE read_at >= $4 AND read_at < $5), 0)::BIGINT
                    AS week,
                COALESCE(SUM(word_count) FILTER (WHERE read_at >= $6 AND read_at < $7), 0)::BIGINT
                    AS month,
                COALESCE(SUM(word_count) FILTER (WHERE read_at >= $8 AND read_at < $9), 0)::BIGINT
                    AS year
             FROM reading_records
             WHERE user_id = $1",
        )
        .bind(user_id.0);
        for range in [windows.today, windows.week, windows.month, windows.year] {
            sums = sums.bind(range.start).bind(range.end);
        }
        let row = sums.fetch_one(&mut *tx).await?;

        // Shift the UTC instant by the fixed offset before truncating to a date.
        let day_rows = sqlx::query(
            "SELECT ((read_at AT TIME ZONE 'UTC') + make_interval(secs => $4))::date AS day,
                    SUM(word_count)::BIGINT AS words
             FROM reading_records
             WHERE user_id = $1 AND read_at >= $2 AND read_at < $3
             GROUP BY day
             ORDER BY day",
        )
        .bind(user_id.0)
        .bind(windows.recent.start)
        .bind(windows.recent.end)
        .bind(f64::from(offset.local_minus_utc()))
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let daily = day_rows
            .iter()
            .map(|r| -> Result<DailyWordCount, StorageError> {
                Ok(DailyWordCount {
                    date: r.try_get::<NaiveDate, _>("day")?,
                    word_count: non_negative_u64(r.try_get("words")?, "daily word count")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sum = |column: &'static str| -> Result<u64, StorageError> {
            non_negative_u64(row.try_get(column)?, column)
        };
        Ok(LedgerTotals {
            total: sum("total")?,
            today: sum("today")?,
            week: sum("week")?,
            month: sum("month")?,
            year: sum("year")?,
            daily,
        })
    }
}
