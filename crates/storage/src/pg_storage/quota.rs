//! QuotaStore and UserStore implementations for PgStorage.

use super::*;

use crate::traits::{QuotaStore, UserStore};
use async_trait::async_trait;
use readoku_core::QuotaState;

#[async_trait]
impl QuotaStore for PgStorage {
    async fn get_quota_state(&self, user_id: UserId) -> Result<Option<QuotaState>, StorageError> {
        let row = sqlx::query(
            "SELECT id, generation_count, last_generation_at FROM users WHERE id = $1",
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| -> Result<QuotaState, StorageError> {
            Ok(QuotaState {
                user_id: UserId(r.try_get("id")?),
                generation_count: non_negative_u32(
                    r.try_get("generation_count")?,
                    "users.generation_count",
                )?,
                last_generation_at: r.try_get("last_generation_at")?,
            })
        })
        .transpose()
    }

    async fn update_generation_status(
        &self,
        user_id: UserId,
        generation_count: u32,
        last_generation_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE users SET generation_count = $1, last_generation_at = $2 WHERE id = $3",
        )
        .bind(i64::from(generation_count))
        .bind(last_generation_at)
        .bind(user_id.0)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStorage {
    async fn create_user(&self, email: &str) -> Result<UserId, StorageError> {
        let id: i64 = sqlx::query_scalar("INSERT INTO users (email) VALUES ($1) RETURNING id")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(UserId(id))
    }
}
