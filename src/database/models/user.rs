use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chat participant known to the bot. The id is the Telegram user id.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub created_at: String,
}

impl User {
    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, created_at FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Inserts the user unless a row with that id already exists, then returns the stored row.
    pub async fn create_if_absent(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query("INSERT OR IGNORE INTO users (id, created_at) VALUES (?, ?)")
            .bind(user_id)
            .bind(&now)
            .execute(pool)
            .await?;

        Self::find_by_id(pool, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}
