use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::utils::datetime::to_db_timestamp;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub note: String,
    pub created_at: String,
}

impl Note {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        text: &str,
    ) -> Result<Self, sqlx::Error> {
        let created_at = to_db_timestamp(&Utc::now());

        let result = sqlx::query(
            "INSERT INTO notes (user_id, note, created_at) VALUES (?, ?, ?)"
        )
        .bind(user_id)
        .bind(text)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(Note {
            id: result.last_insert_rowid(),
            user_id,
            note: text.to_string(),
            created_at,
        })
    }

    /// All notes of a user in insertion order.
    pub async fn find_by_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            "SELECT id, user_id, note, created_at FROM notes WHERE user_id = ? ORDER BY id"
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Removes every note of a user and returns how many were deleted.
    pub async fn delete_by_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_by_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
