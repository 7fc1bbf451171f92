use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};
use crate::utils::datetime::to_db_timestamp;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: i64,
    pub messages_sent: i64,
    pub first_use: String,
    pub last_use: String,
}

impl UserStats {
    /// Counts one message for `user_id`. The first call creates the row and
    /// fixes `first_use`; later calls only bump the counter and move
    /// `last_use` forward.
    pub async fn record_message<'e, E>(
        executor: E,
        user_id: i64,
        at: &DateTime<Utc>,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let now = to_db_timestamp(at);

        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, messages_sent, first_use, last_use)
            VALUES (?, 1, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                messages_sent = user_stats.messages_sent + 1,
                last_use = MAX(user_stats.last_use, excluded.last_use)
            "#
        )
        .bind(user_id)
        .bind(now.clone())
        .bind(now)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT user_id, messages_sent, first_use, last_use FROM user_stats WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Most active users first; ties keep the lower user id first.
    pub async fn top_by_messages(
        pool: &sqlx::SqlitePool,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT user_id, messages_sent, first_use, last_use FROM user_stats ORDER BY messages_sent DESC, user_id ASC LIMIT ?"
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Returns `(distinct users, total messages)` straight from the counters.
    pub async fn totals(pool: &sqlx::SqlitePool) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(DISTINCT user_id), COALESCE(SUM(messages_sent), 0) FROM user_stats"
        )
        .fetch_one(pool)
        .await
    }
}
