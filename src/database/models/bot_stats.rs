use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};
use crate::utils::datetime::to_db_timestamp;

/// Aggregate snapshot derived from `user_stats`. The table only ever holds
/// the row with `id = 1`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BotStats {
    pub start_time: String,
    pub total_users: i64,
    pub total_messages: i64,
}

impl BotStats {
    pub async fn refresh<'e, E>(
        executor: E,
        start_time: &DateTime<Utc>,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO bot_stats (id, start_time, total_users, total_messages)
            VALUES (
                1,
                ?,
                (SELECT COUNT(DISTINCT user_id) FROM user_stats),
                (SELECT COALESCE(SUM(messages_sent), 0) FROM user_stats)
            )
            ON CONFLICT(id) DO UPDATE SET
                start_time = excluded.start_time,
                total_users = excluded.total_users,
                total_messages = excluded.total_messages
            "#
        )
        .bind(to_db_timestamp(start_time))
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn current(pool: &sqlx::SqlitePool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BotStats>(
            "SELECT start_time, total_users, total_messages FROM bot_stats WHERE id = 1"
        )
        .fetch_optional(pool)
        .await
    }
}
