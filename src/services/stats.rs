//! Usage statistics: per-user counters, the aggregate snapshot and the
//! admin-only leaderboard.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use crate::database::{connection::DatabaseManager, models::*};
use crate::utils::datetime::{format_datetime, format_duration, parse_db_timestamp};
use crate::utils::logging::{log_database_error, log_database_operation};

/// Number of users listed in the admin leaderboard.
pub const LEADERBOARD_SIZE: i64 = 5;

pub const NO_STATS_MESSAGE: &str = "Nenhuma estatística disponível.";
pub const ACCESS_DENIED_MESSAGE: &str =
    "Acesso negado. Apenas o administrador pode ver essas estatísticas.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSummary {
    NoData,
    Activity {
        messages_sent: i64,
        first_use: DateTime<Utc>,
        last_use: DateTime<Utc>,
    },
}

impl UserSummary {
    pub fn duration(&self) -> Option<Duration> {
        match self {
            UserSummary::NoData => None,
            UserSummary::Activity { first_use, last_use, .. } => Some(*last_use - *first_use),
        }
    }

    pub fn to_message(&self) -> String {
        match self {
            UserSummary::NoData => NO_STATS_MESSAGE.to_string(),
            UserSummary::Activity { messages_sent, first_use, last_use } => format!(
                "Suas estatísticas:\n\
                Mensagens enviadas: {}\n\
                Primeiro uso: {}\n\
                Último uso: {}\n\
                Tempo total de uso: {}",
                messages_sent,
                format_datetime(first_use),
                format_datetime(last_use),
                format_duration(*last_use - *first_use),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSummary {
    pub total_users: i64,
    pub total_messages: i64,
    pub uptime: Duration,
}

impl GlobalSummary {
    pub fn to_message(&self) -> String {
        format!(
            "Estatísticas do bot:\n\
            Total de usuários: {}\n\
            Total de mensagens: {}\n\
            Tempo de atividade: {}",
            self.total_users,
            self.total_messages,
            format_duration(self.uptime),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub messages_sent: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSummary {
    AccessDenied,
    Report {
        total_users: i64,
        total_messages: i64,
        uptime: Duration,
        top_users: Vec<LeaderboardEntry>,
    },
}

impl AdminSummary {
    pub fn to_message(&self) -> String {
        match self {
            AdminSummary::AccessDenied => ACCESS_DENIED_MESSAGE.to_string(),
            AdminSummary::Report { total_users, total_messages, uptime, top_users } => {
                let mut message = format!(
                    "Estatísticas do administrador:\n\
                    Total de usuários: {}\n\
                    Total de mensagens: {}\n\
                    Tempo de atividade do bot: {}\n\n\
                    Top {} usuários mais ativos:\n",
                    total_users,
                    total_messages,
                    format_duration(*uptime),
                    LEADERBOARD_SIZE,
                );
                for entry in top_users {
                    message.push_str(&format!(
                        "Usuário {}: {} mensagens\n",
                        entry.user_id, entry.messages_sent
                    ));
                }
                message
            }
        }
    }
}

/// Statistics over the persistence layer. The admin id and the process start
/// instant are injected at construction.
#[derive(Clone)]
pub struct StatsService {
    db: DatabaseManager,
    admin_id: u64,
    started_at: DateTime<Utc>,
}

impl StatsService {
    pub fn new(db: DatabaseManager, admin_id: u64, started_at: DateTime<Utc>) -> Self {
        Self { db, admin_id, started_at }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime(&self) -> Duration {
        Utc::now() - self.started_at
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        user_id == self.admin_id
    }

    /// Counts one inbound message and refreshes the aggregate row, both in
    /// one transaction. Store failures are returned to the caller.
    pub async fn record_activity(&self, user_id: u64) -> Result<()> {
        self.record_activity_at(user_id, Utc::now()).await
    }

    pub async fn record_activity_at(&self, user_id: u64, at: DateTime<Utc>) -> Result<()> {
        let user_id = to_db_id(user_id)?;
        log_database_operation("UPSERT", "user_stats", Some(&format!("user {user_id}")));

        let result = async {
            let mut tx = self.db.pool.begin().await?;
            UserStats::record_message(&mut tx, user_id, &at).await?;
            BotStats::refresh(&mut tx, &self.started_at).await?;
            tx.commit().await
        }
        .await;

        if let Err(e) = &result {
            log_database_error("UPSERT", "user_stats", &e.to_string());
        }
        result?;
        Ok(())
    }

    pub async fn user_summary(&self, user_id: u64) -> Result<UserSummary> {
        let user_id = to_db_id(user_id)?;
        let Some(stats) = UserStats::find_by_user(&self.db.pool, user_id).await? else {
            return Ok(UserSummary::NoData);
        };

        let (Some(first_use), Some(last_use)) = (
            parse_db_timestamp(&stats.first_use),
            parse_db_timestamp(&stats.last_use),
        ) else {
            tracing::warn!("Unreadable timestamps in user_stats for user {}", user_id);
            return Ok(UserSummary::NoData);
        };

        Ok(UserSummary::Activity {
            messages_sent: stats.messages_sent,
            first_use,
            last_use,
        })
    }

    /// Aggregate figures from the snapshot row, or `None` before any activity
    /// has been recorded.
    pub async fn global_summary(&self) -> Result<Option<GlobalSummary>> {
        let snapshot = BotStats::current(&self.db.pool).await?;

        Ok(snapshot.map(|stats| GlobalSummary {
            total_users: stats.total_users,
            total_messages: stats.total_messages,
            uptime: self.uptime(),
        }))
    }

    pub async fn admin_summary(&self, requester_id: u64) -> Result<AdminSummary> {
        if !self.is_admin(requester_id) {
            tracing::warn!("User {} requested admin statistics without permission", requester_id);
            return Ok(AdminSummary::AccessDenied);
        }

        let (total_users, total_messages) = UserStats::totals(&self.db.pool).await?;
        let top_users = UserStats::top_by_messages(&self.db.pool, LEADERBOARD_SIZE)
            .await?
            .into_iter()
            .map(|stats| LeaderboardEntry {
                user_id: stats.user_id,
                messages_sent: stats.messages_sent,
            })
            .collect();

        Ok(AdminSummary::Report {
            total_users,
            total_messages,
            uptime: self.uptime(),
            top_users,
        })
    }
}

/// Telegram user ids are positive and fit in SQLite's signed integer.
pub(crate) fn to_db_id(user_id: u64) -> Result<i64> {
    i64::try_from(user_id).map_err(|_| anyhow::anyhow!("User id {} out of range", user_id))
}
