use anyhow::Result;
use assistente::database::{connection::DatabaseManager, models::*};
use assistente::utils::datetime::parse_db_timestamp;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());
    
    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;
    
    Ok((db_manager, temp_dir))
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
}

#[tokio::test]
async fn test_database_created_in_missing_directory() -> Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("nested").join("data").join("bot.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db = DatabaseManager::new(&database_url).await?;
    db.run_migrations().await?;
    assert!(db_path.exists());
    db.close().await;

    Ok(())
}

#[tokio::test]
async fn test_note_creation_and_listing_order() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 1001i64;
    
    let first = Note::create(&db.pool, user_id, "buy milk").await?;
    let second = Note::create(&db.pool, user_id, "call mom").await?;
    Note::create(&db.pool, user_id, "buy milk").await?;
    
    assert_eq!(first.user_id, user_id);
    assert_eq!(first.note, "buy milk");
    assert!(second.id > first.id);
    
    let notes = Note::find_by_user(&db.pool, user_id).await?;
    let texts: Vec<&str> = notes.iter().map(|n| n.note.as_str()).collect();
    assert_eq!(texts, vec!["buy milk", "call mom", "buy milk"]);
    assert_eq!(Note::count_by_user(&db.pool, user_id).await?, 3);
    
    Ok(())
}

#[tokio::test]
async fn test_notes_are_scoped_per_user() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    
    Note::create(&db.pool, 1, "mine").await?;
    Note::create(&db.pool, 2, "theirs").await?;
    
    let deleted = Note::delete_by_user(&db.pool, 1).await?;
    assert_eq!(deleted, 1);
    assert!(Note::find_by_user(&db.pool, 1).await?.is_empty());
    
    let remaining = Note::find_by_user(&db.pool, 2).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].note, "theirs");
    
    Ok(())
}

#[tokio::test]
async fn test_delete_without_notes() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    assert_eq!(Note::delete_by_user(&db.pool, 99).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_user_stats_first_message() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let now = fixed_time();
    
    assert!(UserStats::find_by_user(&db.pool, 5).await?.is_none());
    
    UserStats::record_message(&db.pool, 5, &now).await?;
    
    let stats = UserStats::find_by_user(&db.pool, 5).await?.unwrap();
    assert_eq!(stats.messages_sent, 1);
    assert_eq!(stats.first_use, stats.last_use);
    assert_eq!(parse_db_timestamp(&stats.first_use), Some(now));
    
    Ok(())
}

#[tokio::test]
async fn test_user_stats_are_monotonic() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let start = fixed_time();
    
    UserStats::record_message(&db.pool, 5, &start).await?;
    UserStats::record_message(&db.pool, 5, &(start + Duration::minutes(10))).await?;
    // an out-of-order timestamp must not move last_use backwards
    UserStats::record_message(&db.pool, 5, &(start + Duration::minutes(3))).await?;
    
    let stats = UserStats::find_by_user(&db.pool, 5).await?.unwrap();
    assert_eq!(stats.messages_sent, 3);
    assert_eq!(parse_db_timestamp(&stats.first_use), Some(start));
    assert_eq!(parse_db_timestamp(&stats.last_use), Some(start + Duration::minutes(10)));
    assert!(stats.last_use >= stats.first_use);
    
    Ok(())
}

#[tokio::test]
async fn test_one_stats_row_per_user() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let now = fixed_time();
    
    for _ in 0..5 {
        UserStats::record_message(&db.pool, 7, &now).await?;
    }
    
    let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_stats WHERE user_id = ?")
        .bind(7i64)
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(rows, 1);
    
    Ok(())
}

#[tokio::test]
async fn test_top_users_and_totals() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let now = fixed_time();
    
    let activity = [(1i64, 3), (2, 8), (3, 1), (4, 8), (5, 2), (6, 6)];
    for (user_id, messages) in activity {
        for _ in 0..messages {
            UserStats::record_message(&db.pool, user_id, &now).await?;
        }
    }
    
    let top = UserStats::top_by_messages(&db.pool, 5).await?;
    let ranking: Vec<(i64, i64)> = top.iter().map(|s| (s.user_id, s.messages_sent)).collect();
    assert_eq!(ranking, vec![(2, 8), (4, 8), (6, 6), (1, 3), (5, 2)]);
    
    let (users, messages) = UserStats::totals(&db.pool).await?;
    assert_eq!(users, 6);
    assert_eq!(messages, 28);
    
    Ok(())
}

#[tokio::test]
async fn test_empty_totals() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    assert_eq!(UserStats::totals(&db.pool).await?, (0, 0));
    assert!(UserStats::top_by_messages(&db.pool, 5).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_bot_stats_single_row_snapshot() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let started_at = fixed_time();
    
    assert!(BotStats::current(&db.pool).await?.is_none());
    
    UserStats::record_message(&db.pool, 1, &started_at).await?;
    BotStats::refresh(&db.pool, &started_at).await?;
    UserStats::record_message(&db.pool, 2, &started_at).await?;
    UserStats::record_message(&db.pool, 2, &started_at).await?;
    BotStats::refresh(&db.pool, &started_at).await?;
    
    let snapshot = BotStats::current(&db.pool).await?.unwrap();
    assert_eq!(snapshot.total_users, 2);
    assert_eq!(snapshot.total_messages, 3);
    assert_eq!(parse_db_timestamp(&snapshot.start_time), Some(started_at));
    
    let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bot_stats")
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(rows, 1);
    
    Ok(())
}

#[tokio::test]
async fn test_migrations_are_idempotent() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    db.run_migrations().await?;
    Ok(())
}
