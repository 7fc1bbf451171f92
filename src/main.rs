//! # Assistente Main Entry Point
//! 
//! Initializes logging, loads configuration, opens and migrates the
//! database, then runs the Telegram bot next to the health endpoint until
//! either stops. The database is closed on the way out.

use anyhow::Result;
use chrono::Utc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assistente::bot::assistant::Assistant;
use assistente::bot::handlers::BotHandler;
use assistente::config::Config;
use assistente::database::connection::DatabaseManager;
use assistente::services::health::HealthService;
use assistente::utils::logging::log_system_event;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assistente=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let started_at = Utc::now();
    
    info!("Starting Assistente v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}, Wikipedia: {}, Ping timeout: {}s", 
        config.database_url, config.http_port, config.wiki_lang, config.ping_timeout.as_secs());

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");
    
    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let assistant = Assistant::new(db_arc.as_ref().clone(), &config, started_at)?;
    let conversations = assistant.states().clone();
    let handler = BotHandler::new(assistant);
    info!("Telegram bot initialized successfully");
    
    // Initialize health service
    let health_service = HealthService::new(db_arc.clone(), conversations, started_at);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    
    info!("Health check server starting on port {}", config.http_port);
    
    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });
    
    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });
    
    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }
    
    db_arc.close().await;
    log_system_event("shutdown", Some("database closed"));
    info!("Application stopped");
    Ok(())
}
