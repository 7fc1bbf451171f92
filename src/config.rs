use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

/// Default admin allowed to read the leaderboard when `BOT_ADMIN_ID` is unset.
pub const DEFAULT_ADMIN_ID: u64 = 6870644494;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub admin_id: u64,
    pub wiki_lang: String,
    pub ping_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;
        
        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }
        
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/assistant.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/assistant.db".to_string()
        } else {
            database_url
        };
        
        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let admin_id = match env::var("BOT_ADMIN_ID") {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid BOT_ADMIN_ID"))?,
            _ => DEFAULT_ADMIN_ID,
        };

        let wiki_lang = env::var("WIKI_LANG")
            .ok()
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| "pt".to_string());

        let timeout_str = env::var("PING_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string());
        let timeout_secs: u64 = timeout_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid PING_TIMEOUT_SECS"))?;
        if timeout_secs == 0 {
            return Err(anyhow!("PING_TIMEOUT_SECS must be greater than zero"));
        }
        
        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            admin_id,
            wiki_lang,
            ping_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
