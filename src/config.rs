use anyhow::{anyhow, Result};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/credits.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// Local hour at which due-tomorrow reminders go out
    pub reminder_hour: u32,
    /// Idle minutes after which an unfinished conversation is dropped; 0 keeps it forever
    pub session_ttl_minutes: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = non_empty_var("TELEGRAM_BOT_TOKEN")
            .or_else(|| non_empty_var("BOT_TOKEN"))
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        let http_port = parse_var("HTTP_PORT", 3000u16)?;

        let reminder_hour = parse_var("REMINDER_HOUR", 9u32)?;
        if reminder_hour > 23 {
            return Err(anyhow!("REMINDER_HOUR must be between 0 and 23"));
        }

        let session_ttl_minutes = parse_var("SESSION_TTL_MINUTES", 30u32)?;

        Ok(Config {
            telegram_bot_token: token,
            database_url: Self::database_url_from_env(),
            http_port,
            reminder_hour,
            session_ttl_minutes,
        })
    }

    /// `DATABASE_URL`, else `DB_NAME` taken as a plain SQLite file path, else the default.
    pub fn database_url_from_env() -> String {
        if let Some(url) = non_empty_var("DATABASE_URL") {
            return url;
        }
        match non_empty_var("DB_NAME") {
            Some(path) if path.starts_with("sqlite:") => path,
            Some(path) => format!("sqlite:{path}"),
            None => DEFAULT_DATABASE_URL.to_string(),
        }
    }

    pub fn session_ttl(&self) -> Option<chrono::Duration> {
        match self.session_ttl_minutes {
            0 => None,
            minutes => Some(chrono::Duration::minutes(i64::from(minutes))),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match non_empty_var(name) {
        Some(raw) => raw.parse().map_err(|_| anyhow!("Invalid {}", name)),
        None => Ok(default),
    }
}
