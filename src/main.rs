//! # Credit Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database, starts the
//! reminder service and the health endpoint, and runs the Telegram bot.

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credit_reminder_bot::bot::context::BotContext;
use credit_reminder_bot::bot::handlers::BotHandler;
use credit_reminder_bot::bot::messenger::TelegramMessenger;
use credit_reminder_bot::bot::session::InMemorySessionStore;
use credit_reminder_bot::config::Config;
use credit_reminder_bot::database::connection::DatabaseManager;
use credit_reminder_bot::services::health::HealthService;
use credit_reminder_bot::services::reminder::ReminderService;
use credit_reminder_bot::utils::logging::log_system_event;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_reminder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn open_database(config: &Config) -> Result<Arc<DatabaseManager>> {
    let db = DatabaseManager::new(&config.database_url)
        .await
        .with_context(|| format!("Cannot open database {}", config.database_url))?;
    db.run_migrations().await?;
    log_system_event("database ready", Some(&config.database_url));
    Ok(Arc::new(db))
}

/// Builds the scheduler with the daily reminder job and, when sessions expire, the purge job.
async fn start_reminders(
    config: &Config,
    db: Arc<DatabaseManager>,
    messenger: Arc<TelegramMessenger>,
    sessions: Arc<InMemorySessionStore>,
) -> Result<ReminderService> {
    let mut service = ReminderService::new(db, messenger, config.reminder_hour)
        .await
        .map_err(|e| anyhow!("Failed to create reminder service: {}", e))?;

    if config.session_ttl().is_some() {
        if let Err(e) = service.add_session_cleanup(sessions).await {
            tracing::warn!("Session cleanup job not scheduled: {}", e);
        }
    }

    match service.start().await {
        Ok(()) => log_system_event("reminder service started", None),
        Err(e) => tracing::error!("Failed to start reminder service: {}", e),
    }
    Ok(service)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    info!(
        "Credit Reminder Bot v{} - database {}, health port {}, reminders at {:02}:00",
        env!("CARGO_PKG_VERSION"),
        config.database_url,
        config.http_port,
        config.reminder_hour
    );

    let db = open_database(&config).await?;

    // A rejected token is fatal
    let bot = Bot::new(&config.telegram_bot_token);
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow!("Telegram rejected the bot token: {}", e))?;
    info!("Authorized as @{}", me.username());

    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl()));
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let handler = BotHandler::new(BotContext::new(
        db.clone(),
        sessions.clone(),
        messenger.clone(),
    ));

    let mut reminders = start_reminders(&config, db.clone(), messenger, sessions).await?;

    let health = HealthService::new(db);
    let listener = TcpListener::bind(("0.0.0.0", config.http_port))
        .await
        .with_context(|| format!("Failed to bind health port {}", config.http_port))?;
    log_system_event("health endpoint listening", Some(&config.http_port.to_string()));

    let mut dispatcher = Dispatcher::builder(bot, handler.schema())
        .enable_ctrlc_handler()
        .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            log_system_event("dispatcher stopped", None);
        }
        served = async { axum::serve(listener, health.router).await } => {
            if let Err(e) = served {
                tracing::error!("Health server error: {}", e);
            }
        }
    }

    if let Err(e) = reminders.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
