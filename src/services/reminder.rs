use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::bot::messenger::{Messenger, OutboundMessage};
use crate::bot::session::InMemorySessionStore;
use crate::database::store::CreditStore;
use crate::error::StorageError;
use crate::utils::datetime::{daily_cron_at_local_hour, next_day};
use crate::utils::format::render_reminder;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Outcome of one reminder run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderReport {
    pub due: usize,
    pub sent: usize,
    /// Owner lookup failed
    pub skipped: usize,
    /// Telegram refused the message
    pub failed: usize,
}

pub struct ReminderService {
    store: Arc<dyn CreditStore>,
    messenger: Arc<dyn Messenger>,
    scheduler: JobScheduler,
    reminder_hour: u32,
}

impl ReminderService {
    pub async fn new(
        store: Arc<dyn CreditStore>,
        messenger: Arc<dyn Messenger>,
        reminder_hour: u32,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            store,
            messenger,
            scheduler,
            reminder_hour,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // The scheduler evaluates cron in UTC, so shift the local hour by the host offset
        let schedule = daily_cron_at_local_hour(self.reminder_hour, *Local::now().offset());
        let store = self.store.clone();
        let messenger = self.messenger.clone();

        let reminder_job = Job::new_async(schedule.as_str(), move |_uuid, _l| {
            let store = store.clone();
            let messenger = messenger.clone();
            Box::pin(async move {
                run_daily_reminders(store.as_ref(), messenger.as_ref()).await;
            })
        })?;

        self.scheduler.add(reminder_job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Reminder service started - daily at {:02}:00 local time (cron '{}' UTC)",
            self.reminder_hour,
            schedule
        );
        Ok(())
    }

    /// Periodically drops abandoned conversation sessions.
    pub async fn add_session_cleanup(
        &mut self,
        sessions: Arc<InMemorySessionStore>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let cleanup_job = Job::new_repeated_async(SESSION_PURGE_INTERVAL, move |_uuid, _l| {
            let sessions = sessions.clone();
            Box::pin(async move {
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    tracing::info!("Purged {} expired sessions", purged);
                }
            })
        })?;
        self.scheduler.add(cleanup_job).await?;
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    // Manual trigger for testing
    pub async fn check_reminders_now(&self) -> ReminderReport {
        run_daily_reminders(self.store.as_ref(), self.messenger.as_ref()).await
    }
}

async fn run_daily_reminders(store: &dyn CreditStore, messenger: &dyn Messenger) -> ReminderReport {
    tracing::info!("Sending daily notifications...");
    let today = Local::now().date_naive();
    match send_due_reminders(store, messenger, today).await {
        Ok(report) => {
            tracing::info!(
                "Reminders done: {} due, {} sent, {} skipped, {} failed",
                report.due,
                report.sent,
                report.skipped,
                report.failed
            );
            report
        }
        Err(e) => {
            tracing::error!("Failed to load credits due tomorrow: {}", e);
            ReminderReport::default()
        }
    }
}

/// Sends one reminder per credit due the day after `today`.
///
/// A failed owner lookup or send only affects that credit; the rest of the batch continues.
pub async fn send_due_reminders(
    store: &dyn CreditStore,
    messenger: &dyn Messenger,
    today: NaiveDate,
) -> Result<ReminderReport, StorageError> {
    let Some(tomorrow) = next_day(today) else {
        return Ok(ReminderReport::default());
    };

    let credits = store.credits_due_on(tomorrow).await?;
    let mut report = ReminderReport {
        due: credits.len(),
        ..ReminderReport::default()
    };

    for credit in credits {
        let user = match store.get_user(credit.user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Error getting user {} for credit {}: {}", credit.user_id, credit.id, e);
                report.skipped += 1;
                continue;
            }
        };

        // Private chat id equals the user id
        let message = OutboundMessage::new(user.id, render_reminder(&credit));
        match messenger.send(message).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                tracing::error!("Failed to send reminder for credit {} to {}: {}", credit.id, user.id, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
