#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use credit_reminder_bot::bot::context::{BotContext, InboundMessage};
use credit_reminder_bot::bot::dispatcher::{dispatch, Route};
use credit_reminder_bot::bot::messenger::{Messenger, OutboundMessage};
use credit_reminder_bot::bot::session::{ConversationSession, InMemorySessionStore, SessionStore};
use credit_reminder_bot::database::connection::DatabaseManager;
use credit_reminder_bot::database::models::{Credit, NewCredit, User};
use credit_reminder_bot::database::store::CreditStore;
use credit_reminder_bot::error::StorageError;

pub const BOT_USERNAME: &str = "testbot";

pub async fn setup_test_db() -> (Arc<DatabaseManager>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let db = DatabaseManager::new(&db_url)
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");

    (Arc::new(db), temp_dir)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn seed_credit(db: &DatabaseManager, user_id: i64, bank: &str, amount: f64, due: NaiveDate) -> Credit {
    User::create_if_absent(&db.pool, user_id).await.unwrap();
    Credit::create(
        &db.pool,
        NewCredit {
            user_id,
            bank_name: bank.to_string(),
            loan_amount: amount,
            due_date: due,
        },
    )
    .await
    .unwrap()
}

/// Captures outbound messages instead of talking to Telegram.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<OutboundMessage>>,
    blocked_chats: Mutex<HashSet<i64>>,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> String {
        self.sent.lock().unwrap().last().map(|m| m.text.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Makes every send to `chat_id` fail, like a user who blocked the bot.
    pub fn block_chat(&self, chat_id: i64) {
        self.blocked_chats.lock().unwrap().insert(chat_id);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<()> {
        if self.blocked_chats.lock().unwrap().contains(&message.chat_id) {
            return Err(anyhow!("Forbidden: bot was blocked by the user"));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Real SQLite store with switchable failures.
pub struct FaultyStore {
    pub inner: Arc<DatabaseManager>,
    pub fail_insert: bool,
    pub fail_delete: bool,
    pub missing_users: HashSet<i64>,
}

impl FaultyStore {
    pub fn new(inner: Arc<DatabaseManager>) -> Self {
        Self {
            inner,
            fail_insert: false,
            fail_delete: false,
            missing_users: HashSet::new(),
        }
    }
}

#[async_trait]
impl CreditStore for FaultyStore {
    async fn get_user(&self, user_id: i64) -> Result<User, StorageError> {
        if self.missing_users.contains(&user_id) {
            return Err(StorageError::NotFound { entity: "user", id: user_id });
        }
        self.inner.get_user(user_id).await
    }

    async fn create_user_if_absent(&self, user_id: i64) -> Result<User, StorageError> {
        self.inner.create_user_if_absent(user_id).await
    }

    async fn insert_credit(&self, credit: NewCredit) -> Result<Credit, StorageError> {
        if self.fail_insert {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.insert_credit(credit).await
    }

    async fn credits_by_user(&self, user_id: i64) -> Result<Vec<Credit>, StorageError> {
        self.inner.credits_by_user(user_id).await
    }

    async fn credits_due_on(&self, date: NaiveDate) -> Result<Vec<Credit>, StorageError> {
        self.inner.credits_due_on(date).await
    }

    async fn delete_credit(&self, credit_id: i64) -> Result<(), StorageError> {
        if self.fail_delete {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.delete_credit(credit_id).await
    }
}

/// Everything a conversation test needs.
pub struct Harness {
    pub db: Arc<DatabaseManager>,
    pub sessions: Arc<InMemorySessionStore>,
    pub messenger: Arc<RecordingMessenger>,
    pub ctx: BotContext,
    next_message_id: Mutex<i32>,
    _temp_dir: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        let (db, temp_dir) = setup_test_db().await;
        let store: Arc<dyn CreditStore> = db.clone();
        Self::build(db, store, temp_dir)
    }

    /// Uses a [`FaultyStore`] configured by `configure`.
    pub async fn with_faults(configure: impl FnOnce(&mut FaultyStore)) -> Self {
        let (db, temp_dir) = setup_test_db().await;
        let mut faulty = FaultyStore::new(db.clone());
        configure(&mut faulty);
        Self::build(db, Arc::new(faulty), temp_dir)
    }

    fn build(db: Arc<DatabaseManager>, store: Arc<dyn CreditStore>, temp_dir: TempDir) -> Self {
        let sessions = Arc::new(InMemorySessionStore::default());
        let messenger = Arc::new(RecordingMessenger::default());
        let ctx = BotContext::new(store, sessions.clone(), messenger.clone());
        Self {
            db,
            sessions,
            messenger,
            ctx,
            next_message_id: Mutex::new(1),
            _temp_dir: temp_dir,
        }
    }

    pub fn inbound(&self, user_id: i64, text: &str) -> InboundMessage {
        let mut next = self.next_message_id.lock().unwrap();
        let message_id = *next;
        *next += 1;
        InboundMessage {
            user_id,
            chat_id: user_id,
            message_id: Some(message_id),
            text: text.to_string(),
        }
    }

    /// Feeds one message from `user_id` through the dispatcher.
    pub async fn say(&self, user_id: i64, text: &str) -> Route {
        let inbound = self.inbound(user_id, text);
        dispatch(&self.ctx, &inbound, BOT_USERNAME).await
    }

    pub async fn session(&self, user_id: i64) -> Option<ConversationSession> {
        self.sessions.get(user_id).await
    }

    pub async fn credits(&self, user_id: i64) -> Vec<Credit> {
        Credit::find_by_user(&self.db.pool, user_id).await.unwrap()
    }
}
