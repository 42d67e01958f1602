//! Per-user progress through multi-step forms.
//!
//! A user has at most one [`ConversationSession`]. Starting a new flow replaces
//! whatever was there; finishing a flow removes it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Where a user is in a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    AwaitingBankName,
    AwaitingLoanAmount,
    AwaitingDueDate,
    AwaitingDeletionChoice,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::AwaitingBankName => "awaiting_bank_name",
            Step::AwaitingLoanAmount => "awaiting_loan_amount",
            Step::AwaitingDueDate => "awaiting_due_date",
            Step::AwaitingDeletionChoice => "awaiting_deletion_choice",
        }
    }
}

/// Values held between steps of the add-credit form. The due date is never
/// held: it completes the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    BankName,
    LoanAmount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSession {
    step: Step,
    fields: HashMap<FormField, String>,
    /// Credit ids in the order they were shown to the user
    candidates: Vec<i64>,
    updated_at: DateTime<Utc>,
}

impl ConversationSession {
    /// A fresh add-credit form, waiting for the bank name.
    pub fn add_credit() -> Self {
        Self {
            step: Step::AwaitingBankName,
            fields: HashMap::new(),
            candidates: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// A deletion prompt over `candidates`, listed in display order.
    pub fn delete_credit(candidates: Vec<i64>) -> Self {
        Self {
            step: Step::AwaitingDeletionChoice,
            fields: HashMap::new(),
            candidates,
            updated_at: Utc::now(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn field(&self, field: FormField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn candidates(&self) -> &[i64] {
        &self.candidates
    }

    /// Stores a validated value and moves on to `next`.
    pub fn advance(&mut self, field: FormField, value: String, next: Step) {
        self.fields.insert(field, value);
        self.step = next;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Overrides the activity timestamp.
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) => now - self.updated_at > ttl,
            None => false,
        }
    }
}

/// Keyed by Telegram user id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Option<ConversationSession>;

    /// Inserts or replaces the user's session.
    async fn put(&self, user_id: i64, session: ConversationSession);

    async fn remove(&self, user_id: i64) -> Option<ConversationSession>;
}

/// Process-local session store with optional idle expiry.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<i64, ConversationSession>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: i64) -> Option<ConversationSession> {
        let mut sessions = self.sessions.lock().await;
        let expired = sessions
            .get(&user_id)
            .is_some_and(|s| s.is_expired(Utc::now(), self.ttl));
        if expired {
            tracing::info!("Session for user {} expired", user_id);
            sessions.remove(&user_id);
            return None;
        }
        sessions.get(&user_id).cloned()
    }

    async fn put(&self, user_id: i64, session: ConversationSession) {
        self.sessions.lock().await.insert(user_id, session);
    }

    async fn remove(&self, user_id: i64) -> Option<ConversationSession> {
        self.sessions.lock().await.remove(&user_id)
    }
}
