use std::sync::Arc;

use crate::bot::messenger::{Messenger, OutboundMessage};
use crate::bot::session::SessionStore;
use crate::database::store::CreditStore;

/// A text message from a user, stripped of transport details.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub user_id: i64,
    pub chat_id: i64,
    pub message_id: Option<i32>,
    pub text: String,
}

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct BotContext {
    pub store: Arc<dyn CreditStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub messenger: Arc<dyn Messenger>,
}

impl BotContext {
    pub fn new(
        store: Arc<dyn CreditStore>,
        sessions: Arc<dyn SessionStore>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            store,
            sessions,
            messenger,
        }
    }

    /// Replies to `inbound`. Send failures are logged, not returned.
    pub async fn reply(&self, inbound: &InboundMessage, text: String) -> bool {
        self.deliver(OutboundMessage::new(inbound.chat_id, text).reply_to(inbound.message_id))
            .await
    }

    pub async fn reply_with_menu(&self, inbound: &InboundMessage, text: String) -> bool {
        self.deliver(
            OutboundMessage::new(inbound.chat_id, text)
                .reply_to(inbound.message_id)
                .with_menu(),
        )
        .await
    }

    pub async fn deliver(&self, message: OutboundMessage) -> bool {
        let chat_id = message.chat_id;
        match self.messenger.send(message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send message to chat {}: {}", chat_id, e);
                false
            }
        }
    }
}
