//! Outbound side of the chat transport.

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup, MessageId, ParseMode};

use crate::bot::commands::MENU_BUTTONS;

/// A message ready to send. `text` is MarkdownV2 and must already be escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub reply_to: Option<i32>,
    /// Attach the persistent four-button menu
    pub show_menu: bool,
}

impl OutboundMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to: None,
            show_menu: false,
        }
    }

    pub fn reply_to(mut self, message_id: Option<i32>) -> Self {
        self.reply_to = message_id;
        self
    }

    pub fn with_menu(mut self) -> Self {
        self.show_menu = true;
        self
    }
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<()> {
        (**self).send(message).await
    }
}

/// Sends through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(message.chat_id), message.text)
            .parse_mode(ParseMode::MarkdownV2);

        if let Some(reply_to) = message.reply_to {
            request = request.reply_to_message_id(MessageId(reply_to));
        }
        if message.show_menu {
            request = request.reply_markup(main_menu());
        }

        request.await?;
        Ok(())
    }
}

/// Reply keyboard with the four menu buttons, two per row.
pub fn main_menu() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = MENU_BUTTONS
        .chunks(2)
        .map(|row| row.iter().map(|b| KeyboardButton::new(b.text())).collect())
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard(true)
}
