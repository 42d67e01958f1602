use teloxide::types::{Me, Message};

use crate::bot::context::{BotContext, InboundMessage};
use crate::bot::dispatcher::dispatch;
use crate::bot::handlers::HandlerError;

pub async fn message_handler(msg: Message, me: Me, ctx: BotContext) -> Result<(), HandlerError> {
    let Some(inbound) = inbound_from_message(&msg) else {
        tracing::debug!("Skipping non-text message {} in chat {}", msg.id.0, msg.chat.id.0);
        return Ok(());
    };

    let route = dispatch(&ctx, &inbound, me.username()).await;
    tracing::debug!(
        "Message {} from user {} routed to {:?}",
        msg.id.0,
        inbound.user_id,
        route
    );
    Ok(())
}

/// Extracts sender, chat and text. Messages without a text body or sender are skipped.
pub fn inbound_from_message(msg: &Message) -> Option<InboundMessage> {
    let user = msg.from()?;
    let text = msg.text()?;
    Some(InboundMessage {
        user_id: user.id.0 as i64,
        chat_id: msg.chat.id.0,
        message_id: Some(msg.id.0),
        text: text.to_string(),
    })
}
