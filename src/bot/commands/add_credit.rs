use crate::bot::context::{BotContext, InboundMessage};
use crate::bot::input::prompt_bank_name;
use crate::bot::session::ConversationSession;
use crate::utils::logging::log_command_success;

/// Starts the three-step form. Any unfinished session of this user is replaced.
pub async fn handle_add_credit(ctx: &BotContext, inbound: &InboundMessage) {
    ctx.sessions
        .put(inbound.user_id, ConversationSession::add_credit())
        .await;
    ctx.reply(inbound, prompt_bank_name()).await;
    log_command_success("addcredit", inbound.user_id, inbound.chat_id, Some("form started"));
}
