use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::context::{BotContext, InboundMessage};
use crate::utils::logging::log_command_success;
use crate::utils::markdown::{bold, escape_markdown};

pub fn help_text() -> String {
    format!(
        "{}\n\n{}\n\n{}",
        bold("Hi! I keep track of your loans."),
        escape_markdown("I will remind you the day before each payment is due. Choose an action:"),
        escape_markdown(&Command::descriptions().to_string()),
    )
}

pub async fn handle_help(ctx: &BotContext, inbound: &InboundMessage) {
    ctx.reply_with_menu(inbound, help_text()).await;
    log_command_success("help", inbound.user_id, inbound.chat_id, None);
}
