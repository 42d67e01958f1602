use crate::bot::context::{BotContext, InboundMessage};
use crate::utils::feedback::{feedback, feedback_with_hint, FeedbackType};
use crate::utils::format::render_credit_list;
use crate::utils::logging::{log_command_error, log_command_success};

pub async fn handle_list(ctx: &BotContext, inbound: &InboundMessage) {
    let credits = match ctx.store.credits_by_user(inbound.user_id).await {
        Ok(credits) => credits,
        Err(e) => {
            log_command_error("mycredits", inbound.user_id, inbound.chat_id, &e.to_string());
            ctx.reply(inbound, feedback(FeedbackType::Error, "Could not load your credits."))
                .await;
            return;
        }
    };

    if credits.is_empty() {
        ctx.reply(
            inbound,
            feedback_with_hint(
                FeedbackType::Info,
                "You have no credits yet.",
                "Use /addcredit to add one.",
            ),
        )
        .await;
        return;
    }

    ctx.reply(inbound, render_credit_list(&credits)).await;
    log_command_success(
        "mycredits",
        inbound.user_id,
        inbound.chat_id,
        Some(&format!("{} credits", credits.len())),
    );
}
