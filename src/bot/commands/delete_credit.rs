use crate::bot::context::{BotContext, InboundMessage};
use crate::bot::session::ConversationSession;
use crate::utils::feedback::{feedback, feedback_with_hint, FeedbackType};
use crate::utils::format::render_deletion_list;
use crate::utils::logging::{log_command_error, log_command_success};

/// Shows an enumerated list and waits for the user to pick a number.
///
/// The candidate ids are captured in the same order as the rendered list, so the
/// ordinal the user types maps back to the credit they saw.
pub async fn handle_delete_credit(ctx: &BotContext, inbound: &InboundMessage) {
    let credits = match ctx.store.credits_by_user(inbound.user_id).await {
        Ok(credits) => credits,
        Err(e) => {
            log_command_error("deletecredit", inbound.user_id, inbound.chat_id, &e.to_string());
            ctx.reply(
                inbound,
                feedback(FeedbackType::Error, "Could not load your credits for deletion."),
            )
            .await;
            return;
        }
    };

    if credits.is_empty() {
        ctx.reply(
            inbound,
            feedback_with_hint(
                FeedbackType::Info,
                "You have no credits to delete.",
                "Use /addcredit to add one.",
            ),
        )
        .await;
        return;
    }

    let candidates = credits.iter().map(|c| c.id).collect();
    ctx.sessions
        .put(inbound.user_id, ConversationSession::delete_credit(candidates))
        .await;

    let text = format!(
        "{}\n{}",
        render_deletion_list(&credits),
        feedback(FeedbackType::Prompt, "Enter the number of the credit to delete:")
    );
    ctx.reply(inbound, text).await;
    log_command_success(
        "deletecredit",
        inbound.user_id,
        inbound.chat_id,
        Some(&format!("{} candidates", credits.len())),
    );
}
