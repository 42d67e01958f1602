//! Routes one inbound message to exactly one branch.

use crate::bot::commands::{resolve_action, run_action, Action};
use crate::bot::context::{BotContext, InboundMessage};
use crate::bot::input::{handle_input, Transition};
use crate::utils::feedback::{feedback_with_hint, FeedbackType};
use crate::utils::logging::log_database_error;

/// Which branch handled a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Command(Action),
    Input(Transition),
    /// Free text with no open session; a fallback notice was sent
    Unrecognized,
    /// Unknown slash command with no open session
    Ignored,
}

pub async fn dispatch(ctx: &BotContext, inbound: &InboundMessage, bot_username: &str) -> Route {
    if let Err(e) = ctx.store.create_user_if_absent(inbound.user_id).await {
        log_database_error("upsert", "users", &e.to_string(), Some(&format!("id={}", inbound.user_id)));
    }

    // Commands win over an open session, which lets a user walk away from a form.
    if let Some(action) = resolve_action(&inbound.text, bot_username) {
        run_action(ctx, inbound, action).await;
        return Route::Command(action);
    }

    if let Some(session) = ctx.sessions.get(inbound.user_id).await {
        return Route::Input(handle_input(ctx, inbound, session).await);
    }

    if !inbound.text.starts_with('/') {
        ctx.reply(
            inbound,
            feedback_with_hint(
                FeedbackType::Info,
                "Unknown command.",
                "Use the menu buttons or /help.",
            ),
        )
        .await;
        return Route::Unrecognized;
    }

    tracing::debug!(
        "Ignoring unknown command '{}' from user {}",
        inbound.text,
        inbound.user_id
    );
    Route::Ignored
}
