//! The input state machine.
//!
//! Each free-text message from a user with an open session is interpreted
//! according to the session's [`Step`]. Validation failures re-prompt and leave
//! the session untouched. Terminal steps remove the session exactly once, whether
//! or not the storage call succeeded.

use crate::bot::context::{BotContext, InboundMessage};
use crate::bot::session::{ConversationSession, FormField, Step};
use crate::database::models::NewCredit;
use crate::utils::feedback::{feedback, FeedbackType};
use crate::utils::logging::{log_command_error, log_input_step, log_validation_error};
use crate::utils::validation::{parse_due_date, parse_loan_amount, parse_ordinal, resolve_ordinal};

/// Result of feeding one message into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Value accepted, session moved to the given step
    Advanced(Step),
    /// Value rejected, session still at the given step
    Reprompted(Step),
    /// Credit stored under the given id, session closed
    Saved(i64),
    /// Credit with the given id deleted, session closed
    Deleted(i64),
    /// Terminal step failed downstream, session closed
    Failed,
}

pub fn prompt_bank_name() -> String {
    feedback(FeedbackType::Prompt, "Enter the bank name:")
}

pub fn prompt_loan_amount() -> String {
    feedback(FeedbackType::Prompt, "Enter the loan amount:")
}

pub fn prompt_due_date() -> String {
    feedback(
        FeedbackType::Prompt,
        "Enter the payment date as YYYY-MM-DD (for example 2024-12-31):",
    )
}

pub async fn handle_input(
    ctx: &BotContext,
    inbound: &InboundMessage,
    session: ConversationSession,
) -> Transition {
    match session.step() {
        Step::AwaitingBankName => accept_bank_name(ctx, inbound, session).await,
        Step::AwaitingLoanAmount => accept_loan_amount(ctx, inbound, session).await,
        Step::AwaitingDueDate => accept_due_date(ctx, inbound, session).await,
        Step::AwaitingDeletionChoice => accept_deletion_choice(ctx, inbound, session).await,
    }
}

async fn accept_bank_name(
    ctx: &BotContext,
    inbound: &InboundMessage,
    mut session: ConversationSession,
) -> Transition {
    session.advance(FormField::BankName, inbound.text.clone(), Step::AwaitingLoanAmount);
    ctx.sessions.put(inbound.user_id, session).await;
    log_input_step(inbound.user_id, Step::AwaitingBankName.as_str(), Some(Step::AwaitingLoanAmount.as_str()));

    ctx.reply(inbound, prompt_loan_amount()).await;
    Transition::Advanced(Step::AwaitingLoanAmount)
}

async fn accept_loan_amount(
    ctx: &BotContext,
    inbound: &InboundMessage,
    mut session: ConversationSession,
) -> Transition {
    if let Err(e) = parse_loan_amount(&inbound.text) {
        log_validation_error(Step::AwaitingLoanAmount.as_str(), &inbound.text, &e.to_string(), inbound.user_id);
        ctx.reply(
            inbound,
            feedback(FeedbackType::Error, "Invalid amount. Enter a number, for example 10000.50"),
        )
        .await;
        return Transition::Reprompted(Step::AwaitingLoanAmount);
    }

    session.advance(
        FormField::LoanAmount,
        inbound.text.trim().to_string(),
        Step::AwaitingDueDate,
    );
    ctx.sessions.put(inbound.user_id, session).await;
    log_input_step(inbound.user_id, Step::AwaitingLoanAmount.as_str(), Some(Step::AwaitingDueDate.as_str()));

    ctx.reply(inbound, prompt_due_date()).await;
    Transition::Advanced(Step::AwaitingDueDate)
}

async fn accept_due_date(
    ctx: &BotContext,
    inbound: &InboundMessage,
    session: ConversationSession,
) -> Transition {
    let due_date = match parse_due_date(&inbound.text) {
        Ok(date) => date,
        Err(e) => {
            log_validation_error(Step::AwaitingDueDate.as_str(), &inbound.text, &e.to_string(), inbound.user_id);
            ctx.reply(
                inbound,
                feedback(
                    FeedbackType::Error,
                    "Invalid date format. Use YYYY-MM-DD (for example 2024-12-31)",
                ),
            )
            .await;
            return Transition::Reprompted(Step::AwaitingDueDate);
        }
    };

    ctx.sessions.remove(inbound.user_id).await;
    log_input_step(inbound.user_id, Step::AwaitingDueDate.as_str(), None);

    let Some(credit) = assemble_credit(inbound.user_id, &session, due_date) else {
        log_command_error("addcredit", inbound.user_id, inbound.chat_id, "form fields missing");
        ctx.reply(inbound, feedback(FeedbackType::Error, "Something went wrong. Please start again."))
            .await;
        return Transition::Failed;
    };

    match ctx.store.insert_credit(credit).await {
        Ok(stored) => {
            ctx.reply(inbound, feedback(FeedbackType::Success, "Credit added!")).await;
            Transition::Saved(stored.id)
        }
        Err(e) => {
            log_command_error("addcredit", inbound.user_id, inbound.chat_id, &e.to_string());
            ctx.reply(
                inbound,
                feedback(FeedbackType::Error, "Could not save the credit. Please try again."),
            )
            .await;
            Transition::Failed
        }
    }
}

fn assemble_credit(
    user_id: i64,
    session: &ConversationSession,
    due_date: chrono::NaiveDate,
) -> Option<NewCredit> {
    let bank_name = session.field(FormField::BankName)?.to_string();
    let loan_amount = parse_loan_amount(session.field(FormField::LoanAmount)?).ok()?;
    Some(NewCredit {
        user_id,
        bank_name,
        loan_amount,
        due_date,
    })
}

async fn accept_deletion_choice(
    ctx: &BotContext,
    inbound: &InboundMessage,
    session: ConversationSession,
) -> Transition {
    let step = Step::AwaitingDeletionChoice;

    let ordinal = match parse_ordinal(&inbound.text) {
        Ok(ordinal) => ordinal,
        Err(e) => {
            log_validation_error(step.as_str(), &inbound.text, &e.to_string(), inbound.user_id);
            ctx.reply(
                inbound,
                feedback(FeedbackType::Error, "Please enter the number of the credit to delete."),
            )
            .await;
            return Transition::Reprompted(step);
        }
    };

    let Some(credit_id) = resolve_ordinal(ordinal, session.candidates()) else {
        log_validation_error(step.as_str(), &inbound.text, "out of range", inbound.user_id);
        ctx.reply(
            inbound,
            feedback(FeedbackType::Error, "Invalid credit number. Choose a number from the list."),
        )
        .await;
        return Transition::Reprompted(step);
    };

    ctx.sessions.remove(inbound.user_id).await;
    log_input_step(inbound.user_id, step.as_str(), None);

    match ctx.store.delete_credit(credit_id).await {
        Ok(()) => {
            ctx.reply(inbound, feedback(FeedbackType::Success, "Credit deleted!")).await;
            Transition::Deleted(credit_id)
        }
        Err(e) => {
            log_command_error("deletecredit", inbound.user_id, inbound.chat_id, &e.to_string());
            ctx.reply(
                inbound,
                feedback(FeedbackType::Error, "Could not delete the credit. Please try again."),
            )
            .await;
            Transition::Failed
        }
    }
}
