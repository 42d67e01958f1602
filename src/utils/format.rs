//! Message bodies built from stored credits. All output is MarkdownV2.

use crate::database::models::Credit;
use crate::utils::datetime::format_due_date;
use crate::utils::markdown::{bold, escape_markdown, italic};

fn amount(credit: &Credit) -> String {
    escape_markdown(&format!("{:.2}", credit.loan_amount))
}

/// Full list shown by the list command. Callers handle the empty case themselves.
pub fn render_credit_list(credits: &[Credit]) -> String {
    let mut text = format!("{}\n\n", bold("Your credits:"));
    for credit in credits {
        text.push_str(&format!("🏦 {} {}\n", bold("Bank:"), escape_markdown(&credit.bank_name)));
        text.push_str(&format!("💰 {} {}\n", bold("Amount:"), amount(credit)));
        text.push_str(&format!(
            "📅 {} {}\n",
            bold("Due date:"),
            escape_markdown(&format_due_date(&credit.due_date))
        ));
        text.push_str(&escape_markdown("---"));
        text.push('\n');
    }
    text
}

/// Enumerated list for the deletion flow. Position `n` corresponds to `credits[n - 1]`.
pub fn render_deletion_list(credits: &[Credit]) -> String {
    let mut text = format!("{}\n\n", escape_markdown("Choose the number of the credit to delete:"));
    for (i, credit) in credits.iter().enumerate() {
        text.push_str(&format!(
            "{}\\. 🏦 {}, 💰 {}, 📅 {}\n",
            i + 1,
            escape_markdown(&credit.bank_name),
            amount(credit),
            escape_markdown(&format_due_date(&credit.due_date))
        ));
    }
    text
}

/// Reminder sent the day before a payment.
pub fn render_reminder(credit: &Credit) -> String {
    format!(
        "🔔 {}\n\n🏦 Bank: {}\n💰 Amount: {}\n📅 Due date: {}\n\n{}",
        bold("Loan payment reminder!"),
        escape_markdown(&credit.bank_name),
        amount(credit),
        escape_markdown(&format_due_date(&credit.due_date)),
        italic("Don't forget to pay tomorrow!")
    )
}
