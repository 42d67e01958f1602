//! Telegram MarkdownV2 helpers.
//!
//! Every outbound message is sent with `ParseMode::MarkdownV2`, so any text that
//! did not originate in this crate (bank names, amounts, dates) must pass through
//! [`escape_markdown`] before it is embedded in a message.

/// Characters with special meaning in MarkdownV2 outside of code spans.
const RESERVED: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes markdown special characters so they are rendered literally.
///
/// # Example
/// ```
/// use credit_reminder_bot::utils::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("10000.50 (due)"), "10000\\.50 \\(due\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes `text` and wraps it in bold markers.
pub fn bold(text: &str) -> String {
    format!("*{}*", escape_markdown(text))
}

/// Escapes `text` and wraps it in italic markers.
pub fn italic(text: &str) -> String {
    format!("_{}_", escape_markdown(text))
}
