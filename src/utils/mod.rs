/// Date helpers for due dates and the daily schedule
pub mod datetime;
/// Emoji-tagged user feedback lines
pub mod feedback;
/// Rendering of credit lists and reminders
pub mod format;
/// Structured log lines
pub mod logging;
/// MarkdownV2 escaping
pub mod markdown;
/// Parsing of free-text form input
pub mod validation;
