use crate::utils::markdown::{escape_markdown, italic};

/// Feedback types for different command outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Error,
    Info,
    /// Asks the user to type the next form value
    Prompt,
}

impl FeedbackType {
    fn emoji(self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
            FeedbackType::Prompt => "✏️",
        }
    }
}

/// Formats a one-line feedback message as escaped MarkdownV2.
pub fn feedback(kind: FeedbackType, message: &str) -> String {
    format!("{} {}", kind.emoji(), escape_markdown(message))
}

/// Formats feedback followed by an italic hint on its own line.
pub fn feedback_with_hint(kind: FeedbackType, message: &str, hint: &str) -> String {
    format!("{}\n\n💡 {}", feedback(kind, message), italic(hint))
}
