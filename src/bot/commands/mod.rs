pub mod add_credit;
pub mod delete_credit;
pub mod help;
pub mod list;

use teloxide::utils::command::BotCommands;

use crate::bot::context::{BotContext, InboundMessage};
use crate::utils::logging::log_command_start;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Credit reminder bot commands:")]
pub enum Command {
    #[command(description = "Show the menu and this help")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Add a new credit")]
    AddCredit,
    #[command(description = "Show your credits")]
    MyCredits,
    #[command(description = "Delete one of your credits")]
    DeleteCredit,
}

/// What the user asked for, regardless of whether it came as a slash command or a menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Help,
    AddCredit,
    ListCredits,
    DeleteCredit,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Help => "help",
            Action::AddCredit => "addcredit",
            Action::ListCredits => "mycredits",
            Action::DeleteCredit => "deletecredit",
        }
    }
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Help | Command::Start => Action::Help,
            Command::AddCredit => Action::AddCredit,
            Command::MyCredits => Action::ListCredits,
            Command::DeleteCredit => Action::DeleteCredit,
        }
    }
}

/// A button on the persistent reply keyboard.
#[derive(Debug, Clone, Copy)]
pub struct MenuButton {
    pub action: Action,
    pub emoji: &'static str,
    pub label: &'static str,
}

impl MenuButton {
    /// The text Telegram sends back when the button is pressed.
    pub fn text(&self) -> String {
        format!("{} {}", self.emoji, self.label)
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        text == self.text() || text.eq_ignore_ascii_case(self.label)
    }
}

pub const MENU_BUTTONS: [MenuButton; 4] = [
    MenuButton { action: Action::AddCredit, emoji: "➕", label: "Add credit" },
    MenuButton { action: Action::ListCredits, emoji: "💶", label: "My credits" },
    MenuButton { action: Action::DeleteCredit, emoji: "➖", label: "Delete credit" },
    MenuButton { action: Action::Help, emoji: "🆘", label: "Help" },
];

/// Maps a slash command or a menu label to an [`Action`].
pub fn resolve_action(text: &str, bot_username: &str) -> Option<Action> {
    if let Ok(command) = Command::parse(text, bot_username) {
        return Some(command.into());
    }
    MENU_BUTTONS
        .iter()
        .find(|button| button.matches(text))
        .map(|button| button.action)
}

/// Runs the one-shot handler for `action`.
pub async fn run_action(ctx: &BotContext, inbound: &InboundMessage, action: Action) {
    log_command_start(action.name(), inbound.user_id, inbound.chat_id);
    match action {
        Action::Help => help::handle_help(ctx, inbound).await,
        Action::AddCredit => add_credit::handle_add_credit(ctx, inbound).await,
        Action::ListCredits => list::handle_list(ctx, inbound).await,
        Action::DeleteCredit => delete_credit::handle_delete_credit(ctx, inbound).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_commands_resolve() {
        assert_eq!(resolve_action("/start", "testbot"), Some(Action::Help));
        assert_eq!(resolve_action("/help", "testbot"), Some(Action::Help));
        assert_eq!(resolve_action("/addcredit", "testbot"), Some(Action::AddCredit));
        assert_eq!(resolve_action("/mycredits", "testbot"), Some(Action::ListCredits));
        assert_eq!(resolve_action("/deletecredit", "testbot"), Some(Action::DeleteCredit));
    }

    #[test]
    fn test_addressed_command_resolves() {
        assert_eq!(resolve_action("/addcredit@testbot", "testbot"), Some(Action::AddCredit));
        assert_eq!(resolve_action("/addcredit@otherbot", "testbot"), None);
    }

    #[test]
    fn test_menu_labels_resolve() {
        for button in MENU_BUTTONS {
            assert_eq!(resolve_action(&button.text(), "testbot"), Some(button.action));
            assert_eq!(resolve_action(button.label, "testbot"), Some(button.action));
        }
        assert_eq!(resolve_action("my credits", "testbot"), Some(Action::ListCredits));
    }

    #[test]
    fn test_free_text_does_not_resolve() {
        assert_eq!(resolve_action("BankA", "testbot"), None);
        assert_eq!(resolve_action("10000.50", "testbot"), None);
        assert_eq!(resolve_action("/unknown", "testbot"), None);
    }

    #[test]
    fn test_every_action_has_a_button() {
        for action in [Action::Help, Action::AddCredit, Action::ListCredits, Action::DeleteCredit] {
            assert_eq!(MENU_BUTTONS.iter().filter(|b| b.action == action).count(), 1);
        }
    }
}
