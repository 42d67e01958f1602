/// Slash commands, menu buttons and their one-shot handlers
pub mod commands;
/// Shared collaborators and the transport-neutral inbound message
pub mod context;
/// Routing of inbound messages
pub mod dispatcher;
/// Telegram update handlers
pub mod handlers;
/// Multi-step form input
pub mod input;
/// Outbound messages
pub mod messenger;
/// Conversation session storage
pub mod session;
