/// SQLite connection pool and schema setup
pub mod connection;
/// Row types and their queries
pub mod models;
/// The Storage Gateway contract used by the bot and the notifier
pub mod store;
