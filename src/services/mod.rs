/// HTTP health probes
pub mod health;
/// Daily due-tomorrow reminders
pub mod reminder;
