//! # Credit Reminder Bot
//!
//! A Telegram bot that records personal loan payments and reminds each user the
//! day before a payment is due.
//!
//! ## Features
//! - Add a credit through a three-step form (bank, amount, due date)
//! - List and delete recorded credits
//! - Daily reminder for every credit due tomorrow
//! - Persistent storage with SQLite

/// Bot command handlers, the input state machine and message routing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Storage error types
pub mod error;
/// Background services: reminders and health probes
pub mod services;
/// Utility functions for dates, validation, and formatting
pub mod utils;
