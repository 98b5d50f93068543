//! Telegram delivery for status and failure notifications.

pub mod notifier;

pub use notifier::{Notifier, TelegramNotifier};
