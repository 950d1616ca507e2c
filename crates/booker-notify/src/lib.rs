//! # booker-notify
//!
//! Best-effort user notifications: a Telegram Bot API client implementing
//! [`Notifier`](booker_core::traits::Notifier), message formatting, and a
//! dispatcher that treats the notifier as an optional capability.

pub mod dispatcher;
pub mod formatter;
pub mod telegram;

pub use dispatcher::{DeliveryOutcome, NotificationDispatcher};
pub use formatter::NotificationFormatter;
pub use telegram::TelegramNotifier;
