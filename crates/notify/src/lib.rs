pub mod commands;
pub mod log;
pub mod telegram;

pub use commands::{start_bot, BotDeps};
pub use common::format_report;
pub use log::LogNotifier;
pub use telegram::TelegramNotifier;
