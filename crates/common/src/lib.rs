pub mod config;
pub mod error;
pub mod notifier;
pub mod schedule;
pub mod source;
pub mod types;

pub use config::{Config, WatchlistConfig};
pub use error::{ensure_len, Error, Result};
pub use notifier::{format_report, Notifier, REPORT_SUBJECT};
pub use schedule::ScheduledJob;
pub use source::MarketDataSource;
pub use types::*;
