use async_trait::async_trait;
use tracing::info;

use common::{Notifier, Result};

/// Writes summaries to the log. Used when no Telegram chat is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        info!(subject, "{body}");
        Ok(())
    }
}
