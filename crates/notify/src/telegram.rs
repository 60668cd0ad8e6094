use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{info, warn};

use common::{Error, Notifier, Result};

/// Delivers summaries to every configured Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_ids: Vec<ChatId>,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_ids: &[i64]) -> Self {
        Self {
            bot,
            chat_ids: chat_ids.iter().copied().map(ChatId).collect(),
        }
    }
}

fn compose(subject: &str, body: &str) -> String {
    format!("{subject}\n\n{body}")
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// Fails only when no chat received the message.
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let text = compose(subject, body);
        let mut delivered = 0;

        for &chat_id in &self.chat_ids {
            match self.bot.send_message(chat_id, text.clone()).await {
                Ok(_) => delivered += 1,
                Err(e) => warn!(chat_id = ?chat_id, error = %e, "Failed to send Telegram summary"),
            }
        }

        if delivered == 0 {
            return Err(Error::Notify(format!(
                "summary not delivered to any of {} chats",
                self.chat_ids.len()
            )));
        }
        info!(delivered, "Summary sent via Telegram");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_puts_subject_first() {
        assert_eq!(compose("Results", "EUR/USD"), "Results\n\nEUR/USD");
    }

    #[tokio::test]
    async fn no_chats_is_an_error() {
        let notifier = TelegramNotifier::new(Bot::new("0:token"), &[]);
        let err = notifier.notify("s", "b").await.unwrap_err();
        assert!(matches!(err, Error::Notify(_)));
    }
}
