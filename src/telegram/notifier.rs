//! Delivery of bot messages to the configured chat.

use async_trait::async_trait;
use teloxide::prelude::*;

use crate::config::Settings;
use crate::error::{Error, Result};

/// Sends text to a single fixed chat.
///
/// Implementations must report every delivery failure as
/// [`Error::DeliverySuppressed`] instead of panicking or returning another variant.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, message: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut bot = Bot::new(settings.telegram_token.clone());

        if let Some(url) = &settings.telegram_api_url {
            let url = reqwest::Url::parse(url)
                .map_err(|e| Error::Config(format!("Invalid Telegram API url '{}': {}", url, e)))?;
            bot = bot.set_api_url(url);
        }

        Ok(Self {
            bot,
            chat_id: ChatId(settings.chat_id),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, message: &str) -> Result<()> {
        tracing::debug!("Sending message to chat {}", self.chat_id);

        match self.bot.send_message(self.chat_id, message).await {
            Ok(_) => {
                tracing::debug!("Message delivered to chat {}", self.chat_id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Message to chat {} was not sent: {}", self.chat_id, e);
                Err(Error::DeliverySuppressed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use httpmock::prelude::*;
    use serde_json::json;

    fn settings(api_url: Option<String>) -> Settings {
        Settings::from_credentials(&Credentials {
            practicum_token: Some("practicum-token".to_string()),
            telegram_token: Some("123:telegram-token".to_string()),
            telegram_chat_id: Some("42".to_string()),
        })
        .expect("settings")
        .with_telegram_api_url(api_url)
    }

    #[test]
    fn test_invalid_api_url_is_config_error() {
        let result = TelegramNotifier::new(&settings(Some("not a url".to_string())));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_message_is_sent_to_configured_chat() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .body_includes("\"chat_id\":42")
                .body_includes("Изменился статус");
            then.status(200).json_body(json!({
                "ok": true,
                "result": {
                    "message_id": 1,
                    "date": 0,
                    "chat": {"id": 42, "type": "private", "first_name": "Student"},
                    "from": {"id": 123, "is_bot": true, "first_name": "homework-bot"},
                    "text": "Изменился статус"
                }
            }));
        });

        let notifier = TelegramNotifier::new(&settings(Some(server.base_url()))).expect("notifier");
        let result = notifier.send_message("Изменился статус").await;

        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_api_rejection_is_suppressed() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(400).json_body(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            }));
        });

        let notifier = TelegramNotifier::new(&settings(Some(server.base_url()))).expect("notifier");
        let err = notifier.send_message("hello").await.unwrap_err();

        assert!(mock.calls() >= 1);
        assert!(matches!(err, Error::DeliverySuppressed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_suppressed() {
        let notifier =
            TelegramNotifier::new(&settings(Some("http://127.0.0.1:9".to_string()))).expect("notifier");
        let err = notifier.send_message("hello").await.unwrap_err();
        assert!(matches!(err, Error::DeliverySuppressed(_)));
    }
}
