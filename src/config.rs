//! Configuration loading and the startup credential gate.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 5;

/// Raw credential values as read from the environment or command line.
#[derive(Clone, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &redacted(&self.practicum_token))
            .field("telegram_token", &redacted(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => "<set>",
        _ => "<missing>",
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Credentials {
    /// Names of the variables that are absent or blank.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Fail unless all three credentials are present and the chat id is an integer.
pub fn check_tokens(credentials: &Credentials) -> Result<()> {
    let missing = credentials.missing();
    if !missing.is_empty() {
        tracing::error!(critical = true, "Missing required variables: {:?}", missing);
        return Err(Error::Config(format!(
            "Environment has no required variables: {}",
            missing.join(", ")
        )));
    }

    let chat_id = present(&credentials.telegram_chat_id).unwrap_or_default();
    if chat_id.parse::<i64>().is_err() {
        tracing::error!(critical = true, "TELEGRAM_CHAT_ID is not a number: {}", chat_id);
        return Err(Error::Config(format!(
            "TELEGRAM_CHAT_ID is not a number: {}",
            chat_id
        )));
    }

    tracing::debug!("Credentials present for chat {}", chat_id);
    Ok(())
}

/// Immutable runtime settings, built once at startup.
#[derive(Clone)]
pub struct Settings {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: i64,
    pub endpoint: String,
    pub retry_period: Duration,
    pub telegram_api_url: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_period", &self.retry_period)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Gate the credentials and build settings with default endpoint and period.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        check_tokens(credentials)?;

        let field = |value: &Option<String>| present(value).unwrap_or_default().to_string();
        let chat_id = field(&credentials.telegram_chat_id)
            .parse::<i64>()
            .map_err(|e| Error::Config(format!("TELEGRAM_CHAT_ID is not a number: {}", e)))?;

        Ok(Self {
            practicum_token: field(&credentials.practicum_token),
            telegram_token: field(&credentials.telegram_token),
            chat_id,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_period: Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
            telegram_api_url: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_retry_period(mut self, period: Duration) -> Self {
        self.retry_period = period;
        self
    }

    pub fn with_telegram_api_url(mut self, url: Option<String>) -> Self {
        self.telegram_api_url = url;
        self
    }
}
