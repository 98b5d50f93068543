//! CLI commands using clap.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::{Credentials, Settings, DEFAULT_ENDPOINT, DEFAULT_RETRY_PERIOD_SECS};
use crate::poller::HomeworkPoller;
use crate::practicum::{check_response, parse_status, HomeworkSource, PracticumClient};
use crate::telegram::{Notifier, TelegramNotifier};

/// Watches homework review status and reports changes to Telegram.
#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(version = "0.1.0")]
#[command(about = "Homework review status notifier for Telegram", long_about = None)]
pub struct Commands {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: Options,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll the API and notify on status changes until interrupted
    Run,

    /// Validate credentials and exit
    Check,

    /// Run a single fetch and print the resulting message
    Once {
        /// Fetch changes since this UNIX timestamp
        #[arg(long, default_value_t = 0)]
        from_date: i64,

        /// Also deliver the message to the chat
        #[arg(long)]
        send: bool,
    },
}

#[derive(Args, Clone)]
pub struct Options {
    /// Practicum API OAuth token
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true, global = true)]
    pub practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true, global = true)]
    pub telegram_token: Option<String>,

    /// Chat that receives notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID", global = true)]
    pub telegram_chat_id: Option<String>,

    /// Homework status endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Seconds to sleep between polls
    #[arg(long, env = "RETRY_PERIOD", default_value_t = DEFAULT_RETRY_PERIOD_SECS, global = true)]
    pub retry_period: u64,

    /// Override the Telegram Bot API base url
    #[arg(long, env = "TELEGRAM_API_URL", global = true)]
    pub telegram_api_url: Option<String>,
}

impl Options {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            practicum_token: self.practicum_token.clone(),
            telegram_token: self.telegram_token.clone(),
            telegram_chat_id: self.telegram_chat_id.clone(),
        }
    }

    /// Run the credential gate and build the runtime settings.
    pub fn settings(&self) -> crate::error::Result<Settings> {
        Ok(Settings::from_credentials(&self.credentials())?
            .with_endpoint(self.endpoint.clone())
            .with_retry_period(Duration::from_secs(self.retry_period))
            .with_telegram_api_url(self.telegram_api_url.clone()))
    }
}

impl Commands {
    pub async fn run(&self) -> Result<()> {
        let settings = self.options.settings()?;

        match &self.command {
            Command::Run => cmd_run(&settings).await,
            Command::Check => cmd_check(&settings),
            Command::Once { from_date, send } => cmd_once(&settings, *from_date, *send).await,
        }
    }
}

async fn cmd_run(settings: &Settings) -> Result<()> {
    let notifier = TelegramNotifier::new(settings).context("Failed to create Telegram bot")?;
    let client = PracticumClient::new(settings);
    let mut poller = HomeworkPoller::new(client, notifier, settings);

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, stopping homework poller");
        }
    }

    Ok(())
}

fn cmd_check(settings: &Settings) -> Result<()> {
    println!("Credentials OK");
    println!("  chat id:      {}", settings.chat_id);
    println!("  endpoint:     {}", settings.endpoint);
    println!("  retry period: {}s", settings.retry_period.as_secs());
    Ok(())
}

async fn cmd_once(settings: &Settings, from_date: i64, send: bool) -> Result<()> {
    let client = PracticumClient::new(settings);
    let raw = client.fetch_updates(from_date).await?;
    let response = check_response(&raw)?;

    let Some(latest) = response.latest() else {
        println!("No homework updates since {}", from_date);
        return Ok(());
    };

    let message = parse_status(latest)?;
    println!("{}", message);

    if send {
        let notifier = TelegramNotifier::new(settings)?;
        notifier.send_message(&message).await?;
        println!("Delivered to chat {}", settings.chat_id);
    }

    if let Some(current_date) = response.current_date {
        println!("Next cursor: {}", current_date);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_once_with_flags() {
        let args = Commands::try_parse_from([
            "homework-bot",
            "once",
            "--from-date",
            "1000",
            "--send",
            "--practicum-token",
            "p",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "42",
            "--retry-period",
            "30",
        ])
        .unwrap();

        assert!(matches!(args.command, Command::Once { from_date: 1000, send: true }));
        let settings = args.options.settings().unwrap();
        assert_eq!(settings.chat_id, 42);
        assert_eq!(settings.retry_period, Duration::from_secs(30));
    }

    #[test]
    fn test_bad_chat_id_fails_gate() {
        let args = Commands::try_parse_from([
            "homework-bot",
            "check",
            "--practicum-token",
            "p",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "chat",
        ])
        .unwrap();

        assert!(matches!(args.options.settings(), Err(Error::Config(_))));
    }
}
