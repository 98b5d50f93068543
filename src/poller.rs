//! The polling loop: fetch, check, format, deduplicate, notify, sleep.

use std::time::Duration;

use tokio::time::sleep;

use crate::config::Settings;
use crate::error::{render_chain, Error, Result};
use crate::practicum::{check_response, parse_status, HomeworkSource};
use crate::telegram::Notifier;

const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Cursor and last delivered text. Lives only for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    pub cursor: i64,
    pub last_message: String,
}

/// What a single poll iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new status message was delivered.
    Notified(String),
    /// The newest status matches what was already delivered.
    Duplicate,
    /// The API reported no homework changes.
    NoUpdates,
    /// A status message could not be delivered; state is left as it was.
    DeliveryFailed,
    /// The iteration failed; `reported` tells whether the failure text reached the chat.
    Failure { message: String, reported: bool },
}

pub struct HomeworkPoller<S, N> {
    source: S,
    notifier: N,
    state: PollState,
    retry_period: Duration,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Chat text for an error that interrupted an iteration.
pub fn failure_message(error: &Error) -> String {
    format!("{}: {}", FAILURE_PREFIX, render_chain(error))
}

impl<S: HomeworkSource, N: Notifier> HomeworkPoller<S, N> {
    /// Create a poller that starts fetching from the current time.
    pub fn new(source: S, notifier: N, settings: &Settings) -> Self {
        Self {
            source,
            notifier,
            state: PollState {
                cursor: now(),
                last_message: String::new(),
            },
            retry_period: settings.retry_period,
        }
    }

    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.state.cursor = cursor;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll forever, sleeping the retry period between iterations.
    pub async fn run(&mut self) {
        tracing::info!(
            "Homework poller started: cursor={}, retry period {:?}",
            self.state.cursor,
            self.retry_period
        );

        loop {
            tracing::debug!("New poll: cursor={}, now={}", self.state.cursor, now());

            if self.poll_once().await == PollOutcome::DeliveryFailed {
                tracing::error!(
                    "Cursor stays at {}; delivery will be retried in {:?}",
                    self.state.cursor,
                    self.retry_period
                );
            }

            sleep(self.retry_period).await;
        }
    }

    /// Run a single iteration. Never fails: errors become failure notifications.
    pub async fn poll_once(&mut self) -> PollOutcome {
        match self.check_updates().await {
            Ok(outcome) => outcome,
            Err(Error::DeliverySuppressed(reason)) => {
                tracing::error!("Status message not delivered: {}", reason);
                PollOutcome::DeliveryFailed
            }
            Err(
                error @ (Error::ApiTransport { .. }
                | Error::ApiStatus { .. }
                | Error::ApiBody { .. }
                | Error::Validation(_)
                | Error::Format(_)),
            ) => self.report_failure(&error).await,
            Err(error) => {
                tracing::error!("Unexpected error inside poll loop: {:?}", error);
                self.report_failure(&error).await
            }
        }
    }

    async fn check_updates(&mut self) -> Result<PollOutcome> {
        let raw = self.source.fetch_updates(self.state.cursor).await?;
        let response = check_response(&raw)?;
        let next_cursor = response.current_date.unwrap_or_else(|| now() - 1);

        let Some(latest) = response.latest() else {
            tracing::debug!("No homework status updates");
            self.state.cursor = next_cursor;
            return Ok(PollOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if message == self.state.last_message {
            tracing::debug!("Status unchanged since last notification");
            self.state.cursor = next_cursor;
            return Ok(PollOutcome::Duplicate);
        }

        self.notifier.send_message(&message).await?;
        tracing::info!("Status change delivered: {}", message);

        self.state.cursor = next_cursor;
        self.state.last_message = message.clone();
        Ok(PollOutcome::Notified(message))
    }

    async fn report_failure(&mut self, error: &Error) -> PollOutcome {
        let message = failure_message(error);
        tracing::error!("{}", message);

        if message == self.state.last_message {
            return PollOutcome::Failure {
                message,
                reported: false,
            };
        }

        let reported = match self.notifier.send_message(&message).await {
            Ok(()) => {
                self.state.last_message = message.clone();
                true
            }
            Err(e) => {
                tracing::error!("Failure notification not delivered: {}", e);
                false
            }
        };

        PollOutcome::Failure { message, reported }
    }
}
