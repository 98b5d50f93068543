//! homework-bot library root.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod poller;
pub mod practicum;
pub mod telegram;

pub use cli::Commands;
pub use config::{check_tokens, Credentials, Settings};
pub use error::{Error, FormatError, Result, ValidationError, ValidationKind};
pub use poller::{HomeworkPoller, PollOutcome, PollState};
pub use practicum::{check_response, parse_status, HomeworkSource, HomeworkStatus, PracticumClient};
pub use telegram::{Notifier, TelegramNotifier};
