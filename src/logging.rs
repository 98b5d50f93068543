//! Logging setup using tracing.

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

const DEFAULT_FILTER: &str = "info,homework_bot=debug";

/// Handle that must stay alive for the file log to keep flushing.
pub struct LogHandle {
    pub guard: Option<WorkerGuard>,
    pub log_dir: Option<PathBuf>,
}

/// Initialize console logging plus a daily rolling file when a data dir is usable.
pub fn init() -> Result<LogHandle> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fn console_layer<S>() -> impl Layer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_line_number(true)
    }

    let Some(log_dir) = prepare_log_dir(get_log_dir()) else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer())
            .try_init()?;
        tracing::warn!("No usable data directory, logging to console only");
        return Ok(LogHandle {
            guard: None,
            log_dir: None,
        });
    };

    let file_appender = tracing_appender::rolling::daily(&log_dir, "homework-bot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer())
        .try_init()?;

    tracing::debug!("Log directory: {}", log_dir.display());

    Ok(LogHandle {
        guard: Some(guard),
        log_dir: Some(log_dir),
    })
}

fn get_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "homework-bot", "homework-bot")
        .map(|dirs| dirs.data_dir().join("logs"))
}

/// Create the log directory, or return `None` when it cannot be used.
fn prepare_log_dir(dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = dir?;
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(e) => {
            eprintln!("Cannot create log directory {}: {}", dir.display(), e);
            None
        }
    }
}

/// Initialize logging for tests (console only, no file).
#[cfg(test)]
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
