//! homework-bot - reports homework review status changes to Telegram.

use clap::Parser;
use std::process::ExitCode;

use homework_bot::{logging, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the variables may come from the process environment.
    dotenvy::dotenv().ok();

    let _log = match logging::init() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args = Commands::parse();

    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
