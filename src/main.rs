//! Blocksmith CLI entry point.
//!
//! Handles command-line argument parsing, error display, and exit-code
//! signaling: `0` for success, `1` for hard failures, `2` for a batch that
//! completed with some per-resource failures.

use blocksmith_cli::cli::Cli;
use blocksmith_cli::core::user_friendly_error;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            user_friendly_error(e).display();
            ExitCode::FAILURE
        }
    }
}
