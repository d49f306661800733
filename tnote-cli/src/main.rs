use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod editor;
mod error;
mod fuzzy;
mod prompt;
mod tui;

use cli::Cli;
use error::CliError;
use tnote_core::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so listings on stdout stay pipeable
    let default_level = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    debug!("Using notes in {}", settings.note_dir.display());

    commands::dispatch(cli.command, &settings).await
}

fn report(err: &CliError) {
    eprintln!("Error: {err}");
    if let CliError::Scan(scan) = err {
        for failure in scan.failures() {
            eprintln!("  note not read: {}", failure.error);
        }
    }
}
