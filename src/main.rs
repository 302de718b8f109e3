//! MOTD Artisan - ASCII art as a message of the day
//!
//! Fetches AI-generated ASCII art, keeps a small rotating cache of it on disk and
//! prints it to the terminal with optional color themes.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use motd_artisan::cli::{Cli, Command};
use motd_artisan::commands::{self, Console};
use motd_artisan::config::{self, Config};

/// Installs a stderr logger filtered by `RUST_LOG`
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motd_artisan=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let silent = cli.command == Command::Login;

    // RUST_LOG may come from an env file
    config::load_env_files();
    // Login output must be nothing but art
    if !silent {
        init_tracing();
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(_) if silent => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let stdin = io::stdin();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let mut input = stdin.lock();
    let mut console = Console {
        out: &mut out,
        err: &mut err,
        input: &mut input,
    };

    match commands::run(&cli.command, &config, &mut console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_user_message() => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
