// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voidbank - compute-credit bank for shared game-engine hardware.
//!
//! This is the binary entry point.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use voidbank_banker::VoidBanker;

use crate::commands::{Commands, Outcome};

/// Voidbank - compute-credit bank for shared game-engine hardware.
#[derive(Parser, Debug)]
#[command(name = "voidbank", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON hardware snapshot to install before running the command.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => voidbank_config::load_and_validate_path(path),
        None => voidbank_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            voidbank_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.bank.log_level);
    tracing::debug!(database = %config.storage.database_path, "config loaded");

    let banker = match VoidBanker::open(&config).await {
        Ok(banker) => banker,
        Err(e) => {
            eprintln!("voidbank: failed to open ledger: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cli.snapshot {
        match commands::load_snapshot(path) {
            Ok(snapshot) => banker.update_hardware_state(&snapshot),
            Err(e) => {
                eprintln!("voidbank: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut stdout = std::io::stdout().lock();
    match commands::run(cli.command, &banker, &config, &mut stdout).await {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Refused) => ExitCode::from(2),
        Err(e) => {
            eprintln!("voidbank: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voidbank={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
