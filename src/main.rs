// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up diagnostic logging (stderr, controlled by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Pick the target list (built-in, or from --config)
// 4. Run one batch, or keep running batches until Ctrl+C
// 5. Exit with code 0; only a startup failure exits with 2
//
// Unhealthy endpoints do not change the exit code: they are the report,
// not an error of the tool.
// =============================================================================

mod checker;
mod cli;
mod config;
mod monitor;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use monitor::RunContext;
use report::{Console, EventLog};
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// stdout carries the report, so diagnostics go to stderr
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("app_health_checker=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();
    let log = EventLog::new(&cli.log_dir);

    // Start from the built-in list; a descriptor replaces it only if it loads
    let mut targets = config::default_targets();
    if let Some(path) = &cli.config {
        targets = config::load_or_keep(path, targets, &log);
    }

    let ctx = RunContext {
        client: checker::build_client().context("failed to build HTTP client")?,
        log,
        console: Console::detect(),
        concurrency: usize::from(cli.concurrency),
        json: cli.json,
    };

    // No interval = run once, interval = run until interrupted
    match cli.interval {
        None => {
            monitor::run_once(&ctx, &targets).await;
        }
        Some(secs) => {
            // The signal task flips the flag; the loop reads it between batches
            let (stop_tx, stop_rx) = watch::channel(false);
            tokio::spawn(async move {
                monitor::shutdown_signal().await;
                let _ = stop_tx.send(true);
            });

            monitor::run_loop(&ctx, &targets, Duration::from_secs(secs), stop_rx).await;
        }
    }

    Ok(0)
}
