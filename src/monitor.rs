// src/monitor.rs
// =============================================================================
// Runs batches: exactly once, or forever on an interval.
//
// How continuous mode stops:
// - A signal handler (Ctrl+C / SIGTERM) flips a `watch` channel to true
// - The loop looks at that flag before starting a batch and while it
//   sleeps between batches
// - It never looks mid-batch, so a request already in flight finishes (or
//   hits its own timeout) and the batch summary is still printed
//
// Rust concepts:
// - tokio::select!: Wait for whichever of two futures finishes first
// - tokio::sync::watch: A single value many tasks can observe
// =============================================================================

use crate::checker::{run_batch, BatchReport};
use crate::config::Target;
use crate::report::{json_report, Console, EventLog};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// Everything a run needs besides the target list.
pub struct RunContext {
    pub client: Client,
    pub log: EventLog,
    pub console: Console,
    /// How many targets are checked at once inside a batch
    pub concurrency: usize,
    /// Print each batch as JSON instead of colored blocks
    pub json: bool,
}

impl RunContext {
    // Runs one batch, printing and logging each result as it comes in
    async fn batch(&self, targets: &[Target]) -> BatchReport {
        let report = run_batch(&self.client, targets, self.concurrency, |result| {
            // In JSON mode the whole batch is printed at the end instead
            if !self.json {
                println!("{}", self.console.result_block(result));
            }
            self.log.log_result(result);
        })
        .await;

        if self.json {
            match json_report(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => error!(error = %e, "failed to serialize batch"),
            }
        } else {
            println!(
                "{}",
                self.console
                    .summary_block(&report.summary, &self.log.current_path())
            );
        }
        self.log.log_summary(&report.summary);

        report
    }

    fn print_text(&self, text: &str) {
        if !self.json {
            println!("{}", text);
        }
    }
}

/// Checks every target once.
pub async fn run_once(ctx: &RunContext, targets: &[Target]) -> BatchReport {
    ctx.print_text(&ctx.console.header());
    ctx.batch(targets).await
}

/// Repeats batches every `interval` until `shutdown` turns true.
///
/// Returns how many batches were run.
pub async fn run_loop(
    ctx: &RunContext,
    targets: &[Target],
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    ctx.print_text(&ctx.console.header());
    ctx.print_text(&ctx.console.continuous_banner(interval.as_secs()));
    info!(interval_secs = interval.as_secs(), targets = targets.len(), "continuous mode started");

    let mut batches = 0;
    loop {
        if *shutdown.borrow() {
            break;
        }

        ctx.batch(targets).await;
        batches += 1;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = stop_requested(&mut shutdown) => break,
        }
    }

    ctx.print_text(&ctx.console.stopped());
    info!(batches, "continuous mode stopped");
    batches
}

// Resolves once the flag is true. If the sender is gone nobody can ask us
// to stop any more, so this never resolves.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, stopping after the current batch"),
        _ = terminate => info!("Received SIGTERM, stopping after the current batch"),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a watch channel instead of a plain bool?
//    - The signal handler runs in its own task, so it can't just write to a
//      local variable in run_loop
//    - watch keeps only the latest value, which is all we need here
//
// 2. What happens to the sleep when we break out of select!?
//    - The losing branch's future is dropped, which cancels it
//    - Dropping a sleep is free; nothing else is left running
// -----------------------------------------------------------------------------
