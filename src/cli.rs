// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: the only choice the user makes is whether to
// run once (no --interval) or continuously (--interval N).
//
// Examples:
//   app-health-checker
//   app-health-checker --config targets.json
//   app-health-checker -c targets.json -i 30 --concurrency 4
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "app-health-checker",
    version,
    about = "Application Health Checker",
    long_about = "app-health-checker sends one GET request to each configured endpoint, \
                  classifies the response, prints a report and appends every result to a \
                  dated log file. With --interval it keeps checking until interrupted."
)]
pub struct Cli {
    /// Configuration file (JSON array of targets)
    ///
    /// Each entry needs a "url"; "name", "expected_status" (default 200)
    /// and "timeout" in seconds (default 5) are optional. If the file cannot
    /// be used the built-in targets are checked instead.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Check interval in seconds (continuous mode)
    ///
    /// Without this flag a single batch runs and the program exits.
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Directory for the dated log files
    #[arg(long, value_name = "DIR", env = "HEALTH_CHECKER_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// How many targets to check at the same time
    ///
    /// Output order always follows the configuration order.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Output each batch as JSON instead of a colored report
    #[arg(long)]
    pub json: bool,
}
