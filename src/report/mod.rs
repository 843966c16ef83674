// src/report/mod.rs
// =============================================================================
// Output of a check run.
//
// Submodules:
// - console: What the user sees in the terminal (blocks or JSON)
// - logfile: The dated, append-only event log on disk
// =============================================================================

mod console;
mod logfile;

pub use console::{json_report, Console};
pub use logfile::EventLog;
