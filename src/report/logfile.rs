// src/report/logfile.rs
// =============================================================================
// The event log: an append-only text file, one line per event.
//
//   logs/app_health_20261014.log
//   [2026-10-14 09:30:00] [INFO] GitHub (https://github.com) - Status: UP | Code: 200 | Time: 312.5ms
//   [2026-10-14 09:30:05] [ERROR] Invalid Site (Demo) (https://...) - Status: DOWN | Error: Connection failed
//
// The file name is worked out again on every write, so a long-running
// continuous session rolls over to a new file at midnight.
//
// Writing the log must never stop a check run. Failures are reported on
// stderr through tracing and otherwise ignored.
// =============================================================================

use crate::checker::{CheckResult, HealthStatus, Summary};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => f.write_str("INFO"),
            LogLevel::Error => f.write_str("ERROR"),
        }
    }
}

/// Appends event lines to a dated file inside `dir`.
#[derive(Debug, Clone)]
pub struct EventLog {
    dir: PathBuf,
}

impl EventLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file today's events go to.
    pub fn current_path(&self) -> PathBuf {
        self.path_for(Local::now().date_naive())
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("app_health_{}.log", date.format("%Y%m%d")))
    }

    pub fn info(&self, message: &str) {
        self.write(LogLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.write(LogLevel::Error, message);
    }

    /// Logs one check result; DOWN is the only status logged as ERROR.
    pub fn log_result(&self, result: &CheckResult) {
        let level = if result.status == HealthStatus::Down {
            LogLevel::Error
        } else {
            LogLevel::Info
        };
        self.write(level, &result_line(result));
    }

    pub fn log_summary(&self, summary: &Summary) {
        self.info(&format!(
            "Summary - Total: {}, UP: {}, DOWN: {}, ERRORS: {}",
            summary.total, summary.up, summary.down, summary.errors
        ));
    }

    fn write(&self, level: LogLevel, message: &str) {
        // One clock reading for both the file name and the line timestamp
        let now = Local::now().naive_local();
        let path = self.path_for(now.date());

        // Log problems only - never propagate them

        if let Err(e) = self.append(&path, &format_line(now, level, message)) {
            tracing::error!(path = %path.display(), error = %e, "Failed to write to log");
        }
    }

    fn append(&self, path: &Path, line: &str) -> io::Result<()> {
        // Make sure logs/ exists (no-op if it already does)
        fs::create_dir_all(&self.dir)?;
        // create + append: start the file if needed, never overwrite it
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", line)
    }
}

fn format_line(timestamp: NaiveDateTime, level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        level,
        message
    )
}

// "<name> (<url>) - Status: <STATUS>" plus whichever details are present
fn result_line(result: &CheckResult) -> String {
    let mut line = format!("{} ({}) - Status: {}", result.name, result.url, result.status);
    if let Some(code) = result.status_code {
        line.push_str(&format!(" | Code: {}", code));
    }
    if let Some(ms) = result.response_time_ms {
        line.push_str(&format!(" | Time: {}ms", ms));
    }
    if let Some(error) = &result.error {
        line.push_str(&format!(" | Error: {}", error));
    }
    line
}
