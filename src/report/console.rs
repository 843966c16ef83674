// src/report/console.rs
// =============================================================================
// Human-readable terminal output.
//
// Every function here builds a String and leaves the printing to the
// caller. That keeps the formatting testable without capturing stdout.
//
// Colors are plain ANSI escape codes and are only used when stdout is a
// terminal, so redirecting output to a file gives clean text.
// =============================================================================

use crate::checker::{BatchReport, CheckResult, HealthStatus, Summary};
use chrono::Local;
use std::fmt::Write as _;
use std::io::IsTerminal;
use std::path::Path;

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[0;34m";
const RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 50;

/// Renders reports for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    /// Colors on if stdout is a terminal.
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { color: false }
    }

    // Wraps text in a color code and a reset, or leaves it alone
    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn header(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.paint(GREEN, &rule));
        let _ = writeln!(out, "{}", self.paint(GREEN, "  APPLICATION HEALTH CHECKER"));
        let _ = writeln!(out, "{}", self.paint(GREEN, &format!("  {}", now)));
        let _ = writeln!(out, "{}", self.paint(GREEN, &rule));
        out
    }

    pub fn continuous_banner(&self, interval_secs: u64) -> String {
        format!(
            "Running in continuous mode (interval: {}s)\nPress Ctrl+C to stop\n",
            interval_secs
        )
    }

    pub fn stopped(&self) -> String {
        format!("\n{}", self.paint(YELLOW, "Health checker stopped by user"))
    }

    // One block per target: glyph + name, then whichever details exist
    pub fn result_block(&self, result: &CheckResult) -> String {
        let (color, glyph) = glyph(result.status);
        // writeln! into a String can't fail, so we ignore the fmt::Result
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.paint(color, &format!("[{}] {}", glyph, result.name)));
        let _ = writeln!(out, "    URL: {}", result.url);
        // Only show the details we actually have
        if let Some(code) = result.status_code {
            let _ = writeln!(out, "    Status Code: {}", code);
        }
        if let Some(ms) = result.response_time_ms {
            let _ = writeln!(out, "    Response Time: {}ms", ms);
        }
        if let Some(error) = &result.error {
            let _ = writeln!(out, "    Error: {}", error);
        }
        out
    }

    pub fn summary_block(&self, summary: &Summary, log_path: &Path) -> String {
        let rule = self.paint(BLUE, &"=".repeat(RULE_WIDTH));
        let mut out = String::new();
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{}", self.paint(BLUE, "SUMMARY REPORT"));
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Total Applications: {}", summary.total);
        let _ = writeln!(out, "{}", self.paint(GREEN, &format!("UP: {}", summary.up)));
        let _ = writeln!(out, "{}", self.paint(RED, &format!("DOWN: {}", summary.down)));
        let _ = writeln!(out, "{}", self.paint(YELLOW, &format!("ERRORS: {}", summary.errors)));
        let _ = writeln!(out, "Log File: {}", log_path.display());
        let _ = writeln!(out, "{}", rule);
        out
    }
}

// (color, glyph) for a status
fn glyph(status: HealthStatus) -> (&'static str, char) {
    match status {
        HealthStatus::Up => (GREEN, '✓'),
        HealthStatus::Down | HealthStatus::ServerError => (RED, '✗'),
        HealthStatus::ClientError | HealthStatus::Redirect => (YELLOW, '⚠'),
        HealthStatus::Error | HealthStatus::Unknown => (BLUE, '?'),
    }
}

/// One batch as pretty-printed JSON.
pub fn json_report(report: &BatchReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: HealthStatus) -> CheckResult {
        CheckResult {
            name: "Docs".to_string(),
            url: "https://docs.example".to_string(),
            status,
            status_code: None,
            response_time_ms: None,
            error: None,
        }
    }

    #[test]
    fn test_result_block_up() {
        let mut result = sample(HealthStatus::Up);
        result.status_code = Some(200);
        result.response_time_ms = Some(42.17);

        let block = Console::plain().result_block(&result);
        assert_eq!(
            block,
            "[✓] Docs\n    URL: https://docs.example\n    Status Code: 200\n    Response Time: 42.17ms\n"
        );
    }

    #[test]
    fn test_result_block_down_shows_error_only() {
        let mut result = sample(HealthStatus::Down);
        result.error = Some("Connection failed".to_string());

        let block = Console::plain().result_block(&result);
        assert!(block.starts_with("[✗] Docs\n"));
        assert!(block.contains("    Error: Connection failed\n"));
        assert!(!block.contains("Status Code"));
        assert!(!block.contains("Response Time"));
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(HealthStatus::ServerError).1, '✗');
        assert_eq!(glyph(HealthStatus::Redirect).1, '⚠');
        assert_eq!(glyph(HealthStatus::ClientError).1, '⚠');
        assert_eq!(glyph(HealthStatus::Unknown).1, '?');
        assert_eq!(glyph(HealthStatus::Error).1, '?');
    }

    #[test]
    fn test_summary_block() {
        let summary = Summary { total: 3, up: 1, down: 1, errors: 1 };
        let block = Console::plain().summary_block(&summary, Path::new("logs/app.log"));
        assert!(block.contains("Total Applications: 3\n"));
        assert!(block.contains("UP: 1\nDOWN: 1\nERRORS: 1\n"));
        assert!(block.contains("Log File: logs/app.log\n"));
    }

    #[test]
    fn test_colors_only_when_enabled() {
        let colored = Console { color: true }.result_block(&sample(HealthStatus::Up));
        assert!(colored.starts_with(GREEN));
        let plain = Console::plain().result_block(&sample(HealthStatus::Up));
        assert!(!plain.contains('\x1b'));
    }

    #[test]
    fn test_json_report_shape() {
        let report = BatchReport {
            results: vec![sample(HealthStatus::Redirect)],
            summary: Summary { total: 1, up: 0, down: 0, errors: 0 },
        };
        let value: serde_json::Value = serde_json::from_str(&json_report(&report).unwrap()).unwrap();
        assert_eq!(value["results"][0]["status"], "REDIRECT");
        assert_eq!(value["summary"]["total"], 1);
    }
}
