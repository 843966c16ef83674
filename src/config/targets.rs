// src/config/targets.rs
// =============================================================================
// This module defines what we monitor (a Target) and how target lists are
// loaded from a JSON descriptor file.
//
// Descriptor format (a JSON array, order is preserved):
//
//   [
//     { "name": "API", "url": "https://api.example.com/health" },
//     { "name": "Legacy", "url": "https://old.example.com", "expected_status": 404, "timeout": 2.5 }
//   ]
//
// Missing fields get defaults (expected_status = 200, timeout = 5 seconds).
// Every entry is validated; a single bad entry rejects the whole file and
// the caller keeps the list it already had.
//
// Rust concepts:
// - serde defaults: `#[serde(default = "...")]` fills in missing fields
// - thiserror: typed error enum with readable messages
// - Two-step parsing: raw JSON shape first, then a validated struct
// =============================================================================

use crate::report::EventLog;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Expected status used when a descriptor entry does not name one.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// Per-request timeout used when a descriptor entry does not name one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One monitored HTTP endpoint.
///
/// Targets read from a descriptor have been validated (`url` parses,
/// `timeout` is positive). `Target::new` does no checking and is meant for
/// the built-in list and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub url: String,
    pub expected_status: u16,
    pub timeout: Duration,
}

impl Target {
    /// Builds a target with the default expectation (200 within 5s).
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            expected_status: DEFAULT_EXPECTED_STATUS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_expected_status(mut self, expected_status: u16) -> Self {
        self.expected_status = expected_status;
        self
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Why a descriptor could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("target #{index} ({name}): {reason}")]
    Invalid {
        index: usize,
        name: String,
        reason: String,
    },
}

// The JSON shape of one entry, before validation.
#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(default = "default_name")]
    name: String,
    url: String,
    #[serde(default = "default_expected_status")]
    expected_status: u16,
    // Seconds; fractional values such as 0.5 are allowed
    #[serde(default = "default_timeout_secs")]
    timeout: f64,
}

fn default_name() -> String {
    "Unknown".to_string()
}

fn default_expected_status() -> u16 {
    DEFAULT_EXPECTED_STATUS
}

fn default_timeout_secs() -> f64 {
    DEFAULT_TIMEOUT.as_secs_f64()
}

impl RawTarget {
    // Turns a raw entry into a Target, or explains what is wrong with it
    //
    // Parameters:
    //   index: position in the file, used in the error message
    fn validate(self, index: usize) -> Result<Target, ConfigError> {
        // Small helper so every error below carries the index and name
        let invalid = |reason: String| ConfigError::Invalid {
            index,
            name: self.name.clone(),
            reason,
        };

        // The URL must parse and be http:// or https://
        let parsed = Url::parse(&self.url)
            .map_err(|e| invalid(format!("invalid url '{}': {}", self.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported url scheme '{}'",
                parsed.scheme()
            )));
        }

        // StatusCode accepts 100..=999, same as the HTTP spec
        if StatusCode::from_u16(self.expected_status).is_err() {
            return Err(invalid(format!(
                "expected_status {} is not a valid HTTP status",
                self.expected_status
            )));
        }

        // try_from_secs_f64 rejects negative, NaN and infinite values;
        // the filter rejects zero
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .ok()
            .filter(|t| !t.is_zero())
            .ok_or_else(|| invalid(format!("timeout must be positive, got {}", self.timeout)))?;

        Ok(Target {
            name: self.name,
            url: self.url,
            expected_status: self.expected_status,
            timeout,
        })
    }
}

/// The built-in target list used when no descriptor is given.
///
/// The last entry points at a host that does not exist, so a default run
/// always demonstrates a DOWN result.
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new("Google", "https://www.google.com"),
        Target::new("GitHub", "https://github.com"),
        Target::new("Invalid Site (Demo)", "https://thissitedoesnotexist12345.com"),
    ]
}

/// Parses a descriptor from a JSON string.
pub fn parse_targets(json: &str, path: &Path) -> Result<Vec<Target>, ConfigError> {
    // Step 1: JSON -> raw entries (fails on wrong types or missing url)
    let raw: Vec<RawTarget> = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    // Step 2: validate each entry
    // Collecting into Result<Vec<_>, _> stops at the first error
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| entry.validate(index))
        .collect()
}

/// Reads and parses a descriptor file.
pub fn load_targets(path: &Path) -> Result<Vec<Target>, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_targets(&json, path)
}

/// Loads a descriptor, or keeps `current` if that fails.
///
/// Both outcomes are written to the event log; nothing is returned as an
/// error because a bad descriptor must not stop the run.
pub fn load_or_keep(path: &Path, current: Vec<Target>, log: &EventLog) -> Vec<Target> {
    match load_targets(path) {
        Ok(targets) => {
            tracing::debug!(path = %path.display(), count = targets.len(), "targets loaded");
            log.info(&format!("Loaded configuration from {}", path.display()));
            targets
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "keeping previous targets");
            log.error(&format!("ERROR: Failed to load config: {}", e));
            current
        }
    }
}
