// src/checker/classify.rs
// =============================================================================
// This module turns an HTTP status code into a health category.
//
// The rules are applied in priority order:
//   1. code == expected_status     -> UP  (even for 404 if you expect 404!)
//   2. 200..=299                   -> UP
//   3. 300..=399                   -> REDIRECT
//   4. 400..=499                   -> CLIENT_ERROR
//   5. 500..=599                   -> SERVER_ERROR
//   6. anything else               -> UNKNOWN
//
// DOWN and ERROR are never produced here: they describe requests that did
// not get a response at all (see http.rs).
// =============================================================================

use serde::Serialize;
use std::fmt;

/// The health category of one checked target.
///
/// Serialized in SCREAMING_SNAKE_CASE so JSON output reads `"CLIENT_ERROR"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// Got the expected status, or any 2xx
    Up,
    /// No response: timeout, connection failure or other transport error
    Down,
    /// 3xx that was not the expected status
    Redirect,
    /// 4xx that was not the expected status
    ClientError,
    /// 5xx that was not the expected status
    ServerError,
    /// Something went wrong on our side before the request could be sent
    Error,
    /// A status code outside every known range
    Unknown,
}

impl HealthStatus {
    /// Label used in the console, in the log file and in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Up => "UP",
            HealthStatus::Down => "DOWN",
            HealthStatus::Redirect => "REDIRECT",
            HealthStatus::ClientError => "CLIENT_ERROR",
            HealthStatus::ServerError => "SERVER_ERROR",
            HealthStatus::Error => "ERROR",
            HealthStatus::Unknown => "UNKNOWN",
        }
    }

    /// Statuses counted in the summary's `errors` column.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            HealthStatus::ClientError | HealthStatus::ServerError | HealthStatus::Error
        )
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Classifies a received status code against the target's expectation.
//
// We take plain u16s (not reqwest::StatusCode) so this stays a pure
// function that is trivial to test.
pub fn classify(code: u16, expected_status: u16) -> HealthStatus {
    if code == expected_status {
        return HealthStatus::Up;
    }

    match code {
        200..=299 => HealthStatus::Up,
        300..=399 => HealthStatus::Redirect,
        400..=499 => HealthStatus::ClientError,
        500..=599 => HealthStatus::ServerError,
        _ => HealthStatus::Unknown,
    }
}
