// src/checker/http.rs
// =============================================================================
// This module checks one target by making a single HTTP GET request.
//
// Key functionality:
// - Follows redirects, bounded by the target's own timeout
// - Measures how long the whole request took (headers + body)
// - Turns every kind of failure into a result instead of an error
//
// There are no retries: one call, one attempt, one CheckResult.
//
// Rust concepts:
// - async/await: The request is network I/O
// - Enums with data: CheckFailure carries the error message
// - thiserror: Derives Display for our failure enum
// =============================================================================

use super::classify::{classify, HealthStatus};
use crate::config::Target;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

// reqwest's default limit
const MAX_REDIRECTS: usize = 10;

/// The outcome of checking one target once.
///
/// `status_code` and `response_time_ms` are either both present (we got a
/// response, whatever its code) or both absent (the request failed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub url: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    // A response arrived: classify its status code
    fn responded(target: &Target, status_code: u16, elapsed: Duration) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            status: classify(status_code, target.expected_status),
            status_code: Some(status_code),
            response_time_ms: Some(round_ms(elapsed)),
            error: None,
        }
    }

    // No response at all
    fn failed(target: &Target, failure: CheckFailure) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            status: failure.status(),
            status_code: None,
            response_time_ms: None,
            error: Some(failure.to_string()),
        }
    }
}

/// Why a request produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("Request timeout")]
    Timeout,

    /// DNS failure, connection refused or reset
    #[error("Connection failed")]
    Connection,

    /// Any other transport-level problem (TLS, redirect loop, broken body...)
    #[error("{0}")]
    Transport(String),

    /// The request could not even be built
    #[error("{0}")]
    Unclassified(String),
}

impl CheckFailure {
    pub fn status(&self) -> HealthStatus {
        match self {
            CheckFailure::Timeout | CheckFailure::Connection | CheckFailure::Transport(_) => {
                HealthStatus::Down
            }
            CheckFailure::Unclassified(_) => HealthStatus::Error,
        }
    }
}

/// Creates the HTTP client shared by every check.
///
/// Timeouts are not set here: each request carries its target's timeout.
pub fn build_client() -> reqwest::Result<Client> {
    // We'll reuse this client for all requests (connection pooling)
    Client::builder()
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))  // Follow redirects, but not forever
        .user_agent(concat!("app-health-checker/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Checks a single target.
///
/// Never fails: every error ends up inside the returned CheckResult.
//
// Parameters:
//   client: shared reqwest client (borrowed)
//   target: what to check and what we expect back (borrowed, never changed)
pub async fn check_target(client: &Client, target: &Target) -> CheckResult {
    tracing::debug!(name = %target.name, url = %target.url, "checking target");

    // Start the stopwatch right before sending
    let start = Instant::now();
    let result = match fetch_status(client, target).await {
        // Got a response! Whatever the code, it has a code and a time
        Ok(status_code) => CheckResult::responded(target, status_code, start.elapsed()),
        // Request failed - figure out why
        Err(e) => {
            tracing::debug!(name = %target.name, error = %e, "request failed");
            CheckResult::failed(target, categorize_error(e))
        }
    };

    tracing::debug!(name = %target.name, status = %result.status, "check finished");
    result
}

// Sends the GET and reads the body so the timing covers the full transfer
async fn fetch_status(client: &Client, target: &Target) -> reqwest::Result<u16> {
    let response = client
        .get(&target.url)
        .timeout(target.timeout)  // Per-target timeout, covers the body too
        .send()
        .await?;

    let status_code = response.status().as_u16();
    // We don't need the body, but downloading it is part of "the request"
    response.bytes().await?;

    Ok(status_code)
}

// Categorizes reqwest errors. Order matters: a connect timeout reports
// both is_timeout() and is_connect(), and it is a timeout.
fn categorize_error(error: reqwest::Error) -> CheckFailure {
    if error.is_timeout() {
        CheckFailure::Timeout
    } else if error.is_connect() {
        CheckFailure::Connection
    } else if error.is_builder() {
        CheckFailure::Unclassified(error.to_string())
    } else {
        CheckFailure::Transport(error.to_string())
    }
}

// Milliseconds rounded to 2 decimal places
fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return CheckResult instead of Result<CheckResult, Error>?
//    - A failed request is a normal outcome for a health checker
//    - Putting the failure inside the result means the batch loop never has
//      to handle errors, and one bad target can't stop the others
//
// 2. What does thiserror's #[error("...")] do?
//    - It generates the Display impl, so failure.to_string() gives the
//      message we print ("Request timeout", "Connection failed", ...)
//
// 3. Why is the order of the if/else in categorize_error important?
//    - One reqwest error can answer true to several is_*() questions
//    - The first matching branch wins, so the most specific check goes first
// -----------------------------------------------------------------------------
