// src/checker/mod.rs
// =============================================================================
// This module contains all health checking logic.
//
// Submodules:
// - classify: Maps a status code to a health category
// - http: Makes the HTTP request for one target
// - batch: Checks a whole target list and counts the outcomes
//
// This file (mod.rs) is the module root - it exports the public API that
// other parts of our application can use.
// =============================================================================

mod batch;
mod classify;
mod http;

pub use batch::{run_batch, BatchReport, Summary};
pub use classify::HealthStatus;
pub use http::{build_client, CheckResult};
