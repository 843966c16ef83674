// src/checker/batch.rs
// =============================================================================
// One batch = one pass over every target, plus the summary counts.
//
// By default targets are checked one after another. With a concurrency
// above 1 several checks run at once, but results still come back in
// target-list order and each target keeps its own timeout, so one slow
// endpoint never changes another endpoint's result.
//
// Rust concepts:
// - Streams: `buffered(n)` runs up to n futures at once and yields their
//   outputs in the order the futures were created
// - Iterator adaptors: filter + count for the summary
// =============================================================================

use super::classify::HealthStatus;
use super::http::{check_target, CheckResult};
use crate::config::Target;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;

/// Aggregate counts over one batch.
///
/// REDIRECT and UNKNOWN results count towards `total` only, so
/// `up + down + errors` can be smaller than `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let count = |pred: fn(&HealthStatus) -> bool| {
            results.iter().filter(|r| pred(&r.status)).count()
        };

        Self {
            total: results.len(),
            up: count(|s| *s == HealthStatus::Up),
            down: count(|s| *s == HealthStatus::Down),
            errors: count(HealthStatus::is_error),
        }
    }
}

/// Everything one batch produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<CheckResult>,
    pub summary: Summary,
}

/// Checks every target and summarizes the outcome.
///
/// `on_result` is called for each result as soon as it is ready, in target
/// order, so the caller can print while the rest of the batch is running.
/// `concurrency` is clamped to at least 1.
pub async fn run_batch<F>(
    client: &Client,
    targets: &[Target],
    concurrency: usize,
    mut on_result: F,
) -> BatchReport
where
    F: FnMut(&CheckResult),
{
    // Create a stream of futures, one per target
    // Nothing runs yet: futures are lazy until the stream polls them
    let checks = stream::iter(targets)
        .map(|target| check_target(client, target))
        .buffered(concurrency.max(1));
    // Pin the stream on the stack so we can call .next() on it
    let mut checks = std::pin::pin!(checks);

    // Pull results out one at a time
    // buffered() hands them back in the order the targets were listed,
    // even when a later target finished first
    let mut results = Vec::with_capacity(targets.len());
    while let Some(result) = checks.next().await {
        on_result(&result);
        results.push(result);
    }

    let summary = Summary::from_results(&results);
    tracing::debug!(?summary, "batch finished");

    BatchReport { results, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::build_client;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result_with(status: HealthStatus) -> CheckResult {
        CheckResult {
            name: "t".to_string(),
            url: "http://t.example".to_string(),
            status,
            status_code: None,
            response_time_ms: None,
            error: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let results: Vec<_> = [
            HealthStatus::Up,
            HealthStatus::Up,
            HealthStatus::Down,
            HealthStatus::ClientError,
            HealthStatus::ServerError,
            HealthStatus::Error,
        ]
        .into_iter()
        .map(result_with)
        .collect();

        let summary = Summary::from_results(&results);
        assert_eq!(summary, Summary { total: 6, up: 2, down: 1, errors: 3 });
    }

    #[test]
    fn test_redirect_and_unknown_only_in_total() {
        let results = vec![
            result_with(HealthStatus::Redirect),
            result_with(HealthStatus::Unknown),
        ];
        let summary = Summary::from_results(&results);
        assert_eq!(summary, Summary { total: 2, up: 0, down: 0, errors: 0 });
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(Summary::from_results(&[]), Summary::default());
    }

    async fn mixed_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/c"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        server
    }

    fn mixed_targets(server: &MockServer) -> Vec<Target> {
        vec![
            Target::new("A", format!("{}/a", server.uri())),
            Target::new("B", format!("{}/b", server.uri()))
                .with_timeout(Duration::from_millis(200)),
            Target::new("C", format!("{}/c", server.uri())),
        ]
    }

    #[tokio::test]
    async fn test_batch_up_timeout_and_server_error() {
        let server = mixed_server().await;
        let targets = mixed_targets(&server);

        let report = run_batch(&build_client().unwrap(), &targets, 1, |_| {}).await;

        let statuses: Vec<_> = report.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![HealthStatus::Up, HealthStatus::Down, HealthStatus::ServerError]
        );
        assert_eq!(report.summary, Summary { total: 3, up: 1, down: 1, errors: 1 });
    }

    #[tokio::test]
    async fn test_concurrent_batch_keeps_target_order() {
        let server = mixed_server().await;
        let targets = mixed_targets(&server);

        let report = run_batch(&build_client().unwrap(), &targets, 3, |_| {}).await;

        let names: Vec<_> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(report.results[1].error.as_deref(), Some("Request timeout"));
        assert_eq!(report.summary, Summary { total: 3, up: 1, down: 1, errors: 1 });
    }

    #[tokio::test]
    async fn test_results_are_reported_before_the_batch_ends() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
            .mount(&server)
            .await;
        let targets = vec![
            Target::new("fast", format!("{}/fast", server.uri())),
            Target::new("slow", format!("{}/slow", server.uri())),
        ];

        // Remember when each result reached us
        let start = Instant::now();
        let mut seen = Vec::new();
        run_batch(&build_client().unwrap(), &targets, 1, |result| {
            seen.push((result.name.clone(), start.elapsed()));
        })
        .await;
        let batch_time = start.elapsed();

        let names: Vec<_> = seen.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["fast", "slow"]);
        assert!(batch_time >= Duration::from_millis(400));
        // The fast result arrived well before the slow one was done
        assert!(seen[0].1 < Duration::from_millis(300), "fast result came at {:?}", seen[0].1);
    }
}
