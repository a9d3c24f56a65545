//! Barrage — a fixed-count HTTP load generator with a bounded concurrency cap.
//!
//! Barrage fires a configured number of requests at one endpoint, keeping at
//! most `concurrency` of them in flight at a time, and reports aggregate
//! success/failure counts and latency statistics.
//!
//! # Architecture
//!
//! The main building blocks are:
//!
//! - [`RunConfig`]: everything one run needs — target, method, header/body
//!   maps, request count, concurrency cap. Validated before anything is sent.
//! - [`executor`]: performs exactly one HTTP call and classifies the result
//!   as an [`Outcome`]. A non-2xx status or any transport error is a failure;
//!   neither aborts the run.
//! - [`scheduler`]: admits up to `concurrency` calls at once out of the
//!   requested total via a counting semaphore, then joins on all of them.
//! - [`RunAggregate`]: race-free running totals, frozen into [`Results`] once
//!   the completion barrier has passed.
//! - [`Reporter`]: takes the finished [`Results`] somewhere; the engine never
//!   prints.
//!
//! # Example
//!
//! ```no_run
//! use barrage::{Reporter, RunConfig, StdoutReporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = RunConfig::builder()
//!         .url("http://localhost:8080/ping")
//!         .requests(100u64)
//!         .concurrency(10u64)
//!         .build();
//!     let results = barrage::run(config).await?;
//!     StdoutReporter.report(&results).await
//! }
//! ```

/// Run statistics accumulation
pub mod aggregate;
/// Run configuration and validation
pub mod config;
/// Single-request execution and classification
pub mod executor;
/// Per-request samples
pub mod outcome;
/// Reports and reporters
pub mod report;
/// Bounded-concurrency dispatch
pub mod scheduler;
#[cfg(test)]
pub(crate) mod testutil;

use std::sync::Arc;

use reqwest::Client;

pub use aggregate::{Results, RunAggregate};
pub use config::{ConfigError, JsonMap, RunConfig};
pub use outcome::{Outcome, OutcomeError};
pub use report::{Reporter, StdoutReporter};

/// Execute one full load run: validate `config`, fire `config.requests` calls
/// with at most `config.concurrency` in flight, and return the frozen
/// statistics once every call has finished.
///
/// Per-request failures are absorbed into the statistics; only configuration
/// problems surface as an `Err`, before any request is dispatched.
pub async fn run(config: RunConfig) -> Result<Results, ConfigError> {
    config.validate()?;
    let method = config.parsed_method()?;
    let client = Client::builder().timeout(config::REQUEST_TIMEOUT).build()?;

    tracing::info!(
        url = %config.url,
        method = %method,
        requests = config.requests,
        concurrency = config.concurrency,
        "starting load run"
    );

    let config = Arc::new(config);
    let aggregate = Arc::new(RunAggregate::new());

    let action = {
        let client = client.clone();
        let config = Arc::clone(&config);
        move || {
            let client = client.clone();
            let method = method.clone();
            let config = Arc::clone(&config);
            async move { executor::execute(&client, method, &config).await }
        }
    };
    let total_time = scheduler::run_bounded(
        config.requests,
        config.concurrency,
        Arc::clone(&aggregate),
        action,
    )
    .await;

    tracing::info!(?total_time, "all requests completed");

    let aggregate =
        Arc::try_unwrap(aggregate).expect("aggregate still shared after completion barrier");
    Ok(aggregate.finalize(total_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::spawn_stub_server;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn single_successful_request_fills_every_statistic() {
        let (addr, _requests) = spawn_stub_server(200, Duration::from_millis(10)).await;
        let config = RunConfig::builder()
            .url(format!("http://{addr}/"))
            .requests(1u64)
            .concurrency(1u64)
            .build();

        let results = run(config).await.expect("run failed");

        assert_eq!(results.total, 1);
        assert_eq!(results.success, 1);
        assert_eq!(results.failed, 0);
        assert!(results.min_latency >= Duration::from_millis(10));
        assert_eq!(results.min_latency, results.max_latency);
        assert_eq!(results.average_latency, results.min_latency);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn all_server_errors_count_as_failures() {
        let (addr, _requests) = spawn_stub_server(500, Duration::ZERO).await;
        let config = RunConfig::builder()
            .url(format!("http://{addr}/"))
            .requests(10u64)
            .concurrency(10u64)
            .build();

        let results = run(config).await.expect("run failed");

        assert_eq!(results.total, 10);
        assert_eq!(results.success, 0);
        assert_eq!(results.failed, 10);
        assert_eq!(results.success + results.failed, results.total);
    }

    #[tokio::test]
    async fn zero_requests_is_rejected_before_dispatch() {
        let config = RunConfig::builder()
            .url("http://127.0.0.1:1/")
            .requests(0u64)
            .build();
        assert!(matches!(run(config).await, Err(ConfigError::NoRequests)));
    }
}
