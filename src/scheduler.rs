//! Bounded-concurrency dispatch with a completion barrier.
//!
//! Every requested call becomes its own tokio task; a counting semaphore of
//! `concurrency` permits caps how many are past admission at once. The
//! scheduler returns only after all tasks have finished — there is no early
//! return and no cancellation of admitted work.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::aggregate::RunAggregate;
use crate::outcome::Outcome;

/// Invoke `action` exactly `requests` times with at most `concurrency`
/// invocations in flight, recording every outcome into `aggregate`. Returns
/// the wall-clock time between the first spawn and the completion barrier.
///
/// A `concurrency` larger than `requests` is tolerated; effective parallelism
/// is capped at `requests`. Outcomes reach the aggregate in no particular
/// order. Permits are released when the guard drops, on every path out of the
/// task.
pub async fn run_bounded<F, Fut>(
    requests: u64,
    concurrency: u64,
    aggregate: Arc<RunAggregate>,
    action: F,
) -> Duration
where
    F: Fn() -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.min(requests) as usize));
    let started = Instant::now();

    let handles: Vec<_> = (0..requests)
        .map(|_| {
            let semaphore = Arc::clone(&semaphore);
            let aggregate = Arc::clone(&aggregate);
            let action = action.clone();
            tokio::spawn(async move {
                // Never closed, so acquisition can only fail on a bug here.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("admission semaphore closed");
                let outcome = action().await;
                aggregate.record(&outcome);
            })
        })
        .collect();

    for result in join_all(handles).await {
        result.expect("request task panicked");
    }

    started.elapsed()
}
