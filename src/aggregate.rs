//! Race-free accumulation of per-request outcomes.
//!
//! Counters and the latency sum are plain atomic adds. The min/max extremes
//! need a read-compare-write, which is not atomic on its own, so they sit
//! behind a mutex. Up to `concurrency` tasks record concurrently; arrival
//! order is unspecified and must not matter.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

#[derive(Debug, Clone, Copy)]
struct Extremes {
    min: Duration,
    max: Duration,
}

/// Running totals for one load run. Created empty, shared by `Arc` into every
/// request task, then frozen into [`Results`] once the completion barrier has
/// passed. Never reused across runs.
#[derive(Debug, Default)]
pub struct RunAggregate {
    total: AtomicU64,
    success: AtomicU64,
    failed: AtomicU64,
    latency_nanos: AtomicU64,
    extremes: Mutex<Option<Extremes>>,
}

impl RunAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the running totals. Safe to call from any number
    /// of tasks at once.
    pub fn record(&self, outcome: &Outcome) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if outcome.success {
            self.success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_nanos
            .fetch_add(outcome.latency.as_nanos() as u64, Ordering::Relaxed);

        let mut extremes = self.extremes.lock().expect("extremes mutex poisoned");
        match extremes.as_mut() {
            Some(e) => {
                e.min = e.min.min(outcome.latency);
                e.max = e.max.max(outcome.latency);
            }
            None => {
                *extremes = Some(Extremes {
                    min: outcome.latency,
                    max: outcome.latency,
                });
            }
        }
    }

    /// Freeze the totals into an immutable summary. Must only be called after
    /// every task has finished recording; taking `self` by value enforces
    /// exclusive access.
    pub fn finalize(self, total_time: Duration) -> Results {
        let total = self.total.into_inner();
        let latency_nanos = self.latency_nanos.into_inner();
        let average_latency = if total == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(latency_nanos / total)
        };
        let extremes = self.extremes.into_inner().expect("extremes mutex poisoned");
        let (min_latency, max_latency) = match extremes {
            Some(e) => (e.min, e.max),
            None => (Duration::ZERO, Duration::ZERO),
        };
        Results {
            total,
            success: self.success.into_inner(),
            failed: self.failed.into_inner(),
            total_time,
            average_latency,
            min_latency,
            max_latency,
        }
    }
}

/// Final summary of one run.
///
/// `total_time` is wall clock between run start and the completion barrier;
/// with overlapping requests it is generally much smaller than the sum of
/// per-request latencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub total_time: Duration,
    pub average_latency: Duration,
    pub min_latency: Duration,
    pub max_latency: Duration,
}

impl Results {
    /// Share of successful requests, as a percentage of the total.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success as f64 / self.total as f64 * 100.0
    }
}
