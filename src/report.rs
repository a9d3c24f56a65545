//! Rendering and delivery of run results.

use async_trait::async_trait;

use crate::aggregate::Results;

/// Consumes a finished run's [`Results`] and sends them somewhere: stdout, a
/// file, a database. The engine itself never prints.
#[async_trait]
pub trait Reporter {
    async fn report(&self, results: &Results) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Plain-text summary printed to stdout.
pub struct StdoutReporter;

#[async_trait]
impl Reporter for StdoutReporter {
    async fn report(&self, results: &Results) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!("{}", render(results));
        Ok(())
    }
}

fn render(results: &Results) -> String {
    format!(
        "\n=== Load Test Results ===\n\
         Total requests:   {}\n\
         Successful:       {}\n\
         Failed:           {}\n\
         Total time:       {:?}\n\
         Average latency:  {:?}\n\
         Min latency:      {:?}\n\
         Max latency:      {:?}\n\
         Success rate:     {:.2}%",
        results.total,
        results.success,
        results.failed,
        results.total_time,
        results.average_latency,
        results.min_latency,
        results.max_latency,
        results.success_rate(),
    )
}
