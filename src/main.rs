use anyhow::Context;
use barrage::{Reporter, RunConfig, StdoutReporter, config};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Fire a fixed number of HTTP requests at one endpoint under a bounded
/// level of concurrency, and report latency statistics.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Target URL
    #[arg(long, env = "BARRAGE_URL")]
    url: String,

    /// HTTP method (GET, POST, PUT, DELETE, ...)
    #[arg(long, default_value = "GET", env = "BARRAGE_METHOD")]
    method: String,

    /// Request headers: path to a JSON file, or an inline JSON object
    #[arg(long, env = "BARRAGE_HEADERS")]
    headers: Option<String>,

    /// Request body: path to a JSON file, or an inline JSON object
    #[arg(long, env = "BARRAGE_BODY")]
    body: Option<String>,

    /// Total number of requests to issue
    #[arg(long, default_value_t = 100, env = "BARRAGE_REQUESTS")]
    requests: u64,

    /// Maximum number of requests in flight at once
    #[arg(long, default_value_t = 10, env = "BARRAGE_CONCURRENCY")]
    concurrency: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let headers = config::load_map(args.headers.as_deref()).context("loading headers")?;
    let body = config::load_map(args.body.as_deref()).context("loading body")?;

    let run_config = RunConfig::builder()
        .url(args.url)
        .method(args.method)
        .headers(headers)
        .body(body)
        .requests(args.requests)
        .concurrency(args.concurrency)
        .build();

    let results = barrage::run(run_config).await?;
    StdoutReporter
        .report(&results)
        .await
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(())
}
