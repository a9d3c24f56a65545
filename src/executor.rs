//! Single-request execution: build one HTTP request from the run
//! configuration, send it, time it, classify the result.

use std::time::Instant;

use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::RunConfig;
use crate::outcome::Outcome;

/// Render a JSON header value as text. Strings are used verbatim; everything
/// else (numbers, booleans, nested structures) is rendered in its compact
/// JSON form.
pub fn header_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Perform exactly one HTTP call described by `config` and classify what
/// happened. Touches no shared state; failures come back as data.
///
/// The body map, when non-empty, is sent as a JSON payload with the matching
/// content-type. Header-map entries take precedence over any default of the
/// same name. Latency is measured from submission to response or error,
/// timeout included.
pub async fn execute(client: &Client, method: Method, config: &RunConfig) -> Outcome {
    let mut request = client.request(method, config.url.as_str());
    for (name, value) in &config.headers {
        request = request.header(name.as_str(), header_text(value));
    }
    // Only fills in the json content-type when the header map left it unset.
    if !config.body.is_empty() {
        request = request.json(&config.body);
    }

    let started = Instant::now();
    let response = request.send().await;
    let latency = started.elapsed();

    match response {
        Ok(resp) if resp.status().is_success() => Outcome::ok(latency),
        Ok(resp) => Outcome::status_failure(latency, resp.status().as_u16()),
        Err(err) => Outcome::transport_failure(latency, err.to_string()),
    }
}
