use std::fs;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use typed_builder::TypedBuilder;

/// String-keyed JSON object used for the header and body maps.
pub type JsonMap = serde_json::Map<String, Value>;

/// Fixed per-request timeout. Independent of total run duration: a run with
/// many queued requests may take far longer than this overall.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration problems detected before any request is dispatched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target url must not be empty")]
    MissingUrl,
    #[error("invalid target url {url:?}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid http method {method:?}")]
    InvalidMethod { method: String },
    #[error("request count must be at least 1")]
    NoRequests,
    #[error("concurrency must be at least 1")]
    NoConcurrency,
    #[error("failed to read {path:?}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed json in {origin}")]
    MalformedJson {
        origin: String,
        source: serde_json::Error,
    },
    #[error("expected a json object at the top level of {origin}")]
    NotAnObject { origin: String },
    #[error("failed to build http client")]
    Client(#[from] reqwest::Error),
}

/// Everything one run needs: the target, the request shape, and the load
/// parameters. Immutable once validated; shared by reference across all
/// in-flight request tasks.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RunConfig {
    /// Target URL, e.g. `http://localhost:8080/ping`.
    #[builder(setter(into))]
    pub url: String,
    /// HTTP method token (GET, POST, PUT, DELETE, ...).
    #[builder(default = String::from("GET"), setter(into))]
    pub method: String,
    /// Extra request headers. Non-string values are rendered as text,
    /// see [`crate::executor::header_text`].
    #[builder(default)]
    pub headers: JsonMap,
    /// Request body. When non-empty it is sent as a JSON payload.
    #[builder(default)]
    pub body: JsonMap,
    /// Total number of requests to issue.
    #[builder(default = 100)]
    pub requests: u64,
    /// Maximum number of requests in flight at once.
    #[builder(default = 10)]
    pub concurrency: u64,
}

impl RunConfig {
    /// Reject invalid configurations up front. A run must never start with an
    /// unusable target or a zero request count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        url::Url::parse(&self.url).map_err(|source| ConfigError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        self.parsed_method()?;
        if self.requests == 0 {
            return Err(ConfigError::NoRequests);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::NoConcurrency);
        }
        Ok(())
    }

    /// The method string as a typed [`Method`].
    pub fn parsed_method(&self) -> Result<Method, ConfigError> {
        Method::from_bytes(self.method.as_bytes()).map_err(|_| ConfigError::InvalidMethod {
            method: self.method.clone(),
        })
    }
}

/// Load a header or body map from `source`: an inline JSON object literal if it
/// starts with `{`, otherwise a path to a JSON file. `None` means an empty map.
pub fn load_map(source: Option<&str>) -> Result<JsonMap, ConfigError> {
    let Some(source) = source else {
        return Ok(JsonMap::new());
    };
    let (origin, text) = if source.trim_start().starts_with('{') {
        ("inline json".to_string(), source.to_string())
    } else {
        let text = fs::read_to_string(source).map_err(|e| ConfigError::Io {
            path: source.to_string(),
            source: e,
        })?;
        (format!("{source:?}"), text)
    };
    let value: Value =
        serde_json::from_str(&text).map_err(|source| ConfigError::MalformedJson {
            origin: origin.clone(),
            source,
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject { origin }),
    }
}
