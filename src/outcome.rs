use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The sample produced for one dispatched request: how long it took and how
/// it ended. Consumed by the aggregate as soon as the request finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub latency: Duration,
    pub success: bool,
    pub error: Option<OutcomeError>,
}

/// Why a request counted as failed. Failures are data, not `Err`s: they are
/// tallied and the run moves on.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum OutcomeError {
    /// A response arrived, but with a status outside [200, 300).
    #[error("status code: {0}")]
    Status(u16),
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Outcome {
    pub fn ok(latency: Duration) -> Self {
        Self {
            latency,
            success: true,
            error: None,
        }
    }

    pub fn status_failure(latency: Duration, code: u16) -> Self {
        Self {
            latency,
            success: false,
            error: Some(OutcomeError::Status(code)),
        }
    }

    pub fn transport_failure(latency: Duration, message: impl Into<String>) -> Self {
        Self {
            latency,
            success: false,
            error: Some(OutcomeError::Transport(message.into())),
        }
    }
}
