//! JSON payloads returned to callers of the demonstrations.
//!
//! Field names are part of the wire contract shared by the HTTP service and
//! the Lambda function, so they are spelled out explicitly here.

use serde::{Deserialize, Serialize};

use crate::demo::{BulkOutcome, LevelLogged, ProgressOutcome};
use crate::error::{Error, ErrorKind};

/// Client-facing text for failures whose detail stays in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

const LOGGING_DEMO_NOTE: &str =
    "Check the forwarded log stream to see which records were kept by the host configuration";
const SAMPLING_NOTE: &str =
    "Count forwarded records containing 'Sampling test entry' to observe host sampling";

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub iterations: i64,
    pub log_frequency: i64,
    pub logs_generated: i64,
    pub elapsed_time_seconds: f64,
    pub average_iteration_ms: f64,
}

impl From<ProgressOutcome> for PerformanceReport {
    fn from(outcome: ProgressOutcome) -> Self {
        Self {
            iterations: outcome.iterations,
            log_frequency: outcome.log_frequency,
            logs_generated: outcome.logs_emitted,
            elapsed_time_seconds: round3(outcome.elapsed.as_secs_f64()),
            average_iteration_ms: round3(outcome.average_iteration_ms()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingReport {
    pub message: String,
    pub entries_generated: i64,
    pub note: String,
}

impl From<BulkOutcome> for SamplingReport {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            message: "Sampling test completed".to_string(),
            entries_generated: outcome.entries_generated,
            note: SAMPLING_NOTE.to_string(),
        }
    }
}

/// Payload of the all-levels demonstration. `levels_logged` keeps its
/// snake_case name on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingDemoReport {
    pub message: String,
    pub levels_logged: Vec<LevelLogged>,
    pub note: String,
}

impl From<Vec<LevelLogged>> for LoggingDemoReport {
    fn from(levels_logged: Vec<LevelLogged>) -> Self {
        Self {
            message: "Logging demo completed".to_string(),
            levels_logged,
            note: LOGGING_DEMO_NOTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl HealthReport {
    pub fn healthy_now() -> Self {
        let now = chrono::Utc::now();
        Self {
            status: "healthy".to_string(),
            timestamp: now.timestamp_micros() as f64 / 1_000_000.0,
        }
    }
}

/// Error body returned to clients: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Client view of `error`. Unexpected and configuration failures are
    /// reported generically.
    pub fn from_error(error: &Error) -> Self {
        match error.kind() {
            ErrorKind::Validation | ErrorKind::Simulated => Self::new(error.to_string()),
            ErrorKind::Configuration | ErrorKind::Unexpected => Self::new(INTERNAL_ERROR_MESSAGE),
        }
    }
}
