//! Event and response shapes for the Lambda function.

use serde::{Deserialize, Serialize};

use fnlog_lib::demo::{Submission, SubmissionOutcome};
use fnlog_lib::report::{HealthReport, LoggingDemoReport, PerformanceReport, SamplingReport};
use fnlog_lib::ErrorReport;

/// Invocation payload, selected by its `action` field.
///
/// ```json
/// {"action": "samplingtest", "count": 20}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum DemoEvent {
    HttpGet {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        loglevel: Option<String>,
    },
    HttpPost(Submission),
    LoggingDemo,
    PerformanceTest {
        #[serde(default)]
        iterations: Option<i64>,
        #[serde(default)]
        logfrequency: Option<i64>,
    },
    SamplingTest {
        #[serde(default)]
        count: Option<i64>,
    },
    HealthCheck,
}

impl DemoEvent {
    /// Action name, for structured logs.
    pub fn action(&self) -> &'static str {
        match self {
            DemoEvent::HttpGet { .. } => "httpget",
            DemoEvent::HttpPost(_) => "httppost",
            DemoEvent::LoggingDemo => "loggingdemo",
            DemoEvent::PerformanceTest { .. } => "performancetest",
            DemoEvent::SamplingTest { .. } => "samplingtest",
            DemoEvent::HealthCheck => "healthcheck",
        }
    }
}

/// Plain greeting returned by the level demonstration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// Failure reported to the invoker, with the status an HTTP front end would use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    #[serde(flatten)]
    pub body: ErrorReport,
}

/// Lambda response - one success shape per action, or an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Greeting(GreetingResponse),
    Submission(SubmissionOutcome),
    LoggingDemo(LoggingDemoReport),
    Performance(PerformanceReport),
    Sampling(SamplingReport),
    Health(HealthReport),
    Error(ErrorResponse),
}
