//! Query string types and validation for HTTP endpoints.
//!
//! Integer parameters are extracted as strings so a malformed value can be
//! reported as a validation error naming the parameter, instead of axum's
//! generic query rejection.

use serde::{Deserialize, Serialize};

use fnlog_lib::demo::{DEFAULT_ITERATIONS, DEFAULT_LOG_FREQUENCY, DEFAULT_SAMPLING_COUNT};
use fnlog_lib::Result;

pub use fnlog_lib::config::parse_int_param;

/// Validation trait for request types.
///
/// Implementations check every field and produce the values the handler
/// passes on to the library.
pub trait Validate {
    type Output;

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns a validation-kind [`Error`](fnlog_lib::Error) for the first bad field.
    fn validate(&self) -> Result<Self::Output>;
}

/// Query for `GET /api/httpget`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GreetingQuery {
    pub name: Option<String>,
    pub loglevel: Option<String>,
}

/// Query for `GET /api/performancetest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceQuery {
    pub iterations: Option<String>,
    pub logfrequency: Option<String>,
}

/// Validated parameters of the performance demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceParams {
    pub iterations: i64,
    pub log_frequency: i64,
}

impl Validate for PerformanceQuery {
    type Output = PerformanceParams;

    fn validate(&self) -> Result<PerformanceParams> {
        Ok(PerformanceParams {
            iterations: parse_int_param(
                "iterations",
                self.iterations.as_deref(),
                DEFAULT_ITERATIONS,
            )?,
            log_frequency: parse_int_param(
                "logfrequency",
                self.logfrequency.as_deref(),
                DEFAULT_LOG_FREQUENCY,
            )?,
        })
    }
}

/// Query for `GET /api/samplingtest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingQuery {
    pub count: Option<String>,
}

impl Validate for SamplingQuery {
    type Output = i64;

    fn validate(&self) -> Result<i64> {
        parse_int_param("count", self.count.as_deref(), DEFAULT_SAMPLING_COUNT)
    }
}
