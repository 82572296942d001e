//! Shared infrastructure for the fnlog demonstration HTTP service.
//!
//! - [`AppState`]: the configured logger and demonstration limits
//! - [`health`]: liveness probe handler
//! - [`ErrorResponse`]: `{"error": ...}` bodies with the right status code
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: log facility installation from the environment
//! - [`middleware`]: request tracking and metrics middleware
//! - Query types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin. Everything that emits demonstration records lives in
//! `fnlog-lib`; this crate only provides HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string or JSON body                          │
//! │  - Validate parameters                                      │
//! │  - Call fnlog-lib demonstrations                            │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module builds an [`AppState`] whose log output is
//! captured in memory. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, HealthStatus};
pub use logging::{init_logging, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_handler_error, record_records_emitted, MetricsConfig,
    MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{from_lib_error, ErrorResponse};
pub use request::{
    parse_int_param, GreetingQuery, PerformanceParams, PerformanceQuery, SamplingQuery, Validate,
};
pub use state::{AppState, ServiceConfig};
