//! fnlog library entry points.
//!
//! Managed serverless hosts forward a function's log output to their own
//! telemetry pipeline and re-categorize every record under a host-chosen
//! category, discarding the original logger identity. This crate provides a
//! small shim that keeps the identity inside the rendered text, plus
//! demonstrations that emit records at varying levels and volumes.
//!
//! - [`LogFacility`]: shared root facility owning destinations and levels
//! - [`configure`]: installs the identity formatter and suppresses noisy sources
//! - [`Logger`]: named emission handle
//! - [`demo`]: level, volume and frequency demonstrations
//! - [`profiles`]: host-side logging profiles (`host.json` + app settings)
//! - [`report`]: JSON payloads shared by the HTTP and Lambda front ends
//!
//! Higher-level consumers (HTTP service, Lambda, CLI) should only depend on
//! what is exported here.

#![deny(warnings)]

pub mod config;
pub mod demo;
pub mod error;
pub mod facility;
pub mod formatter;
pub mod level;
mod logger;
pub mod profiles;
mod record;
pub mod report;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

pub use config::{configure, LoggerConfig, SinkSpec, DEFAULT_SUPPRESSED_SOURCES};
pub use error::{Error, ErrorKind, Result, SIMULATED_ERROR_MESSAGE};
pub use facility::{Destination, FacilityLayer, FacilitySnapshot, LogFacility};
pub use formatter::{MessageFormatter, DEFAULT_TEMPLATE};
pub use level::Level;
pub use logger::Logger;
pub use profiles::{HostConfig, HostProfile};
pub use record::LogRecord;
pub use report::{ErrorReport, INTERNAL_ERROR_MESSAGE};
