//! Test utilities for handler testing.
//!
//! Builds an [`AppState`] whose logger writes to an in-memory destination,
//! standing in for the host's log forwarder.

use fnlog_lib::demo::SAMPLING_CAP;
use fnlog_lib::test_helpers::CaptureWriter;
use fnlog_lib::{configure, Destination, Level, LogFacility, LoggerConfig};

use crate::state::AppState;

/// Name of the destination attached by [`test_state`].
pub const HOST_DESTINATION: &str = "host-forwarder";

/// A configured state plus the capture observing its output.
///
/// Each call builds a fresh facility, so tests do not share log output.
///
/// # Panics
///
/// Panics if the default configuration is rejected, which indicates a broken
/// build rather than a test failure.
pub fn test_state() -> (AppState, CaptureWriter) {
    test_state_with(LoggerConfig::new("app"), SAMPLING_CAP)
}

/// [`test_state`] with a custom logger configuration and sampling cap.
pub fn test_state_with(config: LoggerConfig, sampling_cap: i64) -> (AppState, CaptureWriter) {
    let capture = CaptureWriter::new();
    let facility = LogFacility::with_root_level(Level::Info);
    facility.add_destination(Destination::new(HOST_DESTINATION, capture.clone()));
    let logger = configure(&facility, &config)
        .unwrap_or_else(|e| panic!("test logger configuration rejected: {}", e));
    capture.clear();
    (AppState::new(logger, sampling_cap), capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_with_empty_capture() {
        let (state, capture) = test_state();
        assert!(capture.lines().is_empty());

        state.logger().info("hello");
        assert_eq!(capture.lines(), vec!["[app] hello"]);
    }

    #[test]
    fn test_states_are_isolated() {
        let (first, first_capture) = test_state();
        let (_second, second_capture) = test_state();

        first.logger().info("only here");
        assert_eq!(first_capture.lines().len(), 1);
        assert!(second_capture.lines().is_empty());
    }
}
