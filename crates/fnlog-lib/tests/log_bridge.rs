//! Records from the `log` crate reaching an installed facility.
//!
//! Installing replaces the process-wide subscriber, so this binary holds a
//! single test.

use fnlog_lib::test_helpers::CaptureWriter;
use fnlog_lib::{configure, Destination, Level, LogFacility, LoggerConfig};

#[test]
fn log_records_use_their_target_as_identity_and_honor_suppression() {
    let capture = CaptureWriter::new();
    let facility = LogFacility::with_root_level(Level::Info);
    facility.add_destination(Destination::new("host-forwarder", capture.clone()));
    facility.install().expect("install facility");
    configure(&facility, &LoggerConfig::new("my_app::x")).expect("configure");
    capture.clear();

    // hyper is suppressed to warning by default.
    log::debug!(target: "hyper::client", "connection pooled");
    log::info!(target: "hyper::client", "checkout");
    log::debug!(target: "my_app::x", "cache warmed");
    log::info!(target: "my_app::x", "request served");
    // Unconfigured sources fall back to the info root level.
    log::debug!(target: "other_crate", "noise");
    log::warn!(target: "hyper::client", "connection reset");

    assert_eq!(
        capture.lines(),
        vec![
            "[my_app::x] cache warmed".to_string(),
            "[my_app::x] request served".to_string(),
            "[hyper::client] connection reset".to_string(),
        ]
    );
    assert_eq!(facility.effective_level("hyper::client"), Level::Warning);
}
