#![allow(dead_code)]

use fnlog_lib::test_helpers::CaptureWriter;
use fnlog_lib::{Destination, Level, LogFacility};

/// A facility with one host-style destination attached, as a managed host
/// would have before user code runs.
pub fn hosted_facility() -> (LogFacility, CaptureWriter) {
    let capture = CaptureWriter::new();
    let facility = LogFacility::with_root_level(Level::Info);
    facility.add_destination(Destination::new("host-forwarder", capture.clone()));
    (facility, capture)
}
