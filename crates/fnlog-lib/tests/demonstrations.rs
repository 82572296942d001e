//! Demonstrations running through a configured facility.

mod common;

use common::hosted_facility;
use fnlog_lib::demo::{
    emit_level_demo, generate_bulk, log_all_levels, process_submission,
    run_with_progress_logging, Submission,
};
use fnlog_lib::{configure, Level, LoggerConfig};

#[test]
fn every_record_after_configure_carries_the_logger_name() {
    let (facility, capture) = hosted_facility();
    let logger = configure(&facility, &LoggerConfig::new("app")).expect("configure");

    emit_level_demo(&logger, "World", Some("warning"));
    log_all_levels(&logger);
    generate_bulk(&logger, 5, 500);
    run_with_progress_logging(&logger, 20, 5);

    let lines = capture.lines();
    assert!(lines.len() > 20);
    for line in lines {
        assert!(line.starts_with("[app] "), "unexpected line: {}", line);
    }
}

#[test]
fn unrecognized_level_adds_one_info_record() {
    let (facility, capture) = hosted_facility();
    let logger = configure(&facility, &LoggerConfig::new("app")).expect("configure");

    let outcome = emit_level_demo(&logger, "Ada", Some("LOUD"));

    assert_eq!(outcome.requested_level, Level::Info);
    assert_eq!(
        capture.lines()[1..].to_vec(),
        vec![
            "[app] DEBUG: Processing GET request with name=Ada",
            "[app] INFO: HTTP GET triggered - Greeting Ada",
            "[app] WARNING: Example warning message for Ada",
            "[app] INFO: Standard info log for Ada",
        ]
    );
}

#[test]
fn bulk_reports_clamped_count() {
    let (facility, capture) = hosted_facility();
    let logger = configure(
        &facility,
        &LoggerConfig::new("app").with_min_level(Level::Info),
    )
    .expect("configure");

    for (count, cap, expected) in [(1000, 500, 500), (0, 500, 0), (-10, 500, 0), (42, 500, 42)] {
        let outcome = generate_bulk(&logger, count, cap);
        assert_eq!(outcome.entries_generated, expected, "count={} cap={}", count, cap);
    }

    let entries = capture
        .lines()
        .into_iter()
        .filter(|l| l.contains("Sampling test entry"))
        .count();
    assert_eq!(entries, 542);
}

#[test]
fn progress_records_match_integer_division() {
    for (iterations, every) in [(100, 10), (100, 7), (9, 10), (30, 1)] {
        let (facility, capture) = hosted_facility();
        let logger = configure(&facility, &LoggerConfig::new("app")).expect("configure");

        let outcome = run_with_progress_logging(&logger, iterations, every);

        assert_eq!(outcome.logs_emitted, iterations / every);
        let observed = capture
            .lines()
            .into_iter()
            .filter(|l| l.contains("Performance test progress"))
            .count() as i64;
        assert_eq!(observed, iterations / every);
    }
}

#[test]
fn simulated_submission_error_is_logged_with_identity() {
    let (facility, capture) = hosted_facility();
    let logger = configure(&facility, &LoggerConfig::new("app")).expect("configure");

    let submission = Submission {
        name: Some("X".to_string()),
        generate_logs: None,
        simulate_error: Some(true),
    };
    let err = process_submission(&logger, &submission).unwrap_err();

    assert_eq!(err.to_string(), "Simulated error for testing error tracking");
    assert!(capture
        .lines()
        .contains(&"[app] Simulated error for testing - User: X".to_string()));
}
