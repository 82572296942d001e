//! Log volume and level demonstrations.
//!
//! Each operation emits records through a [`Logger`] and returns a summary of
//! what it emitted. The summaries describe emission, not retention: a record
//! can be counted here and still be dropped by level filtering or by a
//! downstream sampling pipeline.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::level::Level;
use crate::logger::Logger;

/// Severity used when the requested one is missing or not recognized.
pub const DEFAULT_REQUESTED_LEVEL: Level = Level::Info;

/// Subject greeted when no name is supplied.
pub const DEFAULT_GREETING_NAME: &str = "World";

/// Submitter used when a submission carries no name.
pub const DEFAULT_SUBMITTER_NAME: &str = "Anonymous";

/// Default number of entries a submission asks for.
pub const DEFAULT_SUBMISSION_LOGS: i64 = 1;

/// Most entries a single submission may emit.
pub const SUBMISSION_LOG_CAP: i64 = 100;

/// Default and maximum entry counts for the sampling demonstration.
pub const DEFAULT_SAMPLING_COUNT: i64 = 50;
pub const SAMPLING_CAP: i64 = 500;

/// Default iteration count and progress frequency for the performance demonstration.
pub const DEFAULT_ITERATIONS: i64 = 100;
pub const DEFAULT_LOG_FREQUENCY: i64 = 10;

/// Upper bound on performance demonstration iterations.
pub const MAX_ITERATIONS: i64 = 10_000;

/// Inclusive range of the random identifiers attached to sampling entries.
pub const SAMPLE_ID_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

const WORK_UNIT_SIZE: usize = 100;

/// Resolve a requested severity name.
///
/// Only `trace`, `debug`, `info`, `warning` and `error` are accepted, in any
/// case. Anything else, including no value at all, deliberately resolves to
/// [`DEFAULT_REQUESTED_LEVEL`] rather than failing the request.
pub fn resolve_requested_level(requested: Option<&str>) -> Level {
    match requested.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => Level::Trace,
        Some("debug") => Level::Debug,
        Some("info") => Level::Info,
        Some("warning") => Level::Warning,
        Some("error") => Level::Error,
        _ => DEFAULT_REQUESTED_LEVEL,
    }
}

/// Outcome of [`emit_level_demo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDemoOutcome {
    pub message: String,
    pub requested_level: Level,
    /// Levels of the records emitted, in order.
    pub levels_emitted: Vec<Level>,
}

/// Emit the fixed three-record preamble, then one record at the requested level.
pub fn emit_level_demo(logger: &Logger, name: &str, requested: Option<&str>) -> LevelDemoOutcome {
    logger.debug(format_args!(
        "DEBUG: Processing GET request with name={}",
        name
    ));
    logger.info(format_args!("INFO: HTTP GET triggered - Greeting {}", name));
    logger.warning(format_args!("WARNING: Example warning message for {}", name));

    let level = resolve_requested_level(requested);
    let message = match level {
        Level::Trace => format!("TRACE: Very detailed trace log for {}", name),
        Level::Debug => format!("DEBUG: Detailed debug information for {}", name),
        Level::Warning => format!("WARNING: Warning level log for {}", name),
        Level::Error => format!("ERROR: Error level log for {}", name),
        Level::Info | Level::Critical => format!("INFO: Standard info log for {}", name),
    };
    logger.log(level, message);

    LevelDemoOutcome {
        message: format!("Hello, {}! Check the log stream for logs.", name),
        requested_level: level,
        levels_emitted: vec![Level::Debug, Level::Info, Level::Warning, level],
    }
}

/// One entry of the all-levels demonstration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLogged {
    pub level: String,
    pub logged: bool,
    pub description: String,
}

const LEVEL_DESCRIPTIONS: [(Level, &str); 5] = [
    (Level::Debug, "Detailed diagnostic information"),
    (Level::Info, "General operational information"),
    (Level::Warning, "Warning about potential issues"),
    (Level::Error, "Error that prevented operation"),
    (Level::Critical, "Severe error requiring attention"),
];

/// Emit one record per level from debug to critical.
///
/// `logged` reports that the record was emitted, not whether any destination
/// kept it.
pub fn log_all_levels(logger: &Logger) -> Vec<LevelLogged> {
    LEVEL_DESCRIPTIONS
        .iter()
        .map(|(level, description)| {
            logger.log(*level, format_args!("{}: {}", level.label(), description));
            LevelLogged {
                level: level.label().to_string(),
                logged: true,
                description: description.to_string(),
            }
        })
        .collect()
}

/// Outcome of [`generate_bulk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub entries_generated: i64,
}

/// Emit `count` uniquely tagged entries, clamped to `[0, cap_at]`.
pub fn generate_bulk(logger: &Logger, count: i64, cap_at: i64) -> BulkOutcome {
    generate_bulk_with_rng(logger, count, cap_at, &mut rand::thread_rng())
}

/// [`generate_bulk`] with a caller-supplied random source.
pub fn generate_bulk_with_rng<R: Rng + ?Sized>(
    logger: &Logger,
    count: i64,
    cap_at: i64,
    rng: &mut R,
) -> BulkOutcome {
    let count = count.clamp(0, cap_at.max(0));

    logger.info(format_args!(
        "Starting sampling test - generating {} log entries",
        count
    ));
    for i in 0..count {
        let id = rng.gen_range(SAMPLE_ID_RANGE);
        logger.info(format_args!(
            "Sampling test entry {:04}/{:04} - ID: {}",
            i + 1,
            count,
            id
        ));
    }
    logger.info(format_args!(
        "Sampling test completed - {} entries logged",
        count
    ));

    BulkOutcome {
        entries_generated: count,
    }
}

/// Outcome of [`run_with_progress_logging`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressOutcome {
    pub iterations: i64,
    pub log_frequency: i64,
    pub logs_emitted: i64,
    pub elapsed: Duration,
}

impl ProgressOutcome {
    /// Mean wall-clock time per iteration; zero when nothing ran.
    pub fn average_iteration_ms(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1000.0 / self.iterations as f64
    }
}

/// Run `iterations` units of trivial work, logging after every
/// `log_every_n`-th unit.
///
/// `iterations` is clamped to `[0, MAX_ITERATIONS]` and `log_every_n` to at
/// least 1.
pub fn run_with_progress_logging(logger: &Logger, iterations: i64, log_every_n: i64) -> ProgressOutcome {
    let iterations = iterations.clamp(0, MAX_ITERATIONS);
    let log_every_n = log_every_n.max(1);
    let mut rng = rand::thread_rng();

    let start = Instant::now();
    logger.info(format_args!(
        "Starting performance test with {} iterations",
        iterations
    ));

    let mut logs_emitted = 0;
    for i in 0..iterations {
        let work: f64 = (0..WORK_UNIT_SIZE).map(|_| rng.gen::<f64>()).sum();
        black_box(work);

        if (i + 1) % log_every_n == 0 {
            logger.info(format_args!(
                "Performance test progress: {}/{}",
                i + 1,
                iterations
            ));
            logs_emitted += 1;
        }
    }

    let elapsed = start.elapsed();
    logger.info(format_args!(
        "Performance test completed in {:.2} seconds",
        elapsed.as_secs_f64()
    ));

    ProgressOutcome {
        iterations,
        log_frequency: log_every_n,
        logs_emitted,
        elapsed,
    }
}

/// A submission as received from a client; missing fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub generate_logs: Option<i64>,
    #[serde(default)]
    pub simulate_error: Option<bool>,
}

impl Submission {
    /// Decode a request body.
    ///
    /// # Errors
    ///
    /// Any body that is not a JSON object with correctly typed fields is
    /// reported as [`Error::InvalidJson`].
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(Error::InvalidJson)
    }
}

/// Outcome of [`process_submission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub message: String,
    pub logs_generated: i64,
}

/// Log a submission and the entries it asks for.
///
/// # Errors
///
/// Returns [`Error::Simulated`] when the submission asks for a failure, after
/// logging it at error level.
pub fn process_submission(logger: &Logger, submission: &Submission) -> Result<SubmissionOutcome> {
    let name = submission
        .name
        .as_deref()
        .unwrap_or(DEFAULT_SUBMITTER_NAME);
    let requested = submission.generate_logs.unwrap_or(DEFAULT_SUBMISSION_LOGS);
    let simulate_error = submission.simulate_error.unwrap_or(false);

    logger.info(format_args!("Processing POST request for {}", name));

    let entries = requested.clamp(0, SUBMISSION_LOG_CAP);
    for i in 0..entries {
        logger.info(format_args!(
            "Log entry {}/{} for {}",
            i + 1,
            requested,
            name
        ));
    }

    if simulate_error {
        logger.error(format_args!(
            "Simulated error for testing - User: {}",
            name
        ));
        return Err(Error::Simulated);
    }

    Ok(SubmissionOutcome {
        message: format!("Hello, {}!", name),
        logs_generated: entries,
    })
}

/// Emit the single debug record of a health probe.
pub fn health_probe(logger: &Logger) {
    logger.debug("Health check called");
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::facility::{Destination, LogFacility};
    use crate::test_helpers::CaptureWriter;

    fn capture_logger(level: Level) -> (Logger, CaptureWriter) {
        let capture = CaptureWriter::new();
        let facility = LogFacility::with_root_level(level);
        facility.add_destination(Destination::new("capture", capture.clone()));
        (facility.logger("app"), capture)
    }

    #[test]
    fn requested_level_resolution() {
        assert_eq!(resolve_requested_level(Some("TRACE")), Level::Trace);
        assert_eq!(resolve_requested_level(Some("Warning")), Level::Warning);
        assert_eq!(resolve_requested_level(Some("critical")), Level::Info);
        assert_eq!(resolve_requested_level(Some("warn")), Level::Info);
        assert_eq!(resolve_requested_level(None), Level::Info);
    }

    #[test]
    fn level_demo_emits_preamble_then_requested_record() {
        let (logger, capture) = capture_logger(Level::Trace);
        let outcome = emit_level_demo(&logger, "Ada", Some("error"));

        assert_eq!(
            capture.lines(),
            vec![
                "DEBUG: Processing GET request with name=Ada",
                "INFO: HTTP GET triggered - Greeting Ada",
                "WARNING: Example warning message for Ada",
                "ERROR: Error level log for Ada",
            ]
        );
        assert_eq!(outcome.requested_level, Level::Error);
        assert_eq!(outcome.message, "Hello, Ada! Check the log stream for logs.");
    }

    #[test]
    fn level_demo_trace_is_filtered_at_debug() {
        let (logger, capture) = capture_logger(Level::Debug);
        let outcome = emit_level_demo(&logger, "Ada", Some("trace"));

        assert_eq!(outcome.levels_emitted.last(), Some(&Level::Trace));
        assert_eq!(capture.lines().len(), 3);
    }

    #[test]
    fn all_levels_demo_reports_five_levels() {
        let (logger, capture) = capture_logger(Level::Debug);
        let levels = log_all_levels(&logger);

        let labels: Vec<&str> = levels.iter().map(|l| l.level.as_str()).collect();
        assert_eq!(labels, vec!["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]);
        assert!(levels.iter().all(|l| l.logged));
        assert_eq!(
            capture.lines().last().map(String::as_str),
            Some("CRITICAL: Severe error requiring attention")
        );
    }

    #[test]
    fn bulk_entries_are_padded_and_tagged() {
        let (logger, capture) = capture_logger(Level::Info);
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = generate_bulk_with_rng(&logger, 3, 500, &mut rng);

        assert_eq!(outcome.entries_generated, 3);
        let lines = capture.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Starting sampling test - generating 3 log entries");
        assert!(lines[1].starts_with("Sampling test entry 0001/0003 - ID: "));
        assert!(lines[3].starts_with("Sampling test entry 0003/0003 - ID: "));
        assert_eq!(lines[4], "Sampling test completed - 3 entries logged");

        for line in &lines[1..4] {
            let id: u32 = line.rsplit(' ').next().unwrap().parse().unwrap();
            assert!(SAMPLE_ID_RANGE.contains(&id));
        }
    }

    #[test]
    fn bulk_count_is_clamped() {
        let (logger, _capture) = capture_logger(Level::Warning);
        assert_eq!(generate_bulk(&logger, 1000, 500).entries_generated, 500);
        assert_eq!(generate_bulk(&logger, -4, 500).entries_generated, 0);
        assert_eq!(generate_bulk(&logger, 10, 0).entries_generated, 0);
    }

    #[test]
    fn progress_logging_counts_every_nth_iteration() {
        let (logger, capture) = capture_logger(Level::Info);
        let outcome = run_with_progress_logging(&logger, 100, 10);

        assert_eq!(outcome.iterations, 100);
        assert_eq!(outcome.log_frequency, 10);
        assert_eq!(outcome.logs_emitted, 10);
        assert_eq!(capture.lines_containing("Performance test progress").len(), 10);
        assert_eq!(
            capture.lines_containing("progress").first().map(String::as_str),
            Some("Performance test progress: 10/100")
        );
    }

    #[test]
    fn progress_logging_clamps_inputs() {
        let (logger, _capture) = capture_logger(Level::Warning);

        let zero_frequency = run_with_progress_logging(&logger, 7, 0);
        assert_eq!(zero_frequency.log_frequency, 1);
        assert_eq!(zero_frequency.logs_emitted, 7);

        let too_many = run_with_progress_logging(&logger, 50_000, 5_000);
        assert_eq!(too_many.iterations, MAX_ITERATIONS);
        assert_eq!(too_many.logs_emitted, 2);

        let negative = run_with_progress_logging(&logger, -3, 1);
        assert_eq!(negative.iterations, 0);
        assert_eq!(negative.average_iteration_ms(), 0.0);
    }

    #[test]
    fn submission_defaults_and_cap() {
        let (logger, capture) = capture_logger(Level::Info);
        let outcome = process_submission(&logger, &Submission::default()).unwrap();
        assert_eq!(outcome.message, "Hello, Anonymous!");
        assert_eq!(outcome.logs_generated, 1);
        assert_eq!(
            capture.lines(),
            vec![
                "Processing POST request for Anonymous",
                "Log entry 1/1 for Anonymous",
            ]
        );

        let big = Submission {
            name: Some("Bo".to_string()),
            generate_logs: Some(250),
            simulate_error: None,
        };
        let outcome = process_submission(&logger, &big).unwrap();
        assert_eq!(outcome.logs_generated, SUBMISSION_LOG_CAP);
        assert_eq!(capture.lines_containing("/250 for Bo").len(), 100);
    }

    #[test]
    fn submission_can_simulate_error() {
        let (logger, capture) = capture_logger(Level::Info);
        let submission = Submission {
            name: Some("X".to_string()),
            generate_logs: Some(0),
            simulate_error: Some(true),
        };

        let err = process_submission(&logger, &submission).unwrap_err();
        assert!(matches!(err, Error::Simulated));
        assert_eq!(
            capture.lines_containing("Simulated error"),
            vec!["Simulated error for testing - User: X"]
        );
    }

    #[test]
    fn submission_deserializes_camel_case() {
        let submission: Submission =
            serde_json::from_str(r#"{"name":"X","generateLogs":3,"simulateError":true}"#).unwrap();
        assert_eq!(submission.generate_logs, Some(3));
        assert_eq!(submission.simulate_error, Some(true));
    }

    #[test]
    fn malformed_submission_body_is_invalid_json() {
        let bodies: [&[u8]; 4] = [b"{", b"", b"[1,2]", br#"{"generateLogs":"many"}"#];
        for body in bodies {
            let err = Submission::from_json(body).unwrap_err();
            assert!(matches!(err, Error::InvalidJson(_)));
        }
        assert_eq!(Submission::from_json(b"{}").unwrap(), Submission::default());
    }
}
