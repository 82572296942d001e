//! Handlers for the logging demonstrations.

use anyhow::Result;

use fnlog_cli::logging::{init_logger, LoggingOverrides};
use fnlog_cli::output::{print_json, OutputFormat};
use fnlog_lib::demo::{
    emit_level_demo, generate_bulk, health_probe, log_all_levels, run_with_progress_logging,
};
use fnlog_lib::report::{HealthReport, LoggingDemoReport, PerformanceReport, SamplingReport};

/// Handle the levels subcommand; prints the greeting.
pub fn handle_levels(overrides: &LoggingOverrides, name: &str, level: Option<&str>) -> Result<()> {
    let logger = init_logger(overrides)?;
    let outcome = emit_level_demo(&logger, name, level);
    tracing::debug!(requested = %outcome.requested_level, "level demonstration finished");
    println!("{}", outcome.message);
    Ok(())
}

pub fn handle_all_levels(overrides: &LoggingOverrides, format: OutputFormat) -> Result<()> {
    let logger = init_logger(overrides)?;
    let report = LoggingDemoReport::from(log_all_levels(&logger));
    print_json(&report, format)
}

/// Handle the sample subcommand.
///
/// `cap` defaults to the service's sampling cap; negative counts emit nothing.
pub fn handle_sample(
    overrides: &LoggingOverrides,
    count: i64,
    cap: i64,
    format: OutputFormat,
) -> Result<()> {
    let logger = init_logger(overrides)?;
    let outcome = generate_bulk(&logger, count, cap);
    print_json(&SamplingReport::from(outcome), format)
}

pub fn handle_perf(
    overrides: &LoggingOverrides,
    iterations: i64,
    log_frequency: i64,
    format: OutputFormat,
) -> Result<()> {
    let logger = init_logger(overrides)?;
    let outcome = run_with_progress_logging(&logger, iterations, log_frequency);
    print_json(&PerformanceReport::from(outcome), format)
}

pub fn handle_health(overrides: &LoggingOverrides, format: OutputFormat) -> Result<()> {
    let logger = init_logger(overrides)?;
    health_probe(&logger);
    print_json(&HealthReport::healthy_now(), format)
}
