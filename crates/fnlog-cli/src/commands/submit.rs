//! Submit command handler.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use fnlog_cli::logging::{init_logger, LoggingOverrides};
use fnlog_cli::output::{print_json, OutputFormat};
use fnlog_lib::demo::{process_submission, Submission};

/// Build the submission from flags, or from a JSON file when one is given.
pub fn resolve_submission(
    name: Option<String>,
    generate_logs: Option<i64>,
    simulate_error: bool,
    from_file: Option<&Path>,
) -> Result<Submission> {
    if let Some(path) = from_file {
        let body = fs::read(path)
            .with_context(|| format!("failed to read submission from {}", path.display()))?;
        return Submission::from_json(&body)
            .with_context(|| format!("failed to parse submission in {}", path.display()));
    }

    Ok(Submission {
        name,
        generate_logs,
        simulate_error: simulate_error.then_some(true),
    })
}

/// Handle the submit subcommand.
///
/// A simulated failure is logged with its error chain and then returned, so
/// the process exits non-zero.
pub fn handle_submit(
    overrides: &LoggingOverrides,
    submission: &Submission,
    format: OutputFormat,
) -> Result<()> {
    let logger = init_logger(overrides)?;
    let outcome = process_submission(&logger, submission).map_err(|e| {
        logger.exception("Submission failed", &e);
        e
    })?;
    print_json(&outcome, format)
}
