//! AWS Lambda function exercising the fnlog logging identity shim.
//!
//! The function accepts `{"action": ...}` events mirroring the HTTP
//! service's endpoints. Every demonstration logs through the configured
//! logger, so the platform's log capture sees `[app] <message>` records.
//!
//! Configuration comes from the same `FNLOG_*` environment variables as the
//! HTTP service, read once into a [`FunctionConfig`] at cold start.

#![deny(warnings)]

mod config;
mod models;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use fnlog_lib::demo::{
    emit_level_demo, generate_bulk, health_probe, log_all_levels, process_submission,
    run_with_progress_logging, DEFAULT_GREETING_NAME, DEFAULT_ITERATIONS, DEFAULT_LOG_FREQUENCY,
    DEFAULT_SAMPLING_COUNT,
};
use fnlog_lib::report::{HealthReport, LoggingDemoReport, PerformanceReport, SamplingReport};
use fnlog_lib::{configure, Error as LibError, ErrorKind, ErrorReport, LogFacility, Logger};

pub use config::FunctionConfig;
pub use models::{DemoEvent, ErrorResponse, GreetingResponse, Response};

/// Install the process-wide facility and apply `config` to it.
///
/// # Errors
///
/// Fails on an unopenable default sink, an invalid template, or when another
/// global subscriber is already installed.
pub fn init_logging(config: &FunctionConfig) -> Result<Logger, LibError> {
    let facility = LogFacility::global(config.root_level)?;
    configure(&facility, &config.logger)
}

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    let config = FunctionConfig::from_env()?;
    let logger = init_logging(&config)?;
    let logger = &logger;
    let sampling_cap = config.sampling_cap;
    info!(sampling_cap, "function configured");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(logger, sampling_cap, event).await
    }))
    .await
}

/// Lambda handler invoked per request.
///
/// `sampling_cap` bounds the sampling demonstration. Failures are reported in
/// the response body; the invocation itself only fails if the runtime cannot
/// run the demonstration at all.
pub async fn handler(
    logger: &Logger,
    sampling_cap: i64,
    event: LambdaEvent<Value>,
) -> Result<Response, Error> {
    let request_id = event.context.request_id.clone();

    let demo: DemoEvent = match serde_json::from_value(event.payload) {
        Ok(demo) => demo,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to parse event");
            return Ok(Response::Error(ErrorResponse {
                status_code: 400,
                body: ErrorReport::new(format!("Invalid request: {}", e)),
            }));
        }
    };

    info!(request_id = %request_id, action = demo.action(), "handling event");
    Ok(dispatch(logger, sampling_cap, demo).await)
}

async fn dispatch(logger: &Logger, sampling_cap: i64, demo: DemoEvent) -> Response {
    match demo {
        DemoEvent::HttpGet { name, loglevel } => {
            let name = name.as_deref().unwrap_or(DEFAULT_GREETING_NAME);
            let outcome = emit_level_demo(logger, name, loglevel.as_deref());
            Response::Greeting(GreetingResponse {
                message: outcome.message,
            })
        }
        DemoEvent::HttpPost(submission) => match process_submission(logger, &submission) {
            Ok(outcome) => Response::Submission(outcome),
            Err(e) => error_response(logger, &e),
        },
        DemoEvent::LoggingDemo => {
            Response::LoggingDemo(LoggingDemoReport::from(log_all_levels(logger)))
        }
        DemoEvent::PerformanceTest {
            iterations,
            logfrequency,
        } => {
            let iterations = iterations.unwrap_or(DEFAULT_ITERATIONS);
            let every = logfrequency.unwrap_or(DEFAULT_LOG_FREQUENCY);
            let worker = logger.clone();
            match tokio::task::spawn_blocking(move || {
                run_with_progress_logging(&worker, iterations, every)
            })
            .await
            {
                Ok(outcome) => Response::Performance(PerformanceReport::from(outcome)),
                Err(e) => error_response(logger, &LibError::Unexpected(e.to_string())),
            }
        }
        DemoEvent::SamplingTest { count } => {
            let count = count.unwrap_or(DEFAULT_SAMPLING_COUNT);
            let outcome = generate_bulk(logger, count, sampling_cap);
            Response::Sampling(SamplingReport::from(outcome))
        }
        DemoEvent::HealthCheck => {
            health_probe(logger);
            Response::Health(HealthReport::healthy_now())
        }
    }
}

fn error_response(logger: &Logger, error: &LibError) -> Response {
    let kind = error.kind();
    if kind != ErrorKind::Validation {
        logger.exception("Request failed", error);
    }
    Response::Error(ErrorResponse {
        status_code: kind.status_code(),
        body: ErrorReport::from_error(error),
    })
}
