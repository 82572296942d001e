//! Router and demonstration handlers.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use fnlog_lib::demo::{
    emit_level_demo, generate_bulk, health_probe, log_all_levels, process_submission,
    run_with_progress_logging, Submission, SubmissionOutcome, DEFAULT_GREETING_NAME,
};
use fnlog_lib::report::{HealthReport, LoggingDemoReport, PerformanceReport, SamplingReport};
use fnlog_lib::{Error as LibError, HostConfig, HostProfile};
use fnlog_service_shared::{
    from_lib_error, health_live, metrics_handler, record_records_emitted, AppState,
    ErrorResponse, GreetingQuery, MetricsLayer, PerformanceQuery, SamplingQuery, Validate,
};

type HandlerResult<T> = Result<Json<T>, ErrorResponse>;

/// Build the service router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/httpget", get(http_get))
        .route("/api/httppost", post(http_post))
        .route("/api/loggingdemo", get(logging_demo))
        .route("/api/performancetest", get(performance_test))
        .route("/api/samplingtest", get(sampling_test))
        .route("/api/healthcheck", get(health_check))
        .route("/api/profiles/{name}", get(host_profile))
        .route("/api/profiles/{name}/app-settings", get(host_profile_settings))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle GET /api/httpget requests.
async fn http_get(State(state): State<AppState>, Query(query): Query<GreetingQuery>) -> String {
    let name = query.name.as_deref().unwrap_or(DEFAULT_GREETING_NAME);
    let outcome = emit_level_demo(state.logger(), name, query.loglevel.as_deref());
    record_records_emitted("levels", outcome.levels_emitted.len() as i64);
    outcome.message
}

/// Handle POST /api/httppost requests.
///
/// The body is taken as raw bytes so that malformed JSON is reported with the
/// same `{"error": ...}` shape as every other failure.
async fn http_post(State(state): State<AppState>, body: Bytes) -> HandlerResult<SubmissionOutcome> {
    let outcome = Submission::from_json(&body)
        .and_then(|submission| process_submission(state.logger(), &submission))
        .map_err(|e| from_lib_error(&e, state.logger()))?;

    record_records_emitted("submission", outcome.logs_generated + 1);
    Ok(Json(outcome))
}

async fn logging_demo(State(state): State<AppState>) -> Json<LoggingDemoReport> {
    let levels = log_all_levels(state.logger());
    record_records_emitted("all_levels", levels.len() as i64);
    Json(LoggingDemoReport::from(levels))
}

/// Handle GET /api/performancetest requests.
///
/// The work loop is CPU-bound and runs on the blocking pool.
async fn performance_test(
    State(state): State<AppState>,
    Query(query): Query<PerformanceQuery>,
) -> HandlerResult<PerformanceReport> {
    let params = query
        .validate()
        .map_err(|e| from_lib_error(&e, state.logger()))?;

    let logger = state.logger().clone();
    let outcome = tokio::task::spawn_blocking(move || {
        run_with_progress_logging(&logger, params.iterations, params.log_frequency)
    })
    .await
    .map_err(|e| from_lib_error(&LibError::Unexpected(e.to_string()), state.logger()))?;

    record_records_emitted("performance", outcome.logs_emitted + 2);
    Ok(Json(PerformanceReport::from(outcome)))
}

async fn sampling_test(
    State(state): State<AppState>,
    Query(query): Query<SamplingQuery>,
) -> HandlerResult<SamplingReport> {
    let count = query
        .validate()
        .map_err(|e| from_lib_error(&e, state.logger()))?;

    let outcome = generate_bulk(state.logger(), count, state.sampling_cap());
    record_records_emitted("sampling", outcome.entries_generated + 2);
    Ok(Json(SamplingReport::from(outcome)))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    health_probe(state.logger());
    Json(HealthReport::healthy_now())
}

fn lookup_profile(name: &str, state: &AppState) -> Result<HostProfile, ErrorResponse> {
    name.parse::<HostProfile>()
        .map_err(|e| from_lib_error(&e, state.logger()))
}

async fn host_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<HostConfig> {
    let profile = lookup_profile(&name, &state)?;
    Ok(Json(profile.host_config()))
}

async fn host_profile_settings(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<BTreeMap<String, String>> {
    let profile = lookup_profile(&name, &state)?;
    let settings = profile
        .host_config()
        .app_settings()
        .map_err(|e| from_lib_error(&e, state.logger()))?;
    Ok(Json(settings))
}
