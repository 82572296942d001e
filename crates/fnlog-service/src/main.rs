//! HTTP service exercising the fnlog logging identity shim.
//!
//! Every demonstration handler logs through the configured logger, so the
//! host's log forwarder receives records rendered as `[app] <message>`.
//!
//! # Endpoints
//!
//! - `GET /api/httpget?name&loglevel` - level demonstration, plain-text greeting
//! - `POST /api/httppost` - submission demonstration (`name`, `generateLogs`, `simulateError`)
//! - `GET /api/loggingdemo` - one record per level
//! - `GET /api/performancetest?iterations&logfrequency` - frequency-gated progress logging
//! - `GET /api/samplingtest?count` - bulk records for sampling experiments
//! - `GET /api/healthcheck` - single debug record
//! - `GET /api/profiles/{name}` - host logging profile as `host.json`
//! - `GET /api/profiles/{name}/app-settings` - the same profile as app settings
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - liveness probe
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` - "false" disables the Prometheus recorder
//! - `FNLOG_*` - logger identity, levels, suppression, template, sampling cap

mod routes;

use std::net::SocketAddr;

use tracing::{error, info};

use fnlog_service_shared::{init_logging, init_metrics, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;

    // Configuration failures are fatal: without the facility nothing is observable.
    let logger = init_logging(&config.logging).map_err(|e| {
        eprintln!("failed to configure logging: {}", e);
        e
    })?;

    if let Err(e) = init_metrics(&config.metrics) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "metrics recorder not installed, continuing without metrics");
    }

    let state = AppState::new(logger, config.sampling_cap);
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, sampling_cap = config.sampling_cap, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!(error = %e, addr = %addr, "failed to bind");
        e
    })?;
    axum::serve(listener, app).await?;

    Ok(())
}
