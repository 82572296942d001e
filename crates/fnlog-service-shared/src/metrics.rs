//! Prometheus metrics infrastructure for the demonstration service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Helpers for demonstration and error counters
//!
//! # Example
//!
//! ```no_run
//! use fnlog_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use fnlog_lib::ErrorKind;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Self { enabled }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
///
/// # Errors
///
/// Returns an error if metrics are disabled, the recorder was already
/// installed, or the Prometheus builder fails.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Demonstration Metrics Helpers
// =============================================================================

/// Record demonstration records emitted by a handler.
///
/// Increments `fnlog_records_emitted_total` by `count`.
///
/// # Arguments
///
/// * `demo` - The demonstration name (e.g., "sampling", "performance")
/// * `count` - Records the demonstration reported as emitted
pub fn record_records_emitted(demo: &'static str, count: i64) {
    metrics::counter!("fnlog_records_emitted_total", "demo" => demo)
        .increment(count.max(0) as u64);
}

/// Record a failed handler invocation.
///
/// Increments `fnlog_handler_errors_total` labelled by error kind.
pub fn record_handler_error(kind: ErrorKind) {
    metrics::counter!("fnlog_handler_errors_total", "kind" => kind.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        assert!(MetricsConfig::default().enabled);
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        assert!(MetricsConfig::from_lookup(|_| None).enabled);
        assert!(!MetricsConfig::from_lookup(|_| Some("FALSE".to_string())).enabled);
        assert!(MetricsConfig::from_lookup(|_| Some("yes".to_string())).enabled);
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        // Global recorder state is not installed in unit tests.
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });

        assert!(
            output.contains('#') || output.is_empty(),
            "Metrics output should be Prometheus format or indicate not initialized"
        );
    }

    #[test]
    fn test_demonstration_counters_do_not_panic() {
        record_records_emitted("sampling", 52);
        record_records_emitted("performance", -1);
        record_handler_error(ErrorKind::Validation);
        record_handler_error(ErrorKind::Simulated);
    }

    #[test]
    fn test_metrics_disabled_is_an_error() {
        let err = init_metrics(&MetricsConfig { enabled: false }).unwrap_err();
        assert_eq!(err.to_string(), "metrics are disabled");
    }
}
