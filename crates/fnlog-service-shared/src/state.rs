//! Service configuration and the state shared by axum handlers.

use std::sync::Arc;

use fnlog_lib::config::sampling_cap_from_lookup;
use fnlog_lib::{Logger, Result};

use crate::logging::LoggingConfig;
use crate::metrics::MetricsConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Everything the service reads from its environment at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// Upper bound for `GET /api/samplingtest?count=`.
    pub sampling_cap: i64,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// - `SERVICE_PORT`: HTTP port (default: 8080)
    /// - `FNLOG_SAMPLING_CAP`: sampling demonstration cap (default: 500)
    /// - see [`LoggingConfig::from_env`] and [`MetricsConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("SERVICE_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let sampling_cap = sampling_cap_from_lookup(&lookup)?;

        Ok(Self {
            port,
            sampling_cap,
            logging: LoggingConfig::from_lookup(&lookup)?,
            metrics: MetricsConfig::from_lookup(&lookup),
        })
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` inside); share it via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    logger: Logger,
    sampling_cap: i64,
}

impl AppState {
    pub fn new(logger: Logger, sampling_cap: i64) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                logger,
                sampling_cap,
            }),
        }
    }

    /// The configured demonstration logger.
    pub fn logger(&self) -> &Logger {
        &self.inner.logger
    }

    pub fn sampling_cap(&self) -> i64 {
        self.inner.sampling_cap
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("logger", &self.inner.logger.name())
            .field("sampling_cap", &self.inner.sampling_cap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use fnlog_lib::LogFacility;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.sampling_cap, 500);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_service_config_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("SERVICE_PORT", "9090"),
            ("FNLOG_SAMPLING_CAP", "20"),
            ("METRICS_ENABLED", "false"),
            ("FNLOG_LOGGER_NAME", "orders"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.sampling_cap, 20);
        assert!(!config.metrics.enabled);
        assert_eq!(config.logging.logger.logger_name, "orders");
    }

    #[test]
    fn test_bad_sampling_cap_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[("FNLOG_SAMPLING_CAP", "lots")])).unwrap_err();
        assert!(err.to_string().contains("FNLOG_SAMPLING_CAP"));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::new(LogFacility::new().logger("app"), 500);
        let debug = format!("{:?}", state.clone());
        assert!(debug.contains("AppState"));
        assert!(debug.contains("\"app\""));
        assert_eq!(state.sampling_cap(), 500);
    }
}
