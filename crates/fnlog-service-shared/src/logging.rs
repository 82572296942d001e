//! Log facility setup for the HTTP service.
//!
//! This module provides:
//! - [`LoggingConfig`]: root level plus the logger configuration
//! - [`init_logging`]: install the process-wide facility and configure it
//!
//! # Environment Variables
//!
//! - `FNLOG_ROOT_LEVEL`: level for loggers with no explicit setting (default: `info`)
//! - everything [`LoggerConfig::from_env`] reads (`FNLOG_LOGGER_NAME`,
//!   `FNLOG_LOG_LEVEL`, `FNLOG_SUPPRESS`, `FNLOG_TEMPLATE`, `FNLOG_DEFAULT_SINK`)
//!
//! # Example
//!
//! ```no_run
//! use fnlog_service_shared::logging::{init_logging, LoggingConfig};
//!
//! let config = LoggingConfig::from_env().expect("invalid logging environment");
//! let logger = init_logging(&config).expect("failed to configure logging");
//! logger.info("ready");
//! ```

use fnlog_lib::config::root_level_from_lookup;
use fnlog_lib::facility::DEFAULT_ROOT_LEVEL;
use fnlog_lib::{configure, Level, LogFacility, Logger, LoggerConfig, Result};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level applied to loggers without an explicit setting.
    pub root_level: Level,
    /// Identity, suppression and formatting applied by [`configure`].
    pub logger: LoggerConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            root_level: DEFAULT_ROOT_LEVEL,
            logger: LoggerConfig::default(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            root_level: root_level_from_lookup(&lookup)?,
            logger: LoggerConfig::from_lookup(lookup)?,
        })
    }

    /// Override the logger name.
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger.logger_name = name.into();
        self
    }
}

/// Install the process-wide facility and apply `config` to it.
///
/// Safe to call more than once: the facility is installed by the first call
/// and later calls only re-run [`configure`], which is idempotent.
///
/// # Errors
///
/// Fails when another global subscriber is already installed, or when
/// [`configure`] rejects the configuration.
pub fn init_logging(config: &LoggingConfig) -> Result<Logger> {
    let facility = LogFacility::global(config.root_level)?;
    let logger = configure(&facility, &config.logger)?;
    tracing::info!(
        logger = %logger.name(),
        root_level = %config.root_level,
        destinations = facility.destination_count(),
        "log facility ready"
    );
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = LoggingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.root_level, Level::Info);
        assert_eq!(config.logger.logger_name, "app");
    }

    #[test]
    fn reads_root_level_and_logger_name() {
        let config = LoggingConfig::from_lookup(lookup(&[
            ("FNLOG_ROOT_LEVEL", "warning"),
            ("FNLOG_LOGGER_NAME", "orders"),
        ]))
        .unwrap();
        assert_eq!(config.root_level, Level::Warning);
        assert_eq!(config.logger.logger_name, "orders");
    }

    #[test]
    fn rejects_unknown_root_level() {
        assert!(LoggingConfig::from_lookup(lookup(&[("FNLOG_ROOT_LEVEL", "loud")])).is_err());
    }

    #[test]
    fn with_logger_name_overrides() {
        let config = LoggingConfig::default().with_logger_name("billing");
        assert_eq!(config.logger.logger_name, "billing");
    }
}
