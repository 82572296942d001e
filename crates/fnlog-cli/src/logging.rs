//! Logger setup for CLI commands.
//!
//! Flags given on the command line win over the `FNLOG_*` environment, which
//! wins over the library defaults. Records go to stderr unless another sink
//! is chosen, so stdout only carries command results.

use anyhow::{Context, Result};

use fnlog_lib::config::root_level_from_lookup;
use fnlog_lib::{configure, Level, LogFacility, Logger, LoggerConfig, SinkSpec};

/// Command-line overrides for the logger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOverrides {
    pub logger_name: Option<String>,
    pub log_level: Option<Level>,
    pub root_level: Option<Level>,
    pub sink: Option<SinkSpec>,
    pub template: Option<String>,
    /// Suppress nothing instead of the default noisy sources.
    pub no_suppress: bool,
}

impl LoggingOverrides {
    /// Layer these overrides on top of `config`.
    pub fn apply(&self, mut config: LoggerConfig) -> LoggerConfig {
        if let Some(name) = &self.logger_name {
            config.logger_name = name.clone();
        }
        if let Some(level) = self.log_level {
            config = config.with_min_level(level);
        }
        if let Some(sink) = &self.sink {
            config = config.with_default_sink(sink.clone());
        }
        if let Some(template) = self.template.as_deref() {
            config = config.with_template(Some(template));
        }
        if self.no_suppress {
            config = config.with_suppressed(Vec::<String>::new());
        }
        config
    }

    /// Root level from the overrides, then `FNLOG_ROOT_LEVEL`, then the default.
    pub fn resolve_root_level<F>(&self, lookup: F) -> Result<Level>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = self.root_level {
            return Ok(level);
        }
        root_level_from_lookup(lookup).context("invalid FNLOG_ROOT_LEVEL value")
    }
}

/// Install the process-wide facility and configure the named logger.
pub fn init_logger(overrides: &LoggingOverrides) -> Result<Logger> {
    let lookup = |key: &str| std::env::var(key).ok();

    let root_level = overrides.resolve_root_level(lookup)?;
    let config = LoggerConfig::from_lookup(lookup).context("invalid FNLOG_* environment")?;
    let config = overrides.apply(config);

    let facility = LogFacility::global(root_level).context("failed to install log facility")?;
    configure(&facility, &config)
        .with_context(|| format!("failed to configure logger '{}'", config.logger_name))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = LoggerConfig::new("app");
        assert_eq!(LoggingOverrides::default().apply(config.clone()), config);
    }

    #[test]
    fn test_overrides_replace_fields() {
        let overrides = LoggingOverrides {
            logger_name: Some("cli".to_string()),
            log_level: Some(Level::Warning),
            sink: Some(SinkSpec::File(PathBuf::from("/tmp/fnlog.log"))),
            template: Some("<{loggerName}> {message}".to_string()),
            no_suppress: true,
            ..Default::default()
        };

        let config = overrides.apply(LoggerConfig::new("app"));

        assert_eq!(config.logger_name, "cli");
        assert_eq!(config.min_level, Level::Warning);
        assert_eq!(config.default_sink, SinkSpec::File(PathBuf::from("/tmp/fnlog.log")));
        assert_eq!(config.message_template, "<{loggerName}> {message}");
        assert!(config.suppressed_sources.is_empty());
    }

    #[test]
    fn test_root_level_precedence() {
        let from_env = |key: &str| (key == "FNLOG_ROOT_LEVEL").then(|| "error".to_string());
        let nothing = |_: &str| -> Option<String> { None };

        assert_eq!(
            LoggingOverrides::default().resolve_root_level(nothing).unwrap(),
            Level::Info
        );
        assert_eq!(
            LoggingOverrides::default().resolve_root_level(from_env).unwrap(),
            Level::Error
        );

        let overrides = LoggingOverrides {
            root_level: Some(Level::Debug),
            ..Default::default()
        };
        assert_eq!(overrides.resolve_root_level(from_env).unwrap(), Level::Debug);
    }

    #[test]
    fn test_invalid_root_level_is_reported() {
        let bad = |_: &str| Some("loud".to_string());
        let err = LoggingOverrides::default()
            .resolve_root_level(bad)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("FNLOG_ROOT_LEVEL"));
    }
}
