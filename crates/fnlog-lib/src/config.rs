//! Logging configurator.
//!
//! [`configure`] installs the identity-preserving formatter on every
//! destination of a [`LogFacility`], attaches a default destination when the
//! facility has none, raises noisy upstream loggers to `warning`, and sets the
//! named logger's own level.
//!
//! # Environment Variables
//!
//! [`LoggerConfig::from_env`] reads:
//!
//! - `FNLOG_LOGGER_NAME`: logger identity (default: `app`)
//! - `FNLOG_LOG_LEVEL`: minimum level for that logger (default: `debug`)
//! - `FNLOG_SUPPRESS`: comma-separated sources to raise to `warning`; an empty
//!   value suppresses nothing, unset uses [`DEFAULT_SUPPRESSED_SOURCES`]
//! - `FNLOG_TEMPLATE`: message template (default: [`DEFAULT_TEMPLATE`])
//! - `FNLOG_DEFAULT_SINK`: `stderr` (default), `stdout` or `file:<path>`
//!
//! # Example
//!
//! ```
//! use fnlog_lib::{configure, LogFacility, LoggerConfig};
//!
//! let facility = LogFacility::new();
//! let logger = configure(&facility, &LoggerConfig::new("orders")).unwrap();
//! logger.info("ready"); // "[orders] ready"
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::demo::SAMPLING_CAP;
use crate::error::{Error, Result};
use crate::facility::{Destination, LogFacility, DEFAULT_ROOT_LEVEL};
use crate::formatter::{MessageFormatter, DEFAULT_TEMPLATE};
use crate::level::Level;
use crate::logger::Logger;

pub const DEFAULT_LOGGER_NAME: &str = "app";

pub const DEFAULT_MIN_LEVEL: Level = Level::Debug;

/// Level forced onto every suppressed source.
pub const SUPPRESSED_LEVEL: Level = Level::Warning;

/// Upstream loggers that flood the output at debug/info level.
///
/// HTTP pipeline logging, the HTTP pipeline itself, credential acquisition,
/// storage clients, low-level HTTP transport and REST client scaffolding.
pub const DEFAULT_SUPPRESSED_SOURCES: [&str; 6] = [
    "azure_core::http::policies::logging",
    "azure_core::http",
    "azure_identity",
    "azure_storage",
    "hyper",
    "reqwest",
];

/// Where records go when the facility has no destination yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SinkSpec {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

impl SinkSpec {
    /// Open the destination described by this spec.
    pub fn open(&self) -> Result<Destination> {
        match self {
            SinkSpec::Stderr => Ok(Destination::stderr()),
            SinkSpec::Stdout => Ok(Destination::stdout()),
            SinkSpec::File(path) => Destination::file(path),
        }
    }
}

impl FromStr for SinkSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "stderr" => return Ok(SinkSpec::Stderr),
            "stdout" => return Ok(SinkSpec::Stdout),
            _ => {}
        }
        match trimmed.strip_prefix("file:") {
            Some(path) if !path.is_empty() => Ok(SinkSpec::File(PathBuf::from(path))),
            _ => Err(Error::UnsupportedSink {
                spec: s.to_string(),
            }),
        }
    }
}

/// Desired logging configuration for one logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub logger_name: String,
    pub min_level: Level,
    pub suppressed_sources: BTreeSet<String>,
    pub message_template: String,
    pub default_sink: SinkSpec,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOGGER_NAME)
    }
}

impl LoggerConfig {
    /// Defaults for everything but the logger name.
    pub fn new(logger_name: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            min_level: DEFAULT_MIN_LEVEL,
            suppressed_sources: DEFAULT_SUPPRESSED_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            message_template: DEFAULT_TEMPLATE.to_string(),
            default_sink: SinkSpec::default(),
        }
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Replace the suppressed set; an empty iterator suppresses nothing.
    pub fn with_suppressed<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suppressed_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Use `template`, or the default template when `None`.
    pub fn with_template(mut self, template: Option<&str>) -> Self {
        self.message_template = template.unwrap_or(DEFAULT_TEMPLATE).to_string();
        self
    }

    pub fn with_default_sink(mut self, sink: SinkSpec) -> Self {
        self.default_sink = sink;
        self
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config =
            Self::new(lookup("FNLOG_LOGGER_NAME").unwrap_or_else(|| DEFAULT_LOGGER_NAME.into()));

        if let Some(level) = lookup("FNLOG_LOG_LEVEL") {
            config.min_level = level.parse()?;
        }
        if let Some(list) = lookup("FNLOG_SUPPRESS") {
            config.suppressed_sources = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(template) = lookup("FNLOG_TEMPLATE") {
            config.message_template = template;
        }
        if let Some(sink) = lookup("FNLOG_DEFAULT_SINK") {
            config.default_sink = sink.parse()?;
        }

        Ok(config)
    }
}

/// Parse an optional integer value, falling back to `default` when absent.
///
/// Surrounding whitespace is ignored; anything else that is not an integer
/// is a validation error naming `parameter`.
pub fn parse_int_param(parameter: &str, raw: Option<&str>, default: i64) -> Result<i64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::not_an_integer(parameter, value)),
    }
}

/// Root level from `FNLOG_ROOT_LEVEL` (default: [`DEFAULT_ROOT_LEVEL`]).
pub fn root_level_from_lookup<F>(lookup: F) -> Result<Level>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("FNLOG_ROOT_LEVEL") {
        Some(level) => level.parse(),
        None => Ok(DEFAULT_ROOT_LEVEL),
    }
}

/// Sampling demonstration cap from `FNLOG_SAMPLING_CAP` (default: [`SAMPLING_CAP`]).
pub fn sampling_cap_from_lookup<F>(lookup: F) -> Result<i64>
where
    F: Fn(&str) -> Option<String>,
{
    parse_int_param(
        "FNLOG_SAMPLING_CAP",
        lookup("FNLOG_SAMPLING_CAP").as_deref(),
        SAMPLING_CAP,
    )
}

/// Apply `config` to `facility` and return the configured logger.
///
/// Calling this again with the same configuration leaves the facility in the
/// same state: formatters are replaced rather than stacked, and the default
/// destination is only attached while the facility has none. The template is
/// validated before anything changes.
///
/// # Errors
///
/// Returns a configuration error when the template is invalid or the default
/// destination cannot be opened.
pub fn configure(facility: &LogFacility, config: &LoggerConfig) -> Result<Logger> {
    let formatter = Arc::new(MessageFormatter::new(&config.message_template)?);

    facility.update(|state| -> Result<()> {
        for destination in &mut state.destinations {
            destination.set_formatter(Arc::clone(&formatter));
        }
        if state.destinations.is_empty() {
            let destination = config
                .default_sink
                .open()?
                .with_formatter(Arc::clone(&formatter));
            state.destinations.push(destination);
        }
        for source in &config.suppressed_sources {
            state.levels.insert(source.clone(), SUPPRESSED_LEVEL);
        }
        state
            .levels
            .insert(config.logger_name.clone(), config.min_level);
        Ok(())
    })?;

    let logger = facility.logger(config.logger_name.clone());
    logger.info(format_args!(
        "Logging configured: logger='{}', suppressed {} libraries",
        config.logger_name,
        config.suppressed_sources.len()
    ));

    Ok(logger)
}
