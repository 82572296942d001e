//! Function configuration read once at cold start.

use fnlog_lib::config::{root_level_from_lookup, sampling_cap_from_lookup};
use fnlog_lib::demo::SAMPLING_CAP;
use fnlog_lib::facility::DEFAULT_ROOT_LEVEL;
use fnlog_lib::{Level, LoggerConfig, Result};

/// Everything the function reads from its environment.
///
/// The variables are the `FNLOG_*` set the HTTP service reads:
/// `FNLOG_ROOT_LEVEL`, `FNLOG_SAMPLING_CAP` and everything
/// [`LoggerConfig::from_env`] reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Level applied to loggers without an explicit setting.
    pub root_level: Level,
    pub logger: LoggerConfig,
    /// `capAt` for the sampling demonstration.
    pub sampling_cap: i64,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            root_level: DEFAULT_ROOT_LEVEL,
            logger: LoggerConfig::default(),
            sampling_cap: SAMPLING_CAP,
        }
    }
}

impl FunctionConfig {
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
            sampling_cap: sampling_cap_from_lookup(&lookup)?,
            logger: LoggerConfig::from_lookup(lookup)?,
        })
    }
}
