//! Host logging profiles.
//!
//! A serverless host decides which forwarded records are kept, at what level
//! and with what telemetry sampling, independently of the function code.
//! These profiles capture common host-side configurations as `host.json`
//! documents, plus the equivalent app-setting overrides that change them
//! without a redeploy.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Prefix of app settings that override `host.json` values.
pub const APP_SETTINGS_PREFIX: &str = "AzureFunctionsJobHost";

/// Named host logging scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostProfile {
    /// Errors only, aggressive sampling. Cost optimized production.
    Minimal,
    /// Warnings by default, informational function logs, moderate sampling.
    Balanced,
    /// Everything down to debug, sampling off. Development only.
    Debug,
    /// Telemetry effectively turned off.
    Disabled,
    /// Different levels for individual functions.
    PerFunction,
}

impl HostProfile {
    pub const ALL: [HostProfile; 5] = [
        HostProfile::Minimal,
        HostProfile::Balanced,
        HostProfile::Debug,
        HostProfile::Disabled,
        HostProfile::PerFunction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HostProfile::Minimal => "minimal",
            HostProfile::Balanced => "balanced",
            HostProfile::Debug => "debug",
            HostProfile::Disabled => "disabled",
            HostProfile::PerFunction => "per-function",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HostProfile::Minimal => "Only errors and critical issues are logged; minimizes volume and cost",
            HostProfile::Balanced => "Good observability at reasonable cost for production",
            HostProfile::Debug => "Full logging for development; not recommended for production",
            HostProfile::Disabled => "No telemetry is sent to the monitoring backend",
            HostProfile::PerFunction => "Different logging levels for different functions",
        }
    }

    /// The `host.json` document for this profile.
    pub fn host_config(self) -> HostConfig {
        use HostLogLevel as L;

        match self {
            HostProfile::Minimal => HostConfig::new(
                Some(FileLoggingMode::Never),
                &[
                    ("default", L::Error),
                    ("Host.Results", L::Error),
                    ("Host.Aggregator", L::Error),
                    ("Function", L::Error),
                ],
                ApplicationInsights {
                    sampling_settings: SamplingSettings::enabled(1, Some("Request")),
                    enable_dependency_tracking: Some(false),
                    dependency_tracking_options: None,
                },
            ),
            HostProfile::Balanced => HostConfig::new(
                Some(FileLoggingMode::DebugOnly),
                &[
                    ("default", L::Warning),
                    ("Host.Results", L::Information),
                    ("Host.Aggregator", L::Trace),
                    ("Function", L::Information),
                ],
                ApplicationInsights {
                    sampling_settings: SamplingSettings::enabled(5, Some("Request;Exception")),
                    enable_dependency_tracking: Some(true),
                    dependency_tracking_options: None,
                },
            ),
            HostProfile::Debug => HostConfig::new(
                Some(FileLoggingMode::Always),
                &[
                    ("default", L::Debug),
                    ("Host.Results", L::Information),
                    ("Host.Aggregator", L::Trace),
                    ("Function", L::Debug),
                    ("Function.YourFunctionName", L::Trace),
                    ("Function.YourFunctionName.User", L::Debug),
                ],
                ApplicationInsights {
                    sampling_settings: SamplingSettings::disabled(),
                    enable_dependency_tracking: Some(true),
                    dependency_tracking_options: Some(DependencyTrackingOptions {
                        enable_sql_command_text_instrumentation: true,
                    }),
                },
            ),
            HostProfile::Disabled => HostConfig::new(
                Some(FileLoggingMode::Always),
                &[("default", L::None)],
                ApplicationInsights {
                    sampling_settings: SamplingSettings::enabled(0, None),
                    enable_dependency_tracking: Some(false),
                    dependency_tracking_options: None,
                },
            ),
            HostProfile::PerFunction => HostConfig::new(
                None,
                &[
                    ("default", L::Warning),
                    ("Host.Results", L::Information),
                    ("Host.Aggregator", L::Trace),
                    ("Function", L::Warning),
                    ("Function.CriticalFunction", L::Information),
                    ("Function.CriticalFunction.User", L::Debug),
                    ("Function.NoisyFunction", L::Error),
                    ("Function.DebugFunction", L::Trace),
                ],
                ApplicationInsights {
                    sampling_settings: SamplingSettings::enabled(10, Some("Request;Exception")),
                    enable_dependency_tracking: None,
                    dependency_tracking_options: None,
                },
            ),
        }
    }
}

impl fmt::Display for HostProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HostProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        HostProfile::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| Error::UnknownProfile {
                name: s.to_string(),
            })
    }
}

/// Host-side level names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostLogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileLoggingMode {
    Never,
    DebugOnly,
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingSettings {
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_telemetry_items_per_second: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_types: Option<String>,
}

impl SamplingSettings {
    fn enabled(max_per_second: u32, excluded: Option<&str>) -> Self {
        Self {
            is_enabled: true,
            max_telemetry_items_per_second: Some(max_per_second),
            excluded_types: excluded.map(str::to_string),
        }
    }

    fn disabled() -> Self {
        Self {
            is_enabled: false,
            max_telemetry_items_per_second: None,
            excluded_types: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTrackingOptions {
    pub enable_sql_command_text_instrumentation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInsights {
    pub sampling_settings: SamplingSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dependency_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_tracking_options: Option<DependencyTrackingOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostLogging {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_logging_mode: Option<FileLoggingMode>,
    pub log_level: BTreeMap<String, HostLogLevel>,
    pub application_insights: ApplicationInsights,
}

/// A `host.json` document restricted to its logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub version: String,
    pub logging: HostLogging,
}

impl HostConfig {
    fn new(
        file_logging_mode: Option<FileLoggingMode>,
        levels: &[(&str, HostLogLevel)],
        application_insights: ApplicationInsights,
    ) -> Self {
        Self {
            version: "2.0".to_string(),
            logging: HostLogging {
                file_logging_mode,
                log_level: levels
                    .iter()
                    .map(|(category, level)| (category.to_string(), *level))
                    .collect(),
                application_insights,
            },
        }
    }

    /// Level configured for a host category, if any.
    pub fn level_for(&self, category: &str) -> Option<HostLogLevel> {
        self.logging.log_level.get(category).copied()
    }

    /// Flatten the logging section into app-setting overrides.
    ///
    /// Nested keys are joined with `__`, e.g.
    /// `AzureFunctionsJobHost__logging__logLevel__default = Warning`.
    pub fn app_settings(&self) -> Result<BTreeMap<String, String>> {
        let logging = serde_json::to_value(&self.logging)
            .map_err(|e| Error::Unexpected(format!("failed to serialize host config: {}", e)))?;
        let mut settings = BTreeMap::new();
        flatten(
            &format!("{}__logging", APP_SETTINGS_PREFIX),
            &logging,
            &mut settings,
        );
        Ok(settings)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&format!("{}__{}", prefix, key), child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
