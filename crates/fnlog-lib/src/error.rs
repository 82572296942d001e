use thiserror::Error;

/// Convenient result alias for the fnlog library.
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by [`Error::Simulated`]; clients see it verbatim.
pub const SIMULATED_ERROR_MESSAGE: &str = "Simulated error for testing error tracking";

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A log destination could not be opened while configuring the facility.
    #[error("failed to create log destination {destination}: {source}")]
    DestinationUnavailable {
        destination: String,
        #[source]
        source: std::io::Error,
    },

    /// The message template could not be parsed.
    #[error("invalid message template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The facility could not be installed as the global subscriber.
    #[error("failed to install log facility: {reason}")]
    SubscriberInstall { reason: String },

    /// A sink string such as `file:<path>` was not understood.
    #[error("unsupported log sink {spec:?}; expected stderr, stdout or file:<path>")]
    UnsupportedSink { spec: String },

    /// A request parameter was present but could not be interpreted.
    #[error("invalid value {value:?} for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// A request body was not valid JSON.
    #[error("HTTP request does not contain valid JSON data")]
    InvalidJson(#[source] serde_json::Error),

    /// Raised on request by callers exercising error tracking.
    #[error("{}", SIMULATED_ERROR_MESSAGE)]
    Simulated,

    /// Raised when a host logging profile name is not known.
    #[error("unknown host logging profile: {name}")]
    UnknownProfile { name: String },

    /// Anything that does not fit another category.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// Error classification used at handler boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range caller input.
    Validation,
    /// The log facility could not be set up.
    Configuration,
    /// Deliberately requested failure.
    Simulated,
    /// Everything else.
    Unexpected,
}

impl ErrorKind {
    /// Label used for metrics and structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Simulated => "simulated",
            ErrorKind::Unexpected => "unexpected",
        }
    }

    /// HTTP status reported for this kind of failure.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::Simulated => 400,
            ErrorKind::Configuration | ErrorKind::Unexpected => 500,
        }
    }
}

impl Error {
    /// Classify this error for the handler boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DestinationUnavailable { .. }
            | Error::InvalidTemplate { .. }
            | Error::UnsupportedSink { .. }
            | Error::SubscriberInstall { .. } => ErrorKind::Configuration,
            Error::InvalidParameter { .. } | Error::InvalidJson(_) | Error::UnknownProfile { .. } => {
                ErrorKind::Validation
            }
            Error::Simulated => ErrorKind::Simulated,
            Error::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Build an [`Error::InvalidParameter`] for a non-integer value.
    pub fn not_an_integer(parameter: &str, value: &str) -> Self {
        Error::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: "expected an integer".to_string(),
        }
    }
}
