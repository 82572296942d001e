//! Error bodies for HTTP responses.
//!
//! Every failure is reported as `{"error": "<message>"}`. Only validation and
//! simulated failures reveal their message; everything else is reported as
//! `Internal server error` and the detail stays in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use fnlog_lib::{Error as LibError, ErrorKind, ErrorReport, Logger};

use crate::metrics::record_handler_error;

/// JSON error response with its HTTP status.
///
/// # Example
///
/// ```
/// use fnlog_service_shared::ErrorResponse;
///
/// let response = ErrorResponse::bad_request("Parameter 'count' must be an integer");
/// assert_eq!(response.status, 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code; not part of the body.
    #[serde(skip)]
    pub status: u16,

    #[serde(flatten)]
    pub body: ErrorReport,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            body: ErrorReport::new(message),
        }
    }

    /// Create a 400 Bad Request response for invalid input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a generic 500 response.
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            fnlog_lib::INTERNAL_ERROR_MESSAGE,
        )
    }

    /// The message clients see.
    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.body.error)
    }
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Convert a library error into a response, logging it first.
///
/// Simulated and unexpected failures are logged through `logger` with their
/// full detail so they reach the host's telemetry under the configured
/// identity. Validation failures are only traced.
pub fn from_lib_error(error: &LibError, logger: &Logger) -> ErrorResponse {
    let kind = error.kind();
    record_handler_error(kind);

    match kind {
        ErrorKind::Validation => {
            tracing::info!(error = %error, "rejected request");
        }
        ErrorKind::Simulated => {
            logger.exception("Request failed on purpose", error);
        }
        ErrorKind::Configuration | ErrorKind::Unexpected => {
            logger.exception("Unexpected error", error);
        }
    }

    let status = StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ErrorResponse {
        status: status.as_u16(),
        body: ErrorReport::from_error(error),
    }
}

#[cfg(test)]
mod tests {
    use fnlog_lib::test_helpers::CaptureWriter;
    use fnlog_lib::{Destination, LogFacility};

    use super::*;

    fn capture_logger() -> (Logger, CaptureWriter) {
        let capture = CaptureWriter::new();
        let facility = LogFacility::new();
        facility.add_destination(Destination::new("capture", capture.clone()));
        (facility.logger("app"), capture)
    }

    #[test]
    fn body_omits_status() {
        let json = serde_json::to_string(&ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);
    }

    #[test]
    fn simulated_error_is_400_and_logged() {
        let (logger, capture) = capture_logger();
        let response = from_lib_error(&LibError::Simulated, &logger);

        assert_eq!(response.status, 400);
        assert_eq!(
            response.message(),
            "Simulated error for testing error tracking"
        );
        assert_eq!(
            capture.lines(),
            vec![
                "Request failed on purpose",
                "Error: Simulated error for testing error tracking",
            ]
        );
    }

    #[test]
    fn unexpected_error_hides_detail() {
        let (logger, capture) = capture_logger();
        let response = from_lib_error(&LibError::Unexpected("socket closed".into()), &logger);

        assert_eq!(response.status, 500);
        assert_eq!(response.message(), "Internal server error");
        assert_eq!(capture.lines_containing("Unexpected error").len(), 1);
        assert!(capture.contents().contains("socket closed"));
    }

    #[test]
    fn validation_error_is_400_with_message() {
        let (logger, capture) = capture_logger();
        let response = from_lib_error(&LibError::not_an_integer("count", "ten"), &logger);

        assert_eq!(response.status, 400);
        assert!(response.message().contains("'count'"));
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn internal_error_constructor() {
        let response = ErrorResponse::internal_error();
        assert_eq!(response.status, 500);
        assert_eq!(response.to_string(), "500: Internal server error");
    }
}
