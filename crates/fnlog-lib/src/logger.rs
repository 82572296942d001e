use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::facility::LogFacility;
use crate::level::Level;
use crate::record::LogRecord;

/// A named handle for emitting records into a [`LogFacility`].
///
/// Cloning is cheap; clones share the name and the facility.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    facility: LogFacility,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>, facility: LogFacility) -> Self {
        Self {
            name: Arc::from(name.into()),
            facility,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn facility(&self) -> &LogFacility {
        &self.facility
    }

    /// The level that currently applies to this logger.
    pub fn level(&self) -> Level {
        self.facility.effective_level(&self.name)
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.facility.is_enabled(&self.name, level)
    }

    /// Emit a record; returns whether it passed the level check.
    ///
    /// The message is only rendered when the level is enabled.
    pub fn log(&self, level: Level, message: impl fmt::Display) -> bool {
        if !self.is_enabled_for(level) {
            return false;
        }
        let record = LogRecord::new(level, self.name.as_ref(), message.to_string());
        self.facility.emit(&record);
        true
    }

    pub fn trace(&self, message: impl fmt::Display) -> bool {
        self.log(Level::Trace, message)
    }

    pub fn debug(&self, message: impl fmt::Display) -> bool {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: impl fmt::Display) -> bool {
        self.log(Level::Info, message)
    }

    pub fn warning(&self, message: impl fmt::Display) -> bool {
        self.log(Level::Warning, message)
    }

    pub fn error(&self, message: impl fmt::Display) -> bool {
        self.log(Level::Error, message)
    }

    pub fn critical(&self, message: impl fmt::Display) -> bool {
        self.log(Level::Critical, message)
    }

    /// Log at error level with the full source chain of `error` appended.
    pub fn exception(&self, message: impl fmt::Display, error: &(dyn StdError + 'static)) -> bool {
        let mut text = format!("{}\nError: {}", message, error);
        let mut source = error.source();
        while let Some(cause) = source {
            text.push_str(&format!("\nCaused by: {}", cause));
            source = cause.source();
        }
        self.log(Level::Error, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::Destination;
    use crate::test_helpers::CaptureWriter;

    #[test]
    fn log_reports_whether_record_was_enabled() {
        let capture = CaptureWriter::new();
        let facility = LogFacility::with_root_level(Level::Info);
        facility.add_destination(Destination::new("capture", capture.clone()));
        let logger = facility.logger("app");

        assert!(!logger.debug("hidden"));
        assert!(logger.info("shown"));
        assert_eq!(capture.lines(), vec!["shown".to_string()]);
    }

    #[test]
    fn exception_includes_source_chain() {
        let capture = CaptureWriter::new();
        let facility = LogFacility::new();
        facility.add_destination(Destination::new("capture", capture.clone()));
        let logger = facility.logger("app");

        let err = crate::Error::DestinationUnavailable {
            destination: "file:/x".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        logger.exception("setup failed", &err);

        let output = capture.contents();
        assert!(output.contains("setup failed"));
        assert!(output.contains("Error: failed to create log destination file:/x"));
        assert!(output.contains("Caused by: denied"));
    }
}
