use chrono::{DateTime, Utc};

use crate::level::Level;

/// A single emitted log event.
///
/// Records are built once and handed to destinations by reference; there are
/// no mutators.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: Level,
    logger_name: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(level: Level, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::at(level, logger_name, message, Utc::now())
    }

    /// Create a record with an explicit timestamp.
    pub fn at(
        level: Level,
        logger_name: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message: message.into(),
            timestamp,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
