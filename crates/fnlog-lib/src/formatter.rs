//! Message formatter that embeds the logger identity into the rendered text.
//!
//! Managed hosts forward the rendered message but re-categorize the record
//! under their own category, so the logger name has to travel inside the
//! text itself.
//!
//! Templates use brace placeholders:
//!
//! | placeholder    | value                                   |
//! |----------------|-----------------------------------------|
//! | `{loggerName}` | identity of the emitting logger         |
//! | `{message}`    | the record message                      |
//! | `{level}`      | uppercase level label, e.g. `WARNING`   |
//! | `{timestamp}`  | RFC 3339 timestamp in UTC               |
//!
//! `{{` and `}}` render literal braces.

use chrono::SecondsFormat;

use crate::error::{Error, Result};
use crate::record::LogRecord;

/// Template used when the caller supplies none.
pub const DEFAULT_TEMPLATE: &str = "[{loggerName}] {message}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    LoggerName,
    Message,
    Level,
    Timestamp,
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFormatter {
    template: String,
    segments: Vec<Segment>,
}

impl MessageFormatter {
    /// Parse a template, rejecting unknown placeholders and unbalanced braces.
    pub fn new(template: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(invalid("unclosed placeholder"));
                    }
                    let segment = match name.as_str() {
                        "loggerName" => Segment::LoggerName,
                        "message" => Segment::Message,
                        "level" => Segment::Level,
                        "timestamp" => Segment::Timestamp,
                        other => return Err(invalid(&format!("unknown placeholder '{}'", other))),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(invalid("unmatched '}'")),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template this formatter was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a record into a single line of text.
    pub fn format(&self, record: &LogRecord) -> String {
        let mut out = String::with_capacity(record.message().len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::LoggerName => out.push_str(record.logger_name()),
                Segment::Message => out.push_str(record.message()),
                Segment::Level => out.push_str(record.level().label()),
                Segment::Timestamp => out.push_str(
                    &record
                        .timestamp()
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
            }
        }
        out
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("[".to_string()),
                Segment::LoggerName,
                Segment::Literal("] ".to_string()),
                Segment::Message,
            ],
        }
    }
}
