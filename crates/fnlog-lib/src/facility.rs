//! The process-wide log facility.
//!
//! A [`LogFacility`] plays the role of the root logger found in most logging
//! frameworks: it owns the list of output [`Destination`]s, the root minimum
//! level, and per-logger level overrides. It is a cheap, cloneable handle
//! (`Arc` inside) that is passed to every consumer instead of being looked up
//! from ambient global state.
//!
//! Records reach the facility two ways:
//!
//! - directly, through [`Logger`](crate::Logger) handles created with
//!   [`LogFacility::logger`];
//! - from the `tracing` ecosystem, through [`FacilityLayer`]. Third-party
//!   crates log with their module path as the event target, which becomes
//!   the logger identity, so suppression rules apply to them as well.
//!
//! # Hierarchical levels
//!
//! Logger identities are hierarchical. `hyper::proto::h1` (or
//! `azure.storage.blob`) inherits the level configured for the nearest
//! ancestor, falling back to the root level when none is configured.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Error, Result};
use crate::formatter::MessageFormatter;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::LogRecord;

/// Root level used when a facility is created without one.
pub const DEFAULT_ROOT_LEVEL: Level = Level::Info;

/// The facility installed as the global `tracing` subscriber, if any.
static GLOBAL: OnceLock<LogFacility> = OnceLock::new();

/// A named output that receives rendered records.
pub struct Destination {
    name: String,
    writer: BoxMakeWriter,
    formatter: Option<Arc<MessageFormatter>>,
}

impl Destination {
    /// Wrap any `MakeWriter` as a destination with no formatter.
    ///
    /// Without a formatter only the bare message is written, which is what a
    /// host forwarder does before the identity shim is configured.
    pub fn new<M>(name: impl Into<String>, writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            writer: BoxMakeWriter::new(writer),
            formatter: None,
        }
    }

    pub fn stderr() -> Self {
        Self::new("stderr", std::io::stderr)
    }

    pub fn stdout() -> Self {
        Self::new("stdout", std::io::stdout)
    }

    /// Append to a file, creating it if needed.
    pub fn file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::DestinationUnavailable {
                destination: format!("file:{}", path.display()),
                source,
            })?;
        Ok(Self::new(format!("file:{}", path.display()), Mutex::new(file)))
    }

    /// Attach a formatter, replacing any previous one.
    pub fn with_formatter(mut self, formatter: Arc<MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formatter(&self) -> Option<&MessageFormatter> {
        self.formatter.as_deref()
    }

    pub(crate) fn set_formatter(&mut self, formatter: Arc<MessageFormatter>) {
        self.formatter = Some(formatter);
    }

    fn write(&self, record: &LogRecord) {
        let mut line = match &self.formatter {
            Some(formatter) => formatter.format(record),
            None => record.message().to_string(),
        };
        line.push('\n');
        // Emission never fails the caller; a broken pipe just loses the line.
        let _ = self.writer.make_writer().write_all(line.as_bytes());
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("name", &self.name)
            .field("template", &self.formatter().map(MessageFormatter::template))
            .finish()
    }
}

pub(crate) struct FacilityState {
    pub(crate) root_level: Level,
    pub(crate) levels: BTreeMap<String, Level>,
    pub(crate) destinations: Vec<Destination>,
}

impl FacilityState {
    fn effective_level(&self, logger: &str) -> Level {
        let mut candidate = Some(logger);
        while let Some(name) = candidate {
            if let Some(level) = self.levels.get(name) {
                return *level;
            }
            candidate = parent(name);
        }
        self.root_level
    }
}

/// Strip the last `::` or `.` separated segment of a logger identity.
fn parent(name: &str) -> Option<&str> {
    let colons = name.rfind("::");
    let dot = name.rfind('.');
    match (colons, dot) {
        (Some(c), Some(d)) => Some(&name[..c.max(d)]),
        (Some(c), None) => Some(&name[..c]),
        (None, Some(d)) => Some(&name[..d]),
        (None, None) => None,
    }
    .filter(|p| !p.is_empty())
}

/// Observable configuration of a facility, for comparison and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilitySnapshot {
    pub root_level: Level,
    pub levels: BTreeMap<String, Level>,
    /// Destination names paired with their formatter template, if any.
    pub destinations: Vec<(String, Option<String>)>,
}

/// Shared handle to the process-wide log facility.
#[derive(Clone)]
pub struct LogFacility {
    state: Arc<RwLock<FacilityState>>,
}

impl Default for LogFacility {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogFacility").field(&self.snapshot()).finish()
    }
}

impl LogFacility {
    /// Create a facility with no destinations and the default root level.
    pub fn new() -> Self {
        Self::with_root_level(DEFAULT_ROOT_LEVEL)
    }

    pub fn with_root_level(root_level: Level) -> Self {
        Self {
            state: Arc::new(RwLock::new(FacilityState {
                root_level,
                levels: BTreeMap::new(),
                destinations: Vec::new(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FacilityState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FacilityState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the facility state.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut FacilityState) -> R) -> R {
        f(&mut self.write())
    }

    /// Attach a destination, as a host does before user code runs.
    pub fn add_destination(&self, destination: Destination) {
        self.write().destinations.push(destination);
    }

    pub fn destination_count(&self) -> usize {
        self.read().destinations.len()
    }

    pub fn root_level(&self) -> Level {
        self.read().root_level
    }

    pub fn set_root_level(&self, level: Level) {
        self.write().root_level = level;
    }

    /// Set the minimum level for a logger and its descendants.
    pub fn set_level(&self, logger: &str, level: Level) {
        self.write().levels.insert(logger.to_string(), level);
    }

    /// The level explicitly configured for `logger`, ignoring inheritance.
    pub fn level_for(&self, logger: &str) -> Option<Level> {
        self.read().levels.get(logger).copied()
    }

    /// The level that applies to `logger` after inheritance.
    pub fn effective_level(&self, logger: &str) -> Level {
        self.read().effective_level(logger)
    }

    pub fn is_enabled(&self, logger: &str, level: Level) -> bool {
        level >= self.effective_level(logger)
    }

    /// Hand a record to every destination if its logger accepts the level.
    pub fn emit(&self, record: &LogRecord) {
        let state = self.read();
        if record.level() < state.effective_level(record.logger_name()) {
            return;
        }
        for destination in &state.destinations {
            destination.write(record);
        }
    }

    /// A logger bound to this facility.
    pub fn logger(&self, name: impl Into<String>) -> Logger {
        Logger::new(name, self.clone())
    }

    pub fn snapshot(&self) -> FacilitySnapshot {
        let state = self.read();
        FacilitySnapshot {
            root_level: state.root_level,
            levels: state.levels.clone(),
            destinations: state
                .destinations
                .iter()
                .map(|d| {
                    (
                        d.name.clone(),
                        d.formatter().map(|f| f.template().to_string()),
                    )
                })
                .collect(),
        }
    }

    /// A `tracing` layer that routes events into this facility.
    pub fn layer(&self) -> FacilityLayer {
        FacilityLayer {
            facility: self.clone(),
        }
    }

    /// A subscriber containing only this facility, for scoped use with
    /// `tracing::subscriber::with_default`.
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        tracing_subscriber::registry().with(self.layer())
    }

    /// The process-wide facility, created and installed on first use.
    ///
    /// The first caller wins: later calls return the same handle and ignore
    /// `root_level`.
    ///
    /// # Errors
    ///
    /// Fails when another global subscriber was installed first.
    pub fn global(root_level: Level) -> Result<LogFacility> {
        let mut created = false;
        let facility = GLOBAL.get_or_init(|| {
            created = true;
            LogFacility::with_root_level(root_level)
        });
        if created {
            facility.install()?;
        }
        Ok(facility.clone())
    }

    /// Install this facility as the global `tracing` subscriber.
    ///
    /// Records from the `log` crate are bridged as well.
    pub fn install(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.layer())
            .try_init()
            .map_err(|e| Error::SubscriberInstall {
                reason: e.to_string(),
            })
    }
}

/// `tracing` layer forwarding events into a [`LogFacility`].
///
/// The logger identity is taken from a `logger` field when present, then
/// from `log.target` for records bridged from the `log` crate, and finally
/// from the event target. An event carrying `severity = "critical"` is
/// promoted to [`Level::Critical`].
pub struct FacilityLayer {
    facility: LogFacility,
}

impl<S> Layer<S> for FacilityLayer
where
    S: Subscriber,
{
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if metadata.is_span() {
            return Interest::always();
        }
        // Levels change at runtime, so event interest cannot be cached.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        if !metadata.is_event() || metadata.target() == "log" {
            return true;
        }
        let level = Level::from_tracing(metadata.level());
        // Critical arrives as ERROR and is only known once fields are read.
        level == Level::Error || self.facility.is_enabled(metadata.target(), level)
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let mut level = Level::from_tracing(metadata.level());
        if visitor.critical {
            level = Level::Critical;
        }
        let logger = visitor
            .logger
            .take()
            .or_else(|| visitor.log_target.take())
            .unwrap_or_else(|| metadata.target().to_string());

        let record = LogRecord::new(level, logger, visitor.into_message());
        self.facility.emit(&record);
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    logger: Option<String>,
    log_target: Option<String>,
    critical: bool,
    fields: Vec<(&'static str, String)>,
}

impl RecordVisitor {
    fn into_message(self) -> String {
        let mut message = self.message;
        for (name, value) in self.fields {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(name);
            message.push('=');
            message.push_str(&value);
        }
        message
    }

    fn record_value(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "logger" => self.logger = Some(value),
            "severity" => self.critical = value.eq_ignore_ascii_case("critical"),
            "log.target" => self.log_target = Some(value),
            name if name.starts_with("log.") => {}
            name => self.fields.push((name, value)),
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{:?}", value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::CaptureWriter;

    fn facility_with_capture() -> (LogFacility, CaptureWriter) {
        let capture = CaptureWriter::new();
        let facility = LogFacility::with_root_level(Level::Info);
        facility.add_destination(Destination::new("capture", capture.clone()));
        (facility, capture)
    }

    #[test]
    fn parent_strips_last_segment() {
        assert_eq!(parent("hyper::proto::h1"), Some("hyper::proto"));
        assert_eq!(parent("azure.storage.blob"), Some("azure.storage"));
        assert_eq!(parent("hyper"), None);
        assert_eq!(parent("::x"), None);
    }

    #[test]
    fn effective_level_inherits_from_nearest_ancestor() {
        let facility = LogFacility::with_root_level(Level::Debug);
        facility.set_level("hyper", Level::Warning);
        facility.set_level("hyper::client", Level::Error);

        assert_eq!(facility.effective_level("hyper::proto::h1"), Level::Warning);
        assert_eq!(facility.effective_level("hyper::client::pool"), Level::Error);
        assert_eq!(facility.effective_level("app"), Level::Debug);
        assert_eq!(facility.level_for("hyper::proto"), None);
    }

    #[test]
    fn emit_without_formatter_writes_bare_message() {
        let (facility, capture) = facility_with_capture();
        facility.emit(&LogRecord::new(Level::Info, "app", "hello"));
        assert_eq!(capture.lines(), vec!["hello".to_string()]);
    }

    #[test]
    fn emit_drops_records_below_effective_level() {
        let (facility, capture) = facility_with_capture();
        facility.emit(&LogRecord::new(Level::Debug, "app", "too chatty"));
        facility.emit(&LogRecord::new(Level::Warning, "app", "kept"));
        assert_eq!(capture.lines(), vec!["kept".to_string()]);
    }

    #[test]
    fn emit_reaches_every_destination() {
        let (facility, first) = facility_with_capture();
        let second = CaptureWriter::new();
        facility.add_destination(
            Destination::new("second", second.clone())
                .with_formatter(Arc::new(MessageFormatter::default())),
        );

        facility.emit(&LogRecord::new(Level::Error, "app", "boom"));

        assert_eq!(first.lines(), vec!["boom".to_string()]);
        assert_eq!(second.lines(), vec!["[app] boom".to_string()]);
    }

    #[test]
    fn tracing_events_use_target_as_identity() {
        let (facility, capture) = facility_with_capture();
        facility.update(|state| {
            for d in &mut state.destinations {
                d.set_formatter(Arc::new(MessageFormatter::default()));
            }
        });
        facility.set_level("noisy", Level::Warning);

        tracing::subscriber::with_default(facility.subscriber(), || {
            tracing::info!(target: "noisy::pool", "connection reused");
            tracing::warn!(target: "noisy::pool", "connection reset");
            tracing::info!(target: "worker", jobs = 3, "batch done");
        });

        assert_eq!(
            capture.lines(),
            vec![
                "[noisy::pool] connection reset".to_string(),
                "[worker] batch done jobs=3".to_string(),
            ]
        );
    }

    #[test]
    fn spans_register_once_while_events_follow_level_changes() {
        let (facility, capture) = facility_with_capture();
        let layer = facility.layer();

        tracing::subscriber::with_default(facility.subscriber(), || {
            let span = tracing::info_span!("request", id = 7);
            let metadata = span.metadata().expect("span metadata");
            let interest = <FacilityLayer as Layer<tracing_subscriber::Registry>>::register_callsite(
                &layer, metadata,
            );
            assert!(interest.is_always());

            let _entered = span.enter();
            for level in [Level::Error, Level::Info] {
                facility.set_level("worker", level);
                tracing::info!(target: "worker", "inside span");
            }
        });

        assert_eq!(capture.lines(), vec!["inside span".to_string()]);
    }

    #[test]
    fn tracing_events_can_name_logger_and_critical_severity() {
        let (facility, capture) = facility_with_capture();
        facility.set_level("app", Level::Critical);

        tracing::subscriber::with_default(facility.subscriber(), || {
            tracing::error!(logger = "app", "plain error");
            tracing::error!(logger = "app", severity = "critical", "meltdown");
        });

        assert_eq!(capture.lines(), vec!["meltdown".to_string()]);
    }

    #[test]
    fn file_destination_reports_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("out.log");
        let err = Destination::file(&missing).unwrap_err();
        assert!(matches!(err, Error::DestinationUnavailable { .. }));
    }

    #[test]
    fn file_destination_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let facility = LogFacility::new();
        facility.add_destination(Destination::file(&path).unwrap());

        facility.emit(&LogRecord::new(Level::Info, "app", "one"));
        facility.emit(&LogRecord::new(Level::Info, "app", "two"));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
