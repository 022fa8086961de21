use std::{
    fmt::{self, Display, Write},
    sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use eyre::Context;
use log::Log;

use super::{
    config::{Config, OutputFormat},
    formatters,
    sinks::{MemorySink, NullSink, StdioSink},
    LogSink, Record, Severity, Stream, Threshold,
};

static INSTALLED: OnceLock<Logger> = OnceLock::new();

/// Stream that receives the notice when a write fails.
const FALLBACK_STREAM: Stream = Stream::Stderr;

/// First argument of an error-level record.
pub enum Payload<'a> {
    /// Rendered with its `Display` text.
    Error(&'a (dyn std::error::Error + 'a)),
    Template(fmt::Arguments<'a>),
    Value(&'a (dyn Display + 'a)),
}

impl Display for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Error(err) => write!(f, "{}", err),
            Payload::Template(args) => f.write_fmt(*args),
            Payload::Value(value) => write!(f, "{}", value),
        }
    }
}

impl<'a> From<fmt::Arguments<'a>> for Payload<'a> {
    fn from(args: fmt::Arguments<'a>) -> Self {
        Payload::Template(args)
    }
}

pub struct Logger {
    config: RwLock<Config>,
    sink: Box<dyn LogSink>,
}

impl Logger {
    pub fn new(config: Config, sink: Box<dyn LogSink>) -> Self {
        Self {
            config: RwLock::new(config),
            sink,
        }
    }

    /// Installs this logger as the backend of the `log` facade. Only the
    /// first call per process succeeds; later loggers are dropped.
    pub fn init(self) -> eyre::Result<&'static Logger> {
        if INSTALLED.set(self).is_err() {
            return Err(eyre::eyre!("Failed registering logger: already installed"));
        }

        let logger = INSTALLED
            .get()
            .ok_or_else(|| eyre::eyre!("Failed registering logger"))?;
        log::set_logger(logger).context("Failed registering logger")?;
        // Filtering happens in the logger so later threshold changes apply.
        log::set_max_level(log::LevelFilter::Trace);

        Ok(logger)
    }

    fn config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(|p| p.into_inner())
    }

    fn config_mut(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn threshold(&self) -> Threshold {
        self.config().threshold
    }

    pub fn time_format(&self) -> String {
        self.config().time_format.clone()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.config().output_format
    }

    pub fn set_threshold(&self, threshold: Threshold) {
        self.config_mut().threshold = threshold;
    }

    /// Sets the threshold from the 0 (off) to 4 (debug) scale. Values outside
    /// that range are ignored.
    pub fn set_verbosity(&self, verbosity: i64) {
        if let Some(threshold) = Threshold::from_verbosity(verbosity) {
            self.set_threshold(threshold);
        }
    }

    pub fn set_time_format(&self, pattern: impl Into<String>) {
        self.config_mut().time_format = pattern.into();
    }

    pub fn set_output_format(&self, format: OutputFormat) {
        self.config_mut().output_format = format;
    }

    pub fn set_ansi(&self, use_ansi: bool) {
        self.config_mut().use_ansi = use_ansi;
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        self.threshold().allows(severity)
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug, &args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, &args);
    }

    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warning, &args);
    }

    pub fn error(&self, payload: Payload<'_>) {
        self.emit(Severity::Error, &payload);
    }

    /// Gates, renders and writes one record. `message` is only formatted
    /// once the threshold lets the record through.
    pub fn emit(&self, severity: Severity, message: &dyn Display) {
        // The config guard is released before `message` runs, so a Display
        // impl may log through or reconfigure this logger.
        let snapshot = {
            let config = self.config();
            if !config.threshold.allows(severity) {
                return;
            }
            Snapshot::of(&config)
        };

        // A Display impl that errors leaves a truncated body, not a panic.
        let mut body = String::new();
        let _ = write!(body, "{}", message);

        let line = snapshot.render(severity, body);
        self.write(severity.stream(), &line);
    }

    // A failed write gets exactly one notice on the fallback stream. If that
    // fails as well the record is dropped.
    fn write(&self, stream: Stream, line: &str) {
        let err = match self.sink.write_line(stream, line) {
            Ok(()) => return,
            Err(err) => err,
        };

        let snapshot = Snapshot::of(&self.config());
        let notice = snapshot.render(
            Severity::Error,
            format!("write to {} failed: {:#}", stream, err),
        );

        let _ = self.sink.write_line(FALLBACK_STREAM, &notice);
    }
}

/// Rendering settings copied out of the config lock.
struct Snapshot {
    time_format: String,
    output_format: OutputFormat,
    use_ansi: bool,
}

impl Snapshot {
    fn of(config: &Config) -> Self {
        Self {
            time_format: config.time_format.clone(),
            output_format: config.output_format,
            use_ansi: config.use_ansi,
        }
    }

    fn render(&self, severity: Severity, message: String) -> String {
        let record = Record {
            severity,
            timestamp: formatters::timestamp(&self.time_format),
            message,
        };
        formatters::render(self.output_format, self.use_ansi, &record)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        self.emit(record.level().into(), record.args());
    }

    fn flush(&self) {
        self.sink.flush()
    }
}

pub struct Builder {
    constructor: Box<dyn Fn() -> Box<dyn LogSink>>,
    config: Config,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            constructor: Box::new(|| -> Box<dyn LogSink> { Box::new(StdioSink::new()) }),
            config: Config::new(),
        }
    }

    /// Starts from `Config::from_env` instead of the defaults.
    pub fn from_env() -> Self {
        Self {
            config: Config::from_env(),
            ..Self::new()
        }
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.config.time_format = pattern.into();
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    pub fn with_ansi(mut self, use_ansi: bool) -> Self {
        self.config.use_ansi = use_ansi;
        self
    }

    pub fn with_stdio_sink(self) -> Self {
        Self {
            constructor: Box::new(|| -> Box<dyn LogSink> { Box::new(StdioSink::new()) }),
            ..self
        }
    }

    pub fn with_memory_sink(self, sink: MemorySink) -> Self {
        Self {
            constructor: Box::new(move || -> Box<dyn LogSink> { Box::new(sink.clone()) }),
            ..self
        }
    }

    pub fn with_null_sink(self) -> Self {
        Self {
            constructor: Box::new(|| -> Box<dyn LogSink> { Box::new(NullSink::new()) }),
            ..self
        }
    }

    pub fn build(&self) -> Logger {
        Logger::new(self.config.clone(), (self.constructor)())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
