//! Leveled logging to stdout/stderr.
//!
//! A [`Logger`] filters records by [`Threshold`], renders them as text
//! (`[<time>][<LEVEL>]: <message>`) or single-line JSON and writes them to
//! stdout, except error records which go to stderr. Logging never returns an
//! error to the caller and never panics.
//!
//! ```no_run
//! use lvlog::{Builder, OutputFormat, Threshold};
//!
//! let log = Builder::new().with_threshold(Threshold::Debug).build();
//! lvlog::info!(log, "count={}", 5);
//!
//! log.set_output_format(OutputFormat::Json);
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//! lvlog::error!(log, error = err);
//! ```

mod config;
mod formatters;
mod level;
mod logger;
mod macros;
mod sinks;

pub use config::{Config, OutputFormat, DEFAULT_TIME_FORMAT};
pub use formatters::{JsonFormatter, TextFormatter};
pub use level::{ParseThresholdError, Severity, Stream, Threshold};
pub use logger::{Builder, Logger, Payload};
pub use sinks::{MemorySink, NullSink, StdioSink};

/// One rendered-once record. Nothing keeps it after the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub timestamp: String,
    pub message: String,
}

pub trait LogFormatter: Sync + Send {
    /// Returns the full line including the trailing newline.
    fn format(&self, record: &Record) -> String;
}

pub trait LogSink: Sync + Send {
    /// Writes one complete line. Implementations must not interleave lines
    /// written from different threads.
    fn write_line(&self, stream: Stream, line: &str) -> eyre::Result<()>;
    fn flush(&self);
}
