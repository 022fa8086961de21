use std::fmt::Write;

use chrono::Local;
use serde_json::json;

use crate::{config::OutputFormat, LogFormatter, Record, Severity};

/// Renders the current local time with a strftime pattern. Patterns chrono
/// can't render come out as the literal pattern text.
pub fn timestamp(pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", Local::now().format(pattern)).is_err() {
        return pattern.to_string();
    }
    out
}

/// Renders a record with the formatter selected by `format`. `use_ansi` only
/// applies to text output.
pub fn render(format: OutputFormat, use_ansi: bool, record: &Record) -> String {
    match format {
        OutputFormat::Text => TextFormatter::new(use_ansi).format(record),
        OutputFormat::Json => JsonFormatter::new().format(record),
    }
}

/// `[<timestamp>][<CAPTION>]: <message>`
pub struct TextFormatter {
    use_ansi: bool,
}

impl TextFormatter {
    pub fn new(use_ansi: bool) -> Self {
        Self { use_ansi }
    }

    fn color(&self, record: &Record) -> &str {
        if !self.use_ansi {
            return "";
        }

        match record.severity {
            Severity::Error => "\x1b[0;31m",
            Severity::Warning => "\x1b[0;33m",
            Severity::Info => "\x1b[0;32m",
            Severity::Debug => "\x1b[0;34m",
        }
    }

    fn reset(&self) -> &str {
        if self.use_ansi {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &Record) -> String {
        format!(
            "[{}][{}{}{}]: {}\n",
            record.timestamp,
            self.color(record),
            record.severity.caption(),
            self.reset(),
            record.message,
        )
    }
}

/// One JSON object per line.
pub struct JsonFormatter {}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &Record) -> String {
        let json = json!({
            "stream": record.severity.stream().name(),
            "time": record.timestamp,
            "level": record.severity.json_caption(),
            "message": record.message,
        });

        let mut line = json.to_string();
        line.push('\n');
        line
    }
}
