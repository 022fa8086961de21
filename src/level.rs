use std::{fmt::Display, str::FromStr};

/// Severity of a single record. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// Caption used in the `level` field of JSON records.
    pub fn json_caption(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn stream(self) -> Stream {
        match self {
            Severity::Error => Stream::Stderr,
            Severity::Debug | Severity::Info | Severity::Warning => Stream::Stdout,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.caption())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

impl From<Severity> for log::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => log::Level::Error,
            Severity::Warning => log::Level::Warn,
            Severity::Info => log::Level::Info,
            Severity::Debug => log::Level::Debug,
        }
    }
}

/// Destination stream of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn name(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

impl Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum severity that gets emitted. `Off` lets nothing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Threshold {
    Debug,
    Info,
    Warning,
    Error,
    Off,
}

impl Threshold {
    /// Maps the numeric verbosity scale (0 = off ... 4 = debug).
    /// Anything outside `0..=4` yields `None`.
    pub fn from_verbosity(verbosity: i64) -> Option<Self> {
        match verbosity {
            0 => Some(Threshold::Off),
            1 => Some(Threshold::Error),
            2 => Some(Threshold::Warning),
            3 => Some(Threshold::Info),
            4 => Some(Threshold::Debug),
            _ => None,
        }
    }

    pub fn allows(self, severity: Severity) -> bool {
        let floor = match self {
            Threshold::Debug => Severity::Debug,
            Threshold::Info => Severity::Info,
            Threshold::Warning => Severity::Warning,
            Threshold::Error => Severity::Error,
            Threshold::Off => return false,
        };

        severity >= floor
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Info
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Threshold::Debug => "debug",
            Threshold::Info => "info",
            Threshold::Warning => "warning",
            Threshold::Error => "error",
            Threshold::Off => "off",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThresholdError(String);

impl Display for ParseThresholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown log level: {:?}", self.0)
    }
}

impl std::error::Error for ParseThresholdError {}

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    /// Accepts level names (case-insensitive) or the numeric scale `0..=4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(verbosity) = s.parse::<i64>() {
            return Threshold::from_verbosity(verbosity)
                .ok_or_else(|| ParseThresholdError(s.to_string()));
        }

        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Threshold::Off),
            "error" => Ok(Threshold::Error),
            "warning" | "warn" => Ok(Threshold::Warning),
            "info" => Ok(Threshold::Info),
            "debug" => Ok(Threshold::Debug),
            _ => Err(ParseThresholdError(s.to_string())),
        }
    }
}
