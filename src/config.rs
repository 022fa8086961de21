use std::str::FromStr;

use crate::level::Threshold;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub const ENV_LEVEL: &str = "LVLOG_LEVEL";
pub const ENV_FORMAT: &str = "LVLOG_FORMAT";
pub const ENV_TIME_FORMAT: &str = "LVLOG_TIME_FORMAT";
pub const ENV_ANSI: &str = "LVLOG_ANSI";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(eyre::eyre!("unknown output format: {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub threshold: Threshold,
    pub time_format: String,
    pub output_format: OutputFormat,
    pub use_ansi: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            threshold: Threshold::Info,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            output_format: OutputFormat::Text,
            use_ansi: false,
        }
    }

    /// Defaults overridden by `LVLOG_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    // NOTE: values that don't parse are skipped, the current value stays.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(threshold) = lookup(ENV_LEVEL).and_then(|v| v.parse().ok()) {
            self.threshold = threshold;
        }

        if let Some(format) = lookup(ENV_FORMAT).and_then(|v| v.parse().ok()) {
            self.output_format = format;
        }

        if let Some(pattern) = lookup(ENV_TIME_FORMAT) {
            self.time_format = pattern;
        }

        if let Some(ansi) = lookup(ENV_ANSI) {
            self.use_ansi = ansi == "1" || ansi.eq_ignore_ascii_case("true");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
