use clap::{Parser, ValueEnum};
use lvlog::{Builder, OutputFormat, Severity, Threshold};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SeverityArg {
    Debug,
    Info,
    #[value(alias = "warn")]
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(severity: SeverityArg) -> Self {
        match severity {
            SeverityArg::Debug => Severity::Debug,
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Write one leveled log line to stdout or stderr.", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        short = 'l',
        help = "Minimum level to emit: off, error, warning, info, debug or 0-4. Defaults to LVLOG_LEVEL, then info."
    )]
    pub level: Option<Threshold>,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        help = "Verbosity count, -v for errors only up to -vvvv for debug. Overrides --level."
    )]
    pub verbose: u8,

    #[arg(long, short, value_enum, help = "Output format. Defaults to LVLOG_FORMAT, then text.")]
    pub format: Option<FormatArg>,

    #[arg(long, help = "strftime pattern for the timestamp.")]
    pub time_format: Option<String>,

    #[arg(long, help = "Colorize the level caption in text output.")]
    pub ansi: bool,

    #[arg(index = 1, value_enum)]
    pub severity: SeverityArg,

    #[arg(index = 2, required = true, num_args = 1.., value_name = "MESSAGE")]
    pub message: Vec<String>,
}

impl Cli {
    fn builder(&self) -> Builder {
        let mut builder = Builder::from_env();

        if let Some(level) = self.level {
            builder = builder.with_threshold(level);
        }

        if let Some(format) = self.format {
            builder = builder.with_output_format(format.into());
        }

        if let Some(pattern) = &self.time_format {
            builder = builder.with_time_format(pattern.clone());
        }

        if self.ansi {
            builder = builder.with_ansi(true);
        }

        builder
    }

    pub fn run(self) -> eyre::Result<()> {
        let logger = self.builder().build().init()?;

        // NOTE: counts past -vvvv saturate at debug.
        if self.verbose > 0 {
            logger.set_verbosity(i64::from(self.verbose.min(4)));
        }

        let severity: Severity = self.severity.into();
        let level: log::Level = severity.into();
        let message = self.message.join(" ");
        log::log!(level, "{}", message);
        log::logger().flush();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_invocation() {
        let cli = Cli::try_parse_from([
            "lvlog", "-vvv", "--format", "json", "--time-format", "%s", "warn", "disk", "full",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 3);
        assert!(matches!(cli.format, Some(FormatArg::Json)));
        assert!(matches!(cli.severity, SeverityArg::Warning));
        assert_eq!(cli.message, vec!["disk", "full"]);
    }

    #[test]
    fn parses_level_names_and_numbers() {
        let cli = Cli::try_parse_from(["lvlog", "--level", "2", "info", "x"]).unwrap();
        assert_eq!(cli.level, Some(Threshold::Warning));

        let cli = Cli::try_parse_from(["lvlog", "-l", "OFF", "info", "x"]).unwrap();
        assert_eq!(cli.level, Some(Threshold::Off));

        assert!(Cli::try_parse_from(["lvlog", "--level", "9", "info", "x"]).is_err());
    }

    #[test]
    fn message_is_required() {
        assert!(Cli::try_parse_from(["lvlog", "info"]).is_err());
    }
}
