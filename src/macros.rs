/// Logs a debug record: `debug!(logger, "x={}", x)`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::core::format_args!($($arg)+))
    };
}

/// Logs an info record: `info!(logger, "x={}", x)`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::core::format_args!($($arg)+))
    };
}

/// Logs a warning record: `warning!(logger, "x={}", x)`.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(::core::format_args!($($arg)+))
    };
}

/// Logs an error record.
///
/// - `error!(logger, error = err)` uses the error's `Display` text. Any
///   further arguments are ignored.
/// - `error!(logger, value = v)` uses the value's `Display` text.
/// - `error!(logger, "x={}", x)` formats like the other levels.
#[macro_export]
macro_rules! error {
    ($logger:expr, error = $err:expr $(, $extra:expr)* $(,)?) => {
        $logger.error($crate::Payload::Error(&$err))
    };
    ($logger:expr, value = $value:expr $(, $extra:expr)* $(,)?) => {
        $logger.error($crate::Payload::Value(&$value))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.error($crate::Payload::Template(::core::format_args!($($arg)+)))
    };
}
