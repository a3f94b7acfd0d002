//! Logging macros with `format!`-style message arguments.
//!
//! # Examples
//!
//! ```
//! use logentia::{log, LoggerConfig, Logger};
//!
//! let logger = Logger::new(LoggerConfig::new().with_file(false));
//!
//! let device = "28:EC:9A";
//! log!(logger, "BLE", 2, "connected to {}", device);
//! ```

/// Log a plain message.
///
/// ```
/// # use logentia::{log, LoggerConfig, Logger};
/// # let logger = Logger::new(LoggerConfig::new().with_file(false));
/// log!(logger, "INIT", 1, "boot complete");
/// log!(logger, "SENSOR", 3, "reading: {}", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $topic:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(format!($($arg)+), $topic, $level)
    };
}

/// Log a timestamped message.
///
/// ```
/// # use logentia::{time_log, LoggerConfig, Logger};
/// # let logger = Logger::new(LoggerConfig::new().with_file(false));
/// time_log!(logger, "SENSOR", 2, "sample {} captured", 7);
/// ```
#[macro_export]
macro_rules! time_log {
    ($logger:expr, $topic:expr, $level:expr, $($arg:tt)+) => {
        $logger.time_log(format!($($arg)+), $topic, $level)
    };
}

/// Log with timestamp and call-site location, including the module path of
/// the caller (which plain `#[track_caller]` cannot recover).
///
/// ```
/// # use logentia::{detailed_log, LoggerConfig, Logger};
/// # let logger = Logger::new(LoggerConfig::new().with_file(false));
/// detailed_log!(logger, "BLE", 1, "handshake failed");
/// ```
#[macro_export]
macro_rules! detailed_log {
    ($logger:expr, $topic:expr, $level:expr, $($arg:tt)+) => {
        $logger.detailed_log(
            format!($($arg)+),
            $topic,
            $level,
            $crate::SourceLocation::new(file!(), line!(), module_path!()),
        )
    };
}

/// Log a title with an indented, `format!`-built body.
///
/// ```
/// # use logentia::{log_block, LoggerConfig, Logger};
/// # let logger = Logger::new(LoggerConfig::new().with_file(false));
/// log_block!(logger, "SENSOR", 2, "Upload complete", "chunks: {}\nbytes: {}", 12, 49152);
/// ```
#[macro_export]
macro_rules! log_block {
    ($logger:expr, $topic:expr, $level:expr, $title:expr, $($arg:tt)+) => {
        $logger.log_block($title, &format!($($arg)+), $topic, $level)
    };
}

/// Timestamped variant of [`log_block!`].
///
/// ```
/// # use logentia::{time_log_block, LoggerConfig, Logger};
/// # let logger = Logger::new(LoggerConfig::new().with_file(false));
/// time_log_block!(logger, "SENSOR", 2, "Scan results", "devices: {}", 3);
/// ```
#[macro_export]
macro_rules! time_log_block {
    ($logger:expr, $topic:expr, $level:expr, $title:expr, $($arg:tt)+) => {
        $logger.time_log_block($title, &format!($($arg)+), $topic, $level)
    };
}

/// Block variant of [`detailed_log!`]: timestamp, call-site location, and an
/// indented body.
///
/// ```
/// # use logentia::{detailed_log_block, LoggerConfig, Logger};
/// # let logger = Logger::new(LoggerConfig::new().with_file(false));
/// detailed_log_block!(logger, "BLE", 1, "Handshake failed", "peer: {}\ncode: {}", "28:EC:9A", 3);
/// ```
#[macro_export]
macro_rules! detailed_log_block {
    ($logger:expr, $topic:expr, $level:expr, $title:expr, $($arg:tt)+) => {
        $logger.detailed_log_block(
            $title,
            &format!($($arg)+),
            $topic,
            $level,
            $crate::SourceLocation::new(file!(), line!(), module_path!()),
        )
    };
}
