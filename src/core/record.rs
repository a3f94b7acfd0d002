//! Log record and formatted line types
//!
//! A [`LogRecord`] lives for the duration of a single log call; it is built,
//! formatted and dropped. The resulting [`FormattedLine`] is what travels to
//! the sinks (directly or through the queue).

use chrono::{DateTime, Utc};

/// Call-site location attached to detailed log calls.
///
/// Built either from `#[track_caller]` (no function name available) or by the
/// [`detailed_log!`] macro, which also captures the module path.
///
/// [`detailed_log!`]: crate::detailed_log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: Option<&'static str>,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function: Some(function),
        }
    }

    /// Capture the caller's file and line. The function name is not
    /// recoverable here; use [`detailed_log!`] when it matters.
    ///
    /// [`detailed_log!`]: crate::detailed_log
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            function: None,
        }
    }
}

/// Transient record created per log call, consumed by the formatter.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub message: String,
    pub topic: String,
    pub level: u8,
    pub timestamp: Option<DateTime<Utc>>,
    pub location: Option<SourceLocation>,
    pub thread_label: String,
}

/// A single newline-terminated line plus the level that produced it (needed
/// later for colour selection at the terminal sink).
#[derive(Debug, Clone)]
pub struct FormattedLine {
    pub text: String,
    pub level: u8,
}
