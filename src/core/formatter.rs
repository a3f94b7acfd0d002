//! Deterministic record formatting
//!
//! Renders a [`LogRecord`] into a single newline-terminated line:
//!
//! ```text
//! [THREE] 2026-08-30T10:15:00Z [T1] .../core/scan.rs:42 (scan::run) <BLE> message
//! ```
//!
//! Timestamp, location and topic fragments are each optional. Output is a
//! pure function of the record and the configuration, so fixed inputs give
//! byte-identical lines.

use super::config::LoggerConfig;
use super::level;
use super::record::{FormattedLine, LogRecord, SourceLocation};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// UTC ISO-8601 at whole-second resolution.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone)]
pub struct Formatter {
    config: Arc<LoggerConfig>,
}

impl Formatter {
    #[must_use]
    pub fn new(config: Arc<LoggerConfig>) -> Self {
        Self { config }
    }

    /// Render a record. Total over well-formed inputs; opaque data (odd
    /// paths, unusual topics) is passed through untouched.
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> FormattedLine {
        let mut out = String::with_capacity(record.message.len() + 64);

        out.push_str(&level::bracketed_tag(record.level));
        out.push(' ');

        if let Some(ts) = &record.timestamp {
            out.push_str(&format_timestamp(ts));
            out.push(' ');
        }

        let _ = write!(out, "[{}] ", record.thread_label);

        if let Some(loc) = &record.location {
            out.push_str(&format_location(loc));
        }

        if self.config.topics {
            let _ = write!(out, "<{}> ", record.topic);
        }

        out.push_str(&record.message);
        if !out.ends_with('\n') {
            out.push('\n');
        }

        FormattedLine {
            text: out,
            level: record.level,
        }
    }

    /// Build the multi-line message for title+body calls: the title, then
    /// each body line indented by `indent_spaces`. The result is passed
    /// through [`format`](Self::format) as the message.
    #[must_use]
    pub fn format_block(&self, title: &str, body: &str) -> String {
        let indent = " ".repeat(self.config.indent_spaces);
        let mut out = String::with_capacity(title.len() + body.len() + 16);
        out.push_str(title);
        out.push('\n');
        for line in body.lines() {
            out.push_str(&indent);
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Format a timestamp for line output and for the log file name.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// `.../<parent-dir>/<file>:<line> (<function>) ` - only the immediate
/// containing directory is kept, not the full path.
fn format_location(loc: &SourceLocation) -> String {
    let path = Path::new(loc.file);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| loc.file.to_string());
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());

    let mut out = String::new();
    match parent {
        Some(dir) => {
            let _ = write!(out, ".../{dir}/{file_name}:{line}", line = loc.line);
        }
        None => {
            let _ = write!(out, ".../{file_name}:{line}", line = loc.line);
        }
    }
    if let Some(function) = loc.function {
        let _ = write!(out, " ({function})");
    }
    out.push(' ');
    out
}
