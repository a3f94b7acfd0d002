//! Engine configuration
//!
//! The engine never loads configuration itself; callers construct (or
//! deserialize) a [`LoggerConfig`] and hand it over at [`Logger`] creation.
//! After that it is shared read-only via `Arc` by every component.
//!
//! [`Logger`]: crate::core::logger::Logger

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Highest level the engine recognises; levels above format as `[LOG]`.
pub const MAX_KNOWN_LEVEL: u8 = 5;

/// Wildcard tokens that make a topic whitelist allow everything.
pub const TOPIC_WILDCARDS: [&str; 2] = ["*", "all"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Show the `<topic>` fragment in output and enforce the topic whitelist.
    pub topics: bool,
    /// ANSI colour on the terminal sink.
    pub colour: bool,
    /// Terminal sink on/off.
    pub terminal: bool,
    /// File sink on/off.
    pub file: bool,
    /// Route emission through the background writer instead of blocking the
    /// caller on sink I/O.
    pub async_mode: bool,
    /// Highest level accepted (1-5, higher = more verbose).
    pub max_level: u8,
    /// 0 = no automatic detail, 1 = auto timestamp, 2 = auto timestamp +
    /// call-site location.
    pub detail_level: u8,
    /// Root directory for log files.
    pub file_path: PathBuf,
    /// Subdirectory and file name component of the log file.
    pub project_name: String,
    /// Body indentation width for title+body calls.
    pub indent_spaces: usize,
    /// Topic whitelist; empty or containing a wildcard token allows all.
    pub topic_list: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            topics: true,
            colour: true,
            terminal: true,
            file: true,
            async_mode: false,
            max_level: 3,
            detail_level: 0,
            file_path: PathBuf::from("log"),
            project_name: "logentia".to_string(),
            indent_spaces: 4,
            topic_list: Vec::new(),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_topics(mut self, enabled: bool) -> Self {
        self.topics = enabled;
        self
    }

    #[must_use]
    pub fn with_colour(mut self, enabled: bool) -> Self {
        self.colour = enabled;
        self
    }

    #[must_use]
    pub fn with_terminal(mut self, enabled: bool) -> Self {
        self.terminal = enabled;
        self
    }

    #[must_use]
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.file = enabled;
        self
    }

    #[must_use]
    pub fn with_async_mode(mut self, enabled: bool) -> Self {
        self.async_mode = enabled;
        self
    }

    /// Set the highest accepted level. Values outside 1-5 are kept as given;
    /// 0 filters everything and values above 5 still pass the filter but
    /// format with the generic `[LOG]` tag.
    #[must_use]
    pub fn with_max_level(mut self, level: u8) -> Self {
        self.max_level = level;
        self
    }

    #[must_use]
    pub fn with_detail_level(mut self, level: u8) -> Self {
        self.detail_level = level;
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    #[must_use]
    pub fn with_indent_spaces(mut self, spaces: usize) -> Self {
        self.indent_spaces = spaces;
        self
    }

    #[must_use]
    pub fn with_topic_list<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topic_list = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Wrap this config in an `Arc` for sharing across the engine.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
