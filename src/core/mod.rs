//! Core engine types

pub mod config;
pub(crate) mod diag;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod pipeline;
pub mod record;
pub mod thread_identity;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use logger::Logger;
pub use record::{FormattedLine, LogRecord, SourceLocation};
pub use thread_identity::set_thread_name;
