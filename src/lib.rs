//! # Logentia
//!
//! An asynchronous, multi-sink logging engine.
//!
//! ## Features
//!
//! - **Level/topic filtering**: integer levels 1-5 plus a topic whitelist
//!   with wildcard support
//! - **Deterministic formatting**: single lines or indented title+body
//!   blocks, with optional UTC timestamp and call-site location
//! - **Multiple sinks**: colorized terminal, one file per run, and custom
//!   sinks, each serialized behind its own lock
//! - **Background writer**: optional queue + worker decoupling producers
//!   from sink I/O, drained completely on shutdown
//! - **Stream tap**: writes made to stdout/stderr outside the logging API
//!   are folded into the same pipeline as `[EXTERNAL]` lines
//!
//! ## Quick start
//!
//! ```
//! use logentia::{LoggerConfig, Logger};
//!
//! let logger = Logger::new(
//!     LoggerConfig::new()
//!         .with_max_level(3)
//!         .with_file(false)
//!         .with_topic_list(["BLE", "SENSOR", "INIT"]),
//! );
//!
//! logger.log("boot complete", "INIT", 1);
//! logger.time_log("scan started", "BLE", 3);
//! logger.shutdown();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;
pub mod tap;

pub mod prelude {
    pub use crate::core::{
        set_thread_name, FormattedLine, Formatter, LogRecord, Logger, LoggerConfig, LoggerError,
        Result, SourceLocation,
    };
    pub use crate::sinks::{FileSink, Sink, SinkDispatcher, TerminalSink};
    pub use crate::tap::{StreamTap, TapWriter};
}

pub use crate::core::{
    set_thread_name, FormattedLine, Formatter, LogRecord, Logger, LoggerConfig, LoggerError,
    Result, SourceLocation,
};
pub use crate::sinks::{FileSink, Sink, SinkDispatcher, TerminalSink};
pub use crate::tap::{StreamTap, TapWriter};
