//! Output sinks and the dispatcher that serializes writes to them

pub mod dispatcher;
pub mod file;
pub mod terminal;

pub use dispatcher::SinkDispatcher;
pub use file::FileSink;
pub use terminal::TerminalSink;

use crate::core::error::Result;

/// A destination for formatted lines.
///
/// Implementations receive one complete newline-terminated line per call and
/// are responsible for writing it without interleaving (the dispatcher holds
/// a per-sink lock around each call).
pub trait Sink: Send {
    fn write_line(&mut self, line: &str, level: u8) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &'static str;
}
