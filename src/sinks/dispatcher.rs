//! Sink dispatcher
//!
//! Owns the terminal and file sinks (plus any extra sinks registered by the
//! caller) and serializes writes to each behind its own lock. `emit` is the
//! single internal path every formatted line goes through, whether it arrives
//! from a synchronous log call, the background writer, or the stream tap.

use super::file::FileSink;
use super::terminal::TerminalSink;
use super::Sink;
use crate::core::config::LoggerConfig;
use crate::core::diag;
use crate::tap::InternalEmitGuard;
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::sync::Arc;

pub struct SinkDispatcher {
    terminal: Option<Mutex<TerminalSink>>,
    file: Option<Mutex<FileSink>>,
    extra: RwLock<Vec<Mutex<Box<dyn Sink>>>>,
}

impl SinkDispatcher {
    #[must_use]
    pub fn new(config: &Arc<LoggerConfig>) -> Self {
        Self {
            terminal: config
                .terminal
                .then(|| Mutex::new(TerminalSink::new(config.colour))),
            file: config.file.then(|| Mutex::new(FileSink::new(config))),
            extra: RwLock::new(Vec::new()),
        }
    }

    /// Register an additional sink. Extra sinks receive every emitted line,
    /// serialized the same way as the built-in ones.
    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.extra.write().push(Mutex::new(sink));
    }

    /// Write one line to every enabled sink. Synchronous and blocking;
    /// never raises - a failing sink gets a best-effort stderr diagnostic
    /// and the rest keep working.
    ///
    /// The internal-emit guard is held for the full duration so the stream
    /// tap forwards (rather than re-captures) anything the sinks write to
    /// the tapped streams on this thread.
    pub fn emit(&self, line: &str, level: u8) {
        let _guard = InternalEmitGuard::new();

        if let Some(terminal) = &self.terminal {
            let mut terminal = terminal.lock();
            if let Err(err) = terminal.write_line(line, level) {
                diag::report(format_args!("terminal sink failed: {err}"));
            }
        }

        if let Some(file) = &self.file {
            let mut file = file.lock();
            if let Err(err) = file.write_line(line, level) {
                diag::report(format_args!("file sink failed: {err}"));
            }
        }

        for sink in self.extra.read().iter() {
            let mut sink = sink.lock();
            if let Err(err) = sink.write_line(line, level) {
                diag::report(format_args!("sink '{}' failed: {err}", sink.name()));
            }
        }
    }

    /// Flush every sink; used on shutdown.
    pub fn flush(&self) {
        let _guard = InternalEmitGuard::new();

        if let Some(terminal) = &self.terminal {
            let _ = terminal.lock().flush();
        }
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
        for sink in self.extra.read().iter() {
            let _ = sink.lock().flush();
        }
    }

    /// Retarget the terminal sink at a different writer. The stream tap uses
    /// this to point engine output at the saved real stdout once the public
    /// stdout fd has been redirected into the capture pipe.
    pub(crate) fn redirect_terminal(&self, writer: Box<dyn Write + Send>) {
        if let Some(terminal) = &self.terminal {
            terminal.lock().set_writer(writer);
        }
    }

    /// Whether a terminal sink is configured.
    #[must_use]
    pub fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }
}
