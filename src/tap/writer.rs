//! Capturing writer adapter
//!
//! [`TapWriter`] wraps the real destination stream: bytes are buffered
//! per-stream until a line terminator, each completed non-empty line is
//! re-injected into the sink pipeline as `[EXTERNAL] <line>` at the highest
//! configured severity, and the original bytes are then forwarded unmodified.
//! Writes arriving while the internal-emit flag is set are forwarded without
//! capture.

use super::internal_emit_active;
use crate::sinks::SinkDispatcher;
use std::io::{self, Write};
use std::sync::Arc;

/// A stream that never emits a newline must not grow the buffer without
/// bound; past this size the buffered bytes are captured as a line anyway.
const MAX_BUFFERED_LINE: usize = 4096;

pub struct TapWriter<W: Write> {
    inner: W,
    dispatcher: Arc<SinkDispatcher>,
    level: u8,
    buf: Vec<u8>,
}

impl<W: Write> TapWriter<W> {
    #[must_use]
    pub fn new(inner: W, dispatcher: Arc<SinkDispatcher>, level: u8) -> Self {
        Self {
            inner,
            dispatcher,
            level,
            buf: Vec::new(),
        }
    }

    fn capture_buffered_line(&mut self) {
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        if self.buf.is_empty() {
            return;
        }
        let line = format!(
            "[EXTERNAL] {}\n",
            String::from_utf8_lossy(&self.buf)
        );
        self.buf.clear();
        self.dispatcher.emit(&line, self.level);
    }
}

impl<W: Write> Write for TapWriter<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        if !internal_emit_active() {
            for &byte in bytes {
                if byte == b'\n' {
                    self.capture_buffered_line();
                } else {
                    self.buf.push(byte);
                    if self.buf.len() >= MAX_BUFFERED_LINE {
                        self.capture_buffered_line();
                    }
                }
            }
        }
        self.inner.write_all(bytes)?;
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Drop for TapWriter<W> {
    fn drop(&mut self) {
        // A trailing unterminated line is still worth observing.
        self.capture_buffered_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LoggerConfig;
    use crate::core::error::Result;
    use crate::sinks::Sink;
    use crate::tap::InternalEmitGuard;
    use parking_lot::Mutex;

    struct MemorySink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Sink for MemorySink {
        fn write_line(&mut self, line: &str, _level: u8) -> Result<()> {
            self.lines.lock().push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "memory"
        }
    }

    fn capture_dispatcher() -> (Arc<SinkDispatcher>, Arc<Mutex<Vec<String>>>) {
        let config = LoggerConfig::new()
            .with_terminal(false)
            .with_file(false)
            .shared();
        let dispatcher = Arc::new(SinkDispatcher::new(&config));
        let lines = Arc::new(Mutex::new(Vec::new()));
        dispatcher.add_sink(Box::new(MemorySink {
            lines: Arc::clone(&lines),
        }));
        (dispatcher, lines)
    }

    #[test]
    fn test_captures_complete_lines_and_forwards_bytes() {
        let (dispatcher, lines) = capture_dispatcher();
        let mut forwarded = Vec::new();
        {
            let mut tap = TapWriter::new(&mut forwarded, dispatcher, 3);
            tap.write_all(b"hello\nwor").unwrap();
            tap.write_all(b"ld\n").unwrap();
        }
        assert_eq!(
            lines.lock().as_slice(),
            ["[EXTERNAL] hello\n", "[EXTERNAL] world\n"]
        );
        assert_eq!(forwarded, b"hello\nworld\n");
    }

    #[test]
    fn test_internal_emit_forwards_without_capture() {
        let (dispatcher, lines) = capture_dispatcher();
        let mut forwarded = Vec::new();
        {
            let mut tap = TapWriter::new(&mut forwarded, dispatcher, 3);
            let _guard = InternalEmitGuard::new();
            tap.write_all(b"engine output\n").unwrap();
        }
        assert!(lines.lock().is_empty());
        assert_eq!(forwarded, b"engine output\n");
    }

    #[test]
    fn test_empty_lines_are_not_captured() {
        let (dispatcher, lines) = capture_dispatcher();
        let mut forwarded = Vec::new();
        {
            let mut tap = TapWriter::new(&mut forwarded, dispatcher, 3);
            tap.write_all(b"\n\n").unwrap();
        }
        assert!(lines.lock().is_empty());
        assert_eq!(forwarded, b"\n\n");
    }

    #[test]
    fn test_crlf_terminator_is_trimmed() {
        let (dispatcher, lines) = capture_dispatcher();
        let mut forwarded = Vec::new();
        {
            let mut tap = TapWriter::new(&mut forwarded, dispatcher, 5);
            tap.write_all(b"windows line\r\n").unwrap();
        }
        assert_eq!(lines.lock().as_slice(), ["[EXTERNAL] windows line\n"]);
    }

    #[test]
    fn test_newline_free_stream_is_flushed_in_bounded_chunks() {
        let (dispatcher, lines) = capture_dispatcher();
        let mut forwarded = Vec::new();
        {
            let mut tap = TapWriter::new(&mut forwarded, dispatcher, 3);
            tap.write_all(&vec![b'x'; 10_000]).unwrap();
        }
        let lines = lines.lock();
        // Two full chunks plus the tail on drop.
        assert_eq!(lines.len(), 3);
        assert!(lines
            .iter()
            .all(|line| line.len() <= "[EXTERNAL] ".len() + MAX_BUFFERED_LINE + 1));
        assert_eq!(forwarded.len(), 10_000);
    }

    #[test]
    fn test_unterminated_tail_captured_on_drop() {
        let (dispatcher, lines) = capture_dispatcher();
        let mut forwarded = Vec::new();
        {
            let mut tap = TapWriter::new(&mut forwarded, dispatcher, 3);
            tap.write_all(b"no newline").unwrap();
        }
        assert_eq!(lines.lock().as_slice(), ["[EXTERNAL] no newline\n"]);
    }
}
