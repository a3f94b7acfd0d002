//! Terminal sink
//!
//! Writes each formatted line as a single `write_all` + flush so concurrent
//! producers never interleave partial lines. With colour enabled, only the
//! bracketed level tag (the first token) is wrapped in a bold ANSI colour;
//! the rest of the line is written unmodified.

use super::Sink;
use crate::core::error::Result;
use crate::core::level;
use colored::Colorize;
use std::io::{self, Write};

pub struct TerminalSink {
    writer: Box<dyn Write + Send>,
    colour: bool,
}

impl TerminalSink {
    #[must_use]
    pub fn new(colour: bool) -> Self {
        Self {
            writer: Box::new(io::stdout()),
            colour,
        }
    }

    /// Build a terminal sink over an arbitrary writer. Used by the stream
    /// tap to retarget engine output at the saved real stdout, and by tests.
    #[must_use]
    pub fn with_writer(writer: Box<dyn Write + Send>, colour: bool) -> Self {
        Self { writer, colour }
    }

    /// Swap the underlying writer, keeping the colour setting.
    pub fn set_writer(&mut self, writer: Box<dyn Write + Send>) {
        self.writer = writer;
    }
}

impl Sink for TerminalSink {
    fn write_line(&mut self, line: &str, level: u8) -> Result<()> {
        let rendered;
        let bytes = if self.colour {
            rendered = colourise(line, level);
            rendered.as_bytes()
        } else {
            line.as_bytes()
        };
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "terminal"
    }
}

/// Wrap the level tag prefix in its colour; out-of-range levels stay plain.
fn colourise(line: &str, level: u8) -> String {
    let Some(colour) = level::colour(level) else {
        return line.to_string();
    };
    match line.split_once(' ') {
        Some((tag, rest)) => format!("{} {}", tag.color(colour).bold(), rest),
        None => line.color(colour).bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Shared in-memory writer for capturing sink output.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plain_write_without_colour() {
        let buf = SharedBuf::default();
        let mut sink = TerminalSink::with_writer(Box::new(buf.clone()), false);
        sink.write_line("[THREE] [T1] hello\n", 3).unwrap();
        assert_eq!(buf.contents(), "[THREE] [T1] hello\n");
    }

    #[test]
    fn test_colour_wraps_only_the_tag() {
        colored::control::set_override(true);
        let buf = SharedBuf::default();
        let mut sink = TerminalSink::with_writer(Box::new(buf.clone()), true);
        sink.write_line("[THREE] [T1] hello\n", 3).unwrap();
        let out = buf.contents();
        colored::control::unset_override();

        assert!(out.starts_with("\u{1b}["), "tag must open an escape");
        assert!(out.ends_with("[T1] hello\n"), "rest of line stays unmodified");
        let reset_end = out.find("\u{1b}[0m").expect("tag must be reset") + 4;
        assert_eq!(&out[reset_end..], " [T1] hello\n");
    }

    #[test]
    fn test_out_of_range_level_stays_plain() {
        colored::control::set_override(true);
        let buf = SharedBuf::default();
        let mut sink = TerminalSink::with_writer(Box::new(buf.clone()), true);
        sink.write_line("[LOG] [T1] hello\n", 7).unwrap();
        let out = buf.contents();
        colored::control::unset_override();
        assert_eq!(out, "[LOG] [T1] hello\n");
    }

    #[test]
    fn test_set_writer_redirects_output() {
        let first = SharedBuf::default();
        let second = SharedBuf::default();
        let mut sink = TerminalSink::with_writer(Box::new(first.clone()), false);
        sink.write_line("one\n", 1).unwrap();
        sink.set_writer(Box::new(second.clone()));
        sink.write_line("two\n", 1).unwrap();
        assert_eq!(first.contents(), "one\n");
        assert_eq!(second.contents(), "two\n");
    }
}
