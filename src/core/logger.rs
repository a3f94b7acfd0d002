//! Logger front-end
//!
//! The [`Logger`] is the engine object: it owns the dispatcher, the async
//! pipeline and the optional stream tap, and exposes the public log calls.
//! Log calls never return errors; every failure downgrades a sink, not the
//! call.

use super::config::LoggerConfig;
use super::error::Result;
use super::filter;
use super::formatter::Formatter;
use super::record::{FormattedLine, LogRecord, SourceLocation};
use super::thread_identity;
use crate::core::pipeline::Pipeline;
use crate::sinks::{Sink, SinkDispatcher};
use crate::tap::StreamTap;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct Logger {
    config: Arc<LoggerConfig>,
    formatter: Formatter,
    dispatcher: Arc<SinkDispatcher>,
    pipeline: Pipeline,
    tap: Mutex<Option<StreamTap>>,
}

impl Logger {
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        let config = config.shared();
        let dispatcher = Arc::new(SinkDispatcher::new(&config));
        Self {
            formatter: Formatter::new(Arc::clone(&config)),
            pipeline: Pipeline::new(Arc::clone(&dispatcher), config.async_mode),
            dispatcher,
            config,
            tap: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Register an additional sink alongside the configured terminal/file
    /// sinks.
    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.dispatcher.add_sink(sink);
    }

    /// Plain log call. Timestamp and location are added automatically when
    /// the configured detail level asks for them.
    #[track_caller]
    pub fn log(&self, message: impl Into<String>, topic: &str, level: u8) {
        self.submit(message.into(), topic, level, false, None);
    }

    /// Timestamped log call; location is still governed by the detail level.
    #[track_caller]
    pub fn time_log(&self, message: impl Into<String>, topic: &str, level: u8) {
        self.submit(message.into(), topic, level, true, None);
    }

    /// Fully detailed log call: timestamp plus explicit call-site location.
    pub fn detailed_log(
        &self,
        message: impl Into<String>,
        topic: &str,
        level: u8,
        location: SourceLocation,
    ) {
        self.submit(message.into(), topic, level, true, Some(location));
    }

    /// Title+body variant of [`log`](Self::log): the body is indented under
    /// the title and the whole block travels as one message.
    #[track_caller]
    pub fn log_block(&self, title: &str, body: &str, topic: &str, level: u8) {
        let block = self.formatter.format_block(title, body);
        self.submit(block, topic, level, false, None);
    }

    /// Title+body variant of [`time_log`](Self::time_log).
    #[track_caller]
    pub fn time_log_block(&self, title: &str, body: &str, topic: &str, level: u8) {
        let block = self.formatter.format_block(title, body);
        self.submit(block, topic, level, true, None);
    }

    /// Title+body variant of [`detailed_log`](Self::detailed_log).
    pub fn detailed_log_block(
        &self,
        title: &str,
        body: &str,
        topic: &str,
        level: u8,
        location: SourceLocation,
    ) {
        let block = self.formatter.format_block(title, body);
        self.submit(block, topic, level, true, Some(location));
    }

    /// Explicitly start the background writer. A no-op when async mode is
    /// disabled or the writer already ran; the first log call starts it
    /// lazily anyway.
    pub fn start(&self) {
        let _ = self.pipeline.ensure_started();
    }

    /// Drain and stop the background writer, restore any installed stream
    /// tap and flush every sink. Idempotent and safe from any thread.
    pub fn shutdown(&self) {
        self.pipeline.stop();
        drop(self.tap.lock().take());
        self.dispatcher.flush();
    }

    /// Intercept writes made to the process's stdout/stderr outside the
    /// logging API and fold them into the pipeline as `[EXTERNAL]` lines.
    ///
    /// Failures are non-fatal: logging keeps working without capture, and
    /// callers are free to ignore the result. Installing twice is a no-op.
    pub fn install_tap(&self) -> Result<()> {
        let mut tap = self.tap.lock();
        if tap.is_none() {
            *tap = Some(StreamTap::install(
                Arc::clone(&self.dispatcher),
                Arc::clone(&self.config),
            )?);
        }
        Ok(())
    }

    /// Whether the background writer is currently running.
    #[must_use]
    pub fn is_async_running(&self) -> bool {
        self.pipeline.is_running()
    }

    #[track_caller]
    fn submit(
        &self,
        message: String,
        topic: &str,
        level: u8,
        want_time: bool,
        location: Option<SourceLocation>,
    ) {
        if !filter::should_emit(&self.config, level, topic) {
            return;
        }

        let want_time = want_time || self.config.detail_level >= 1;
        let location = match location {
            Some(location) => Some(location),
            None if self.config.detail_level >= 2 => Some(SourceLocation::caller()),
            None => None,
        };

        let record = LogRecord {
            message,
            topic: topic.to_string(),
            level,
            timestamp: want_time.then(Utc::now),
            location,
            thread_label: thread_identity::thread_label(),
        };
        self.dispatch(self.formatter.format(&record));
    }

    fn dispatch(&self, line: FormattedLine) {
        if self.pipeline.ensure_started() {
            if let Err(line) = self.pipeline.enqueue(line) {
                self.dispatcher.emit(&line.text, line.level);
            }
        } else {
            self.dispatcher.emit(&line.text, line.level);
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Pending output must reach the sinks before the process moves on.
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result as SinkResult;

    struct MemorySink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Sink for MemorySink {
        fn write_line(&mut self, line: &str, _level: u8) -> SinkResult<()> {
            self.lines.lock().push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> SinkResult<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "memory"
        }
    }

    fn capture_logger(config: LoggerConfig) -> (Logger, Arc<Mutex<Vec<String>>>) {
        let logger = Logger::new(config.with_terminal(false).with_file(false));
        let lines = Arc::new(Mutex::new(Vec::new()));
        logger.add_sink(Box::new(MemorySink {
            lines: Arc::clone(&lines),
        }));
        (logger, lines)
    }

    #[test]
    fn test_level_three_passes_level_five_filtered() {
        let (logger, lines) = capture_logger(LoggerConfig::new().with_max_level(3));
        logger.log("visible", "INIT", 3);
        logger.log("hidden", "INIT", 5);

        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[THREE]"));
        assert!(lines[0].contains("visible"));
    }

    #[test]
    fn test_topic_whitelist_scenario() {
        let (logger, lines) =
            capture_logger(LoggerConfig::new().with_topic_list(["BLE"]));
        logger.log("suppressed", "SENSOR", 1);
        logger.log("emitted", "BLE", 1);

        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("<BLE> emitted"));
    }

    #[test]
    fn test_block_call_produces_indented_message() {
        let (logger, lines) = capture_logger(
            LoggerConfig::new().with_topics(false).with_indent_spaces(4),
        );
        logger.log_block("Upload complete", "line1\nline2", "INIT", 1);

        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Upload complete\n    line1\n    line2\n"));
    }

    #[test]
    fn test_time_log_carries_timestamp() {
        let (logger, lines) = capture_logger(LoggerConfig::new().with_topics(false));
        logger.time_log("stamped", "INIT", 2);

        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        // [TWO] YYYY-MM-DDTHH:MM:SSZ [label] stamped
        let mut parts = lines[0].split(' ');
        assert_eq!(parts.next(), Some("[TWO]"));
        let stamp = parts.next().unwrap();
        assert!(stamp.ends_with('Z') && stamp.contains('T'));
    }

    #[test]
    fn test_detailed_log_carries_location() {
        let (logger, lines) = capture_logger(LoggerConfig::new().with_topics(false));
        logger.detailed_log(
            "located",
            "INIT",
            1,
            SourceLocation::new("src/ble/scan.rs", 42, "scan::run"),
        );

        let lines = lines.lock();
        assert!(lines[0].contains(".../ble/scan.rs:42 (scan::run) located"));
    }

    #[test]
    fn test_detail_level_one_adds_timestamp_to_plain_log() {
        let (logger, lines) = capture_logger(
            LoggerConfig::new().with_topics(false).with_detail_level(1),
        );
        logger.log("auto stamped", "INIT", 1);

        let lines = lines.lock();
        let stamp = lines[0].split(' ').nth(1).unwrap();
        assert!(stamp.ends_with('Z') && stamp.contains('T'));
    }

    #[test]
    fn test_detail_level_two_adds_location_to_plain_log() {
        let (logger, lines) = capture_logger(
            LoggerConfig::new().with_topics(false).with_detail_level(2),
        );
        logger.log("auto located", "INIT", 1);

        let lines = lines.lock();
        assert!(
            lines[0].contains(".../core/logger.rs:"),
            "expected caller location in {:?}",
            lines[0]
        );
    }

    #[test]
    fn test_async_messages_arrive_after_shutdown() {
        let (logger, lines) =
            capture_logger(LoggerConfig::new().with_async_mode(true));
        for i in 0..50 {
            logger.log(format!("message {i}"), "INIT", 1);
        }
        logger.shutdown();

        assert_eq!(lines.lock().len(), 50);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (logger, lines) =
            capture_logger(LoggerConfig::new().with_async_mode(true));
        logger.log("once", "INIT", 1);
        logger.shutdown();
        logger.shutdown();
        assert_eq!(lines.lock().len(), 1);
    }

    #[test]
    fn test_calls_after_shutdown_fall_back_to_sync() {
        let (logger, lines) =
            capture_logger(LoggerConfig::new().with_async_mode(true));
        logger.log("before", "INIT", 1);
        logger.shutdown();
        logger.log("after", "INIT", 1);
        assert_eq!(lines.lock().len(), 2);
    }

    #[test]
    fn test_explicit_start_is_lazy_equivalent() {
        let (logger, _) = capture_logger(LoggerConfig::new().with_async_mode(true));
        assert!(!logger.is_async_running());
        logger.start();
        assert!(logger.is_async_running());
        logger.shutdown();
        assert!(!logger.is_async_running());
    }
}
