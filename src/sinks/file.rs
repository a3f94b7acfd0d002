//! File sink
//!
//! One log file per process run, created lazily on first write at
//! `<file_path>/<project_name>/<start-UTC-stamp>.<project_name>.log` in
//! truncate mode. Initialization failure disables the sink for the rest of
//! the process (fail-open: the remaining sinks keep working) after a single
//! stderr diagnostic. Successful writes append and flush immediately;
//! durability wins over batching on this low-throughput path.

use super::Sink;
use crate::core::config::LoggerConfig;
use crate::core::diag;
use crate::core::error::Result;
use crate::core::formatter::format_timestamp;
use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

enum FileSinkState {
    Pending,
    Ready { file: File, path: PathBuf },
    Disabled,
}

pub struct FileSink {
    state: FileSinkState,
    root: PathBuf,
    project: String,
}

impl FileSink {
    #[must_use]
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            state: FileSinkState::Pending,
            root: config.file_path.clone(),
            project: config.project_name.clone(),
        }
    }

    /// Whether the sink gave up after a failed initialization. Sticky.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, FileSinkState::Disabled)
    }

    /// Resolved path of the open log file, once initialized.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match &self.state {
            FileSinkState::Ready { path, .. } => Some(path),
            _ => None,
        }
    }

    fn ensure_open(&mut self) -> Option<&mut File> {
        if let FileSinkState::Pending = self.state {
            self.state = match self.open_log_file() {
                Ok((file, path)) => FileSinkState::Ready { file, path },
                Err(err) => {
                    diag::report(format_args!("unable to open file sink: {err}"));
                    FileSinkState::Disabled
                }
            };
        }
        match &mut self.state {
            FileSinkState::Ready { file, .. } => Some(file),
            _ => None,
        }
    }

    fn open_log_file(&self) -> std::io::Result<(File, PathBuf)> {
        let dir = self.root.join(&self.project);
        fs::create_dir_all(&dir)?;
        let stamp = format_timestamp(&Utc::now());
        let path = dir.join(format!("{stamp}.{project}.log", project = self.project));
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        Ok((file, path))
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str, _level: u8) -> Result<()> {
        if let Some(file) = self.ensure_open() {
            file.write_all(line.as_bytes())?;
            file.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let FileSinkState::Ready { file, .. } = &mut self.state {
            file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
