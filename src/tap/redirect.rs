//! Unix fd redirection for the stream tap
//!
//! For each tapped stream the original fd is saved with `dup`, a pipe's
//! write end is `dup2`ed over it, and a drain thread reads the pipe into a
//! [`TapWriter`] that forwards to the saved fd. Dropping the tap restores
//! the saved fd, which closes the last write end of the pipe; the drain
//! thread sees EOF, flushes its buffer and exits.

use super::writer::TapWriter;
use crate::core::config::LoggerConfig;
use crate::core::diag;
use crate::core::error::{LoggerError, Result};
use crate::sinks::SinkDispatcher;
use std::fs::File;
use std::io::Read;
use std::os::fd::{FromRawFd, RawFd};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub struct StreamTap {
    streams: Vec<TappedStream>,
}

impl StreamTap {
    /// Redirect stdout and stderr into capture pipes and retarget the
    /// dispatcher's terminal output at the saved real stdout. Captured lines
    /// are emitted at the highest configured severity.
    pub(crate) fn install(
        dispatcher: Arc<SinkDispatcher>,
        config: Arc<LoggerConfig>,
    ) -> Result<Self> {
        let mut streams = Vec::with_capacity(2);
        for (fd, label) in [
            (libc::STDOUT_FILENO, "stdout"),
            (libc::STDERR_FILENO, "stderr"),
        ] {
            streams.push(TappedStream::install(
                fd,
                label,
                Arc::clone(&dispatcher),
                config.max_level,
            )?);
        }

        // Engine output must bypass the capture pipes, otherwise every
        // emitted line would come back as [EXTERNAL]. That holds for the
        // terminal sink (stdout) and for sink-failure diagnostics (stderr);
        // the latter would otherwise feed back through the tap forever once
        // a sink degrades for good.
        let forward_fd = dup_fd(streams[0].saved_fd)?;
        dispatcher.redirect_terminal(Box::new(unsafe { File::from_raw_fd(forward_fd) }));
        let diag_fd = dup_fd(streams[1].saved_fd)?;
        diag::redirect(Box::new(unsafe { File::from_raw_fd(diag_fd) }));

        Ok(Self { streams })
    }

    /// Restore the original fds and join the drain threads.
    pub fn restore(self) {
        drop(self);
    }
}

impl Drop for StreamTap {
    fn drop(&mut self) {
        // Clear first: the drain threads may still report through the saved
        // real stderr while they finish; only then hand diagnostics back to
        // the (now restored) process stderr.
        self.streams.clear();
        diag::restore();
    }
}

struct TappedStream {
    fd: RawFd,
    saved_fd: RawFd,
    drain: Option<JoinHandle<()>>,
}

impl TappedStream {
    fn install(
        fd: RawFd,
        label: &str,
        dispatcher: Arc<SinkDispatcher>,
        level: u8,
    ) -> Result<Self> {
        let mut pipe_fds = [0 as libc::c_int; 2];
        if unsafe { libc::pipe(pipe_fds.as_mut_ptr()) } < 0 {
            return Err(install_error("pipe"));
        }
        let (read_fd, write_fd) = (pipe_fds[0], pipe_fds[1]);

        let saved_fd = unsafe { libc::dup(fd) };
        if saved_fd < 0 {
            close_fds(&[read_fd, write_fd]);
            return Err(install_error("dup"));
        }

        if unsafe { libc::dup2(write_fd, fd) } < 0 {
            close_fds(&[read_fd, write_fd, saved_fd]);
            return Err(install_error("dup2"));
        }
        // The tapped fd itself is now the only write end we leave open.
        close_fds(&[write_fd]);

        let forward_fd = match dup_fd(saved_fd) {
            Ok(forward_fd) => forward_fd,
            Err(err) => {
                unsafe { libc::dup2(saved_fd, fd) };
                close_fds(&[read_fd, saved_fd]);
                return Err(err);
            }
        };

        let mut reader = unsafe { File::from_raw_fd(read_fd) };
        let forward = unsafe { File::from_raw_fd(forward_fd) };
        let spawned = thread::Builder::new()
            .name(format!("logentia-tap-{label}"))
            .spawn(move || {
                let mut tap = TapWriter::new(forward, dispatcher, level);
                let mut chunk = [0u8; 4096];
                loop {
                    match reader.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            use std::io::Write;
                            if tap.write_all(&chunk[..n]).is_err() {
                                break;
                            }
                        }
                    }
                }
            });

        match spawned {
            Ok(handle) => Ok(Self {
                fd,
                saved_fd,
                drain: Some(handle),
            }),
            Err(err) => {
                unsafe { libc::dup2(saved_fd, fd) };
                close_fds(&[saved_fd]);
                Err(LoggerError::tap_install(format!(
                    "failed to spawn drain thread: {err}"
                )))
            }
        }
    }
}

impl Drop for TappedStream {
    fn drop(&mut self) {
        // Restoring the saved fd closes the pipe's last write end, so the
        // drain thread sees EOF after consuming what is already buffered.
        unsafe { libc::dup2(self.saved_fd, self.fd) };
        if let Some(handle) = self.drain.take() {
            let _ = handle.join();
        }
        close_fds(&[self.saved_fd]);
    }
}

fn dup_fd(fd: RawFd) -> Result<RawFd> {
    let duped = unsafe { libc::dup(fd) };
    if duped < 0 {
        return Err(install_error("dup"));
    }
    Ok(duped)
}

fn close_fds(fds: &[RawFd]) {
    for &fd in fds {
        unsafe { libc::close(fd) };
    }
}

fn install_error(call: &str) -> LoggerError {
    LoggerError::tap_install(format!(
        "{call}() failed: {}",
        std::io::Error::last_os_error()
    ))
}
