//! Background writer pipeline
//!
//! Decouples producer threads from sink I/O with an unbounded FIFO channel
//! and a single worker thread. The worker is started lazily by the first log
//! call when async mode is enabled, runs at most once per engine, and is not
//! restartable after [`stop`](Pipeline::stop).
//!
//! Ordering: the channel is FIFO over enqueue calls, so entries from a single
//! producer are emitted in the order enqueued; there is no global ordering
//! across producers beyond that.

use crate::core::diag;
use crate::core::record::FormattedLine;
use crate::sinks::SinkDispatcher;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Idle,
    Running,
    Stopped,
}

pub struct Pipeline {
    dispatcher: Arc<SinkDispatcher>,
    enabled: bool,
    sender: RwLock<Option<Sender<FormattedLine>>>,
    inner: Mutex<PipelineInner>,
}

struct PipelineInner {
    state: WorkerState,
    receiver: Option<Receiver<FormattedLine>>,
    handle: Option<JoinHandle<()>>,
}

impl Pipeline {
    #[must_use]
    pub fn new(dispatcher: Arc<SinkDispatcher>, enabled: bool) -> Self {
        Self {
            dispatcher,
            enabled,
            sender: RwLock::new(None),
            inner: Mutex::new(PipelineInner {
                state: WorkerState::Idle,
                receiver: None,
                handle: None,
            }),
        }
    }

    /// Spawn the worker if async mode is enabled and it has not run yet.
    /// Returns whether the pipeline is accepting entries; `false` means the
    /// caller should emit synchronously instead.
    pub fn ensure_started(&self) -> bool {
        if !self.enabled {
            return false;
        }
        if self.sender.read().is_some() {
            return true;
        }

        let mut inner = self.inner.lock();
        match inner.state {
            WorkerState::Running => true,
            WorkerState::Stopped => false,
            WorkerState::Idle => {
                let (sender, receiver) = unbounded::<FormattedLine>();
                let worker_receiver = receiver.clone();
                let dispatcher = Arc::clone(&self.dispatcher);
                let spawned = thread::Builder::new()
                    .name("logentia-writer".to_string())
                    .spawn(move || {
                        // recv keeps yielding buffered entries after the
                        // sender is dropped, so the loop drains before exit.
                        while let Ok(entry) = worker_receiver.recv() {
                            dispatcher.emit(&entry.text, entry.level);
                        }
                    });

                match spawned {
                    Ok(handle) => {
                        *self.sender.write() = Some(sender);
                        inner.receiver = Some(receiver);
                        inner.handle = Some(handle);
                        inner.state = WorkerState::Running;
                        true
                    }
                    Err(err) => {
                        diag::report(format_args!("unable to start background writer: {err}"));
                        inner.state = WorkerState::Stopped;
                        false
                    }
                }
            }
        }
    }

    /// Hand a line to the worker. Never blocks beyond the channel's internal
    /// bookkeeping; on failure the line is returned so the caller can emit it
    /// synchronously.
    pub fn enqueue(&self, line: FormattedLine) -> Result<(), FormattedLine> {
        match &*self.sender.read() {
            Some(sender) => sender.send(line).map_err(|err| err.into_inner()),
            None => Err(line),
        }
    }

    /// Signal the worker to exit, join it, and emit anything still queued.
    /// Safe to call from any thread; calling it twice (or without a prior
    /// start) is a no-op.
    pub fn stop(&self) {
        // Dropping the sender disconnects the channel; the worker drains the
        // backlog and exits.
        drop(self.sender.write().take());

        let mut inner = self.inner.lock();
        if let Some(handle) = inner.handle.take() {
            if handle.join().is_err() {
                diag::report(format_args!("background writer panicked during shutdown"));
            }
        }
        // Nothing should remain after the worker's drain, but any leftover
        // entry is emitted here rather than lost.
        if let Some(receiver) = inner.receiver.take() {
            while let Ok(entry) = receiver.try_recv() {
                self.dispatcher.emit(&entry.text, entry.level);
            }
        }
        inner.state = WorkerState::Stopped;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.lock().state == WorkerState::Running
    }
}
