//! Stream tap
//!
//! Captures writes made directly to the process's stdout/stderr file
//! descriptors by code that does not go through the logging API, and folds
//! them into the sink pipeline tagged `[EXTERNAL]`. The tap observes, it
//! does not suppress: captured bytes are always forwarded to the real
//! underlying stream unmodified.
//!
//! Recursion into the engine's own output is prevented two ways:
//! - [`SinkDispatcher::emit`] holds a thread-local internal-emit guard, which
//!   [`TapWriter`] checks before deciding to capture or merely forward;
//! - on installation the dispatcher's terminal sink is retargeted at the
//!   saved real stdout and engine diagnostics at the saved real stderr, so
//!   engine output physically bypasses the capture pipes regardless of
//!   which thread produces it.
//!
//! [`SinkDispatcher::emit`]: crate::sinks::SinkDispatcher::emit

pub mod writer;

pub use writer::TapWriter;

#[cfg(unix)]
mod redirect;
#[cfg(unix)]
pub use redirect::StreamTap;

use std::cell::Cell;

thread_local! {
    static INTERNAL_EMIT: Cell<bool> = const { Cell::new(false) };
}

/// True while the calling thread is inside an internal emit.
#[must_use]
pub(crate) fn internal_emit_active() -> bool {
    INTERNAL_EMIT.with(Cell::get)
}

/// RAII flag marking the calling thread as "inside the engine" for the
/// guard's lifetime. Nests safely.
pub(crate) struct InternalEmitGuard {
    prev: bool,
}

impl InternalEmitGuard {
    pub(crate) fn new() -> Self {
        let prev = INTERNAL_EMIT.with(|flag| flag.replace(true));
        Self { prev }
    }
}

impl Drop for InternalEmitGuard {
    fn drop(&mut self) {
        let prev = self.prev;
        INTERNAL_EMIT.with(|flag| flag.set(prev));
    }
}

/// Stub for platforms without fd redirection; installation fails non-fatally
/// and logging continues without external-write capture.
#[cfg(not(unix))]
pub struct StreamTap {
    _private: (),
}

#[cfg(not(unix))]
impl StreamTap {
    pub(crate) fn install(
        _dispatcher: std::sync::Arc<crate::sinks::SinkDispatcher>,
        _config: std::sync::Arc<crate::core::config::LoggerConfig>,
    ) -> crate::core::error::Result<Self> {
        Err(crate::core::error::LoggerError::TapUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_sets_and_restores_flag() {
        assert!(!internal_emit_active());
        {
            let _guard = InternalEmitGuard::new();
            assert!(internal_emit_active());
        }
        assert!(!internal_emit_active());
    }

    #[test]
    fn test_guard_nests() {
        let _outer = InternalEmitGuard::new();
        {
            let _inner = InternalEmitGuard::new();
            assert!(internal_emit_active());
        }
        assert!(internal_emit_active(), "inner drop must not clear outer");
    }

    #[test]
    fn test_flag_is_thread_local() {
        let _guard = InternalEmitGuard::new();
        let handle = std::thread::spawn(|| internal_emit_active());
        assert!(!handle.join().unwrap());
    }
}
