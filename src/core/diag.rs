//! Engine self-diagnostics
//!
//! When a sink degrades or the background writer misbehaves the engine
//! reports it out-of-band instead of raising; by default that goes to
//! stderr. While the stream tap is installed the process's stderr fd is a
//! capture pipe, so every diagnostic written there would come back as an
//! `[EXTERNAL]` line - with a persistently failing sink that feedback never
//! terminates. The tap therefore retargets diagnostics at the saved real
//! stderr for as long as it is installed.

use parking_lot::Mutex;
use std::fmt;
use std::io::Write;

static OVERRIDE: Mutex<Option<Box<dyn Write + Send>>> = Mutex::new(None);

/// Write one diagnostic line, prefixed `[logentia]`, to the current
/// diagnostic stream. Best effort; never raises.
pub(crate) fn report(message: fmt::Arguments) {
    let mut slot = OVERRIDE.lock();
    match slot.as_mut() {
        Some(writer) => {
            let _ = writeln!(writer, "[logentia] {message}");
            let _ = writer.flush();
        }
        None => eprintln!("[logentia] {message}"),
    }
}

/// Route diagnostics at `writer` instead of the process's stderr.
pub(crate) fn redirect(writer: Box<dyn Write + Send>) {
    *OVERRIDE.lock() = Some(writer);
}

/// Return diagnostics to the process's stderr.
pub(crate) fn restore() {
    *OVERRIDE.lock() = None;
}
