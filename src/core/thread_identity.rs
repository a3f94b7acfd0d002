//! Per-thread display labels
//!
//! Each thread carries either an explicitly assigned name or an auto-assigned
//! sequential id ("T1", "T2", ...). The label is cached in thread-local
//! storage so the numeric id is drawn from the shared counter at most once
//! per thread; named threads never consume an id.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_NUMERIC_ID: AtomicU32 = AtomicU32::new(1);

thread_local! {
    static LABEL: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Assign an explicit display name to the calling thread.
///
/// Lines emitted from this thread afterwards carry `[name]` instead of the
/// auto-assigned `[T<n>]`.
pub fn set_thread_name(name: impl Into<String>) {
    LABEL.with(|label| {
        *label.borrow_mut() = Some(name.into());
    });
}

/// Resolve the calling thread's label, assigning a sequential id on first use.
#[must_use]
pub fn thread_label() -> String {
    LABEL.with(|label| {
        let mut label = label.borrow_mut();
        if label.is_none() {
            let id = NEXT_NUMERIC_ID.fetch_add(1, Ordering::Relaxed);
            *label = Some(format!("T{id}"));
        }
        label.as_ref().map(String::clone).unwrap_or_default()
    })
}
