//! Callback isolation for listener fan-out.
//!
//! Tick listeners, focus callbacks, and hydration change listeners are
//! host-supplied code. The contract for all of them is the same: a fault
//! inside one callback must not stop the tick loop or corrupt timer
//! state. Every fan-out site in this crate routes callback invocations
//! through [`shielded`], which catches a panic, logs it, and moves on.
//!
//! The caught panic is discarded on purpose. There is no retry and no
//! error value; the core keeps ticking.

use std::panic::{catch_unwind, AssertUnwindSafe};

/// Invoke `f`, swallowing any panic it raises.
///
/// `label` identifies the callback in the warning log.
pub fn shielded<F: FnOnce()>(label: &str, f: F) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        log::warn!("callback '{label}' panicked; continuing");
    }
}
