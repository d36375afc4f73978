//! Central one-second tick scheduler.
//!
//! [`TickLoop`] is the application heartbeat: the host fires `tick()`
//! once per second while the loop is running, and the loop fans the new
//! uptime out to registered listeners (focus countdown, UI refreshers)
//! after advancing its wellness nudge timers. The loop itself is
//! synchronous and thread-free; re-arming the next firing is host
//! responsibility, gated on `is_running()`.

mod nudge;

pub use nudge::{NudgeKind, NudgeTimer};

use crate::callback;
use crate::notify::SharedSink;

/// Toast duration for ambient nudges.
const NUDGE_TOAST_MS: u64 = 3000;

type TickListener = Box<dyn FnMut(u64)>;

/// Application tick scheduler.
///
/// Owns the uptime counter, the nudge timers, and an ordered registry
/// of tick listeners. Listeners are identified by a caller-chosen key;
/// registering a key twice is a no-op, which gives hosts a stable
/// handle for later removal.
pub struct TickLoop {
    running: bool,
    uptime_secs: u64,
    nudges: Vec<NudgeTimer>,
    listeners: Vec<(String, TickListener)>,
    sink: SharedSink,
}

impl TickLoop {
    pub fn new(nudges: Vec<NudgeTimer>, sink: SharedSink) -> Self {
        let enabled: Vec<&str> = nudges
            .iter()
            .filter(|n| n.is_enabled())
            .map(|n| n.kind().as_str())
            .collect();
        if enabled.is_empty() {
            log::info!("tick loop: all nudges disabled");
        } else {
            log::info!("tick loop: nudges enabled: {}", enabled.join(", "));
        }
        Self {
            running: false,
            uptime_secs: 0,
            nudges,
            listeners: Vec::new(),
            sink,
        }
    }

    /// Begin ticking (no-op if already running).
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt ticking; uptime and nudge counters are preserved.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total seconds ticked since the loop first started.
    pub fn uptime(&self) -> u64 {
        self.uptime_secs
    }

    /// Register a tick listener under `key`.
    ///
    /// Returns `false` (and keeps the existing listener) when the key is
    /// already registered. Listeners fire in registration order and
    /// receive the uptime after the increment.
    pub fn add_listener(&mut self, key: &str, cb: impl FnMut(u64) + 'static) -> bool {
        if self.listeners.iter().any(|(k, _)| k == key) {
            return false;
        }
        self.listeners.push((key.to_string(), Box::new(cb)));
        true
    }

    /// Remove the listener registered under `key`.
    ///
    /// Returns `true` if a listener was removed.
    pub fn remove_listener(&mut self, key: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(k, _)| k != key);
        self.listeners.len() != before
    }

    /// Execute one firing.
    ///
    /// No-op while stopped. Otherwise: uptime increments, every enabled
    /// nudge timer advances (firing messages into the sink), and each
    /// listener is invoked with the new uptime. A panicking listener is
    /// isolated; the remaining listeners and future ticks are
    /// unaffected.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.uptime_secs += 1;

        for timer in self.nudges.iter_mut() {
            if let Some(message) = timer.advance() {
                self.sink.borrow_mut().notify(message, NUDGE_TOAST_MS);
            }
        }

        let uptime = self.uptime_secs;
        for (key, cb) in self.listeners.iter_mut() {
            callback::shielded(key, || cb(uptime));
        }
    }
}
