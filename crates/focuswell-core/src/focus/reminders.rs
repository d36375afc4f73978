//! Inline reminders that fire at fixed intervals inside a work phase.
//!
//! Unlike the free-running nudge timers, these are keyed to the focus
//! countdown: a rule with a 20-minute interval fires 20 minutes into
//! the work phase, regardless of how long the app has been up. Rules
//! re-arm whenever the engine leaves the Work phase, so every work
//! phase gets its own full set of reminders.

use crate::focus::{FocusSnapshot, Phase};
use crate::notify::SharedSink;

/// Toast duration for inline reminders.
pub const REMINDER_TOAST_MS: u64 = 2500;

/// One reminder: fire `message` every `interval_secs` of work time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRule {
    pub interval_secs: u64,
    pub message: String,
}

impl ReminderRule {
    pub fn new(interval_secs: u64, message: impl Into<String>) -> Self {
        Self {
            interval_secs,
            message: message.into(),
        }
    }
}

/// Watches engine snapshots and fires reminder rules into the sink.
///
/// Feed it the snapshot once per tick, after the engine has processed
/// the tick. A rule fires when the elapsed work time crosses into a new
/// positive multiple of its interval; a paused work phase holds elapsed
/// time still, so nothing fires while paused.
pub struct WorkReminders {
    rules: Vec<ReminderRule>,
    last_periods: Vec<Option<u64>>,
    sink: SharedSink,
}

impl WorkReminders {
    pub fn new(rules: Vec<ReminderRule>, sink: SharedSink) -> Self {
        let last_periods = vec![None; rules.len()];
        Self {
            rules,
            last_periods,
            sink,
        }
    }

    /// Observe the engine state for this tick.
    pub fn observe(&mut self, snapshot: &FocusSnapshot) {
        if snapshot.phase != Phase::Work {
            // Leaving (or never entering) a work phase re-arms every rule.
            for last in &mut self.last_periods {
                *last = None;
            }
            return;
        }
        if !snapshot.running {
            return;
        }

        let elapsed = snapshot
            .routine
            .work_secs
            .saturating_sub(snapshot.remaining_secs);

        for (rule, last) in self.rules.iter().zip(self.last_periods.iter_mut()) {
            if rule.interval_secs == 0 {
                continue;
            }
            let period = elapsed / rule.interval_secs;
            if period > 0 && Some(period) != *last {
                self.sink
                    .borrow_mut()
                    .notify(&rule.message, REMINDER_TOAST_MS);
                *last = Some(period);
            }
        }
    }
}
