//! Focus sessions: the work/break state machine plus in-phase reminders.

mod engine;
pub mod reminders;

pub use engine::{
    FocusEngine, FocusSnapshot, Phase, Routine, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS,
    DEMO_BREAK_SECS, DEMO_WORK_SECS,
};
pub use reminders::{ReminderRule, WorkReminders, REMINDER_TOAST_MS};

/// Toast shown when a work phase opens.
pub const WORK_STARTED_MESSAGE: &str = "🧠 Work phase started";
/// Toast shown when a break phase opens.
pub const BREAK_STARTED_MESSAGE: &str = "☕ Break phase — relax!";
/// Toast duration for phase-change messages.
pub const PHASE_TOAST_MS: u64 = 2000;
