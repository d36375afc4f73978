//! # FocusWell Core Library
//!
//! Core logic for the FocusWell desktop wellness companion: a 1-second
//! tick source with wellness nudges, a work/break focus state machine
//! with inline reminders, a hydration goal model, and a task planner,
//! plus their SQLite and TOML persistence.
//!
//! The library is UI-free. Hosts (the CLI binary, or any future shell)
//! drive the tick loop, provide a [`notify::NotificationSink`] for
//! toast messages, and register listeners for state changes. All
//! listener and callback faults are isolated at the fan-out boundary,
//! so a broken presentation layer can never corrupt timer state.
//!
//! ## Key Components
//!
//! - [`TickLoop`]: 1 Hz heartbeat, nudge timers, keyed listeners
//! - [`FocusEngine`]: Idle/Work/Break countdown state machine
//! - [`WorkReminders`]: interval reminders scoped to work phases
//! - [`HydrationTracker`]: daily intake against a computed goal
//! - [`PlannerDb`]: task storage and host checkpoints
//! - [`Settings`]: TOML user settings

pub mod callback;
pub mod error;
pub mod focus;
pub mod hydration;
pub mod notify;
pub mod planner;
pub mod storage;
pub mod tick;

pub use error::{CoreError, DatabaseError, Result, SettingsError, ValidationError};
pub use focus::{FocusEngine, FocusSnapshot, Phase, Routine, WorkReminders};
pub use hydration::{compute_goal, HydrationProfile, HydrationTracker};
pub use notify::{NotificationSink, SharedSink};
pub use planner::{NewTask, Task};
pub use storage::{PlannerDb, Settings};
pub use tick::{NudgeKind, NudgeTimer, TickLoop};
