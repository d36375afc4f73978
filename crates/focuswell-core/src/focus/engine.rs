//! Focus phase state machine.
//!
//! The engine tracks the work/break cycle and does not own a clock: the
//! host registers [`FocusEngine::on_tick`] with the tick loop and the
//! engine advances one second per call.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Work <-> Break
//! ```
//!
//! Every state change emits an update callback carrying a
//! [`FocusSnapshot`]; crossing a Work/Break boundary additionally emits
//! a phase-change callback first. Callbacks receive snapshots rather
//! than a borrow of the engine, so a handler can never re-enter it.

use serde::{Deserialize, Serialize};

use crate::callback;
use crate::error::ValidationError;

/// Demo routine, short enough to watch a full cycle.
pub const DEMO_WORK_SECS: u64 = 10;
pub const DEMO_BREAK_SECS: u64 = 5;

/// Production defaults: 25 minutes work, 5 minutes break.
pub const DEFAULT_WORK_SECS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Work,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

/// Configured (work, break) duration pair in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Routine {
    /// Build a routine; both durations must be positive.
    pub fn new(work_secs: u64, break_secs: u64) -> Result<Self, ValidationError> {
        if work_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "work_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        if break_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "break_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(Self { work_secs, break_secs })
    }

    /// Short routine for demos and manual testing.
    pub fn demo() -> Self {
        Self {
            work_secs: DEMO_WORK_SECS,
            break_secs: DEMO_BREAK_SECS,
        }
    }

    /// Duration of the given phase; zero for idle.
    pub fn phase_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Idle => 0,
            Phase::Work => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }
}

impl Default for Routine {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            break_secs: DEFAULT_BREAK_SECS,
        }
    }
}

/// Point-in-time view of the engine, passed to update callbacks and
/// serialized by hosts that checkpoint the engine between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub remaining_secs: u64,
    pub routine: Routine,
}

type UpdateCallback = Box<dyn FnMut(&FocusSnapshot)>;
type PhaseChangeCallback = Box<dyn FnMut(Phase)>;

/// Work/break countdown state machine.
///
/// Invariants: `remaining_secs` never exceeds the current phase's
/// routine component, and the idle phase implies `remaining_secs == 0`
/// and `running == false`.
pub struct FocusEngine {
    phase: Phase,
    running: bool,
    remaining_secs: u64,
    routine: Routine,
    on_update: Option<UpdateCallback>,
    on_phase_change: Option<PhaseChangeCallback>,
}

impl FocusEngine {
    /// Create an idle engine with the given routine.
    pub fn new(routine: Routine) -> Self {
        Self {
            phase: Phase::Idle,
            running: false,
            remaining_secs: 0,
            routine,
            on_update: None,
            on_phase_change: None,
        }
    }

    /// Rebuild an engine from a checkpointed snapshot.
    ///
    /// Callbacks start unset. Out-of-range values are clamped back into
    /// the engine's invariants rather than trusted.
    pub fn from_snapshot(snapshot: &FocusSnapshot) -> Self {
        let mut engine = Self::new(snapshot.routine);
        match snapshot.phase {
            Phase::Idle => {}
            phase => {
                engine.phase = phase;
                engine.running = snapshot.running;
                engine.remaining_secs = snapshot.remaining_secs.min(snapshot.routine.phase_secs(phase));
            }
        }
        engine
    }

    // ── Callbacks ────────────────────────────────────────────────────

    /// Register the callback fired on every state change.
    pub fn set_on_update(&mut self, cb: impl FnMut(&FocusSnapshot) + 'static) {
        self.on_update = Some(Box::new(cb));
    }

    /// Register the callback fired when the phase flips.
    pub fn set_on_phase_change(&mut self, cb: impl FnMut(Phase) + 'static) {
        self.on_phase_change = Some(Box::new(cb));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn routine(&self) -> Routine {
        self.routine
    }

    pub fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            phase: self.phase,
            running: self.running,
            remaining_secs: self.remaining_secs,
            routine: self.routine,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Store a new routine and align the countdown with it.
    ///
    /// While idle or in a work phase this snaps to a fresh work
    /// countdown without a phase-change emission (it is a configuration
    /// action, not a phase transition). During a break only the
    /// remaining break time is reset and the phase sticks.
    pub fn set_routine(&mut self, routine: Routine) {
        self.routine = routine;
        match self.phase {
            Phase::Idle | Phase::Work => {
                self.phase = Phase::Work;
                self.remaining_secs = routine.work_secs;
            }
            Phase::Break => {
                self.remaining_secs = routine.break_secs;
            }
        }
        self.emit_update();
    }

    /// Start or resume the countdown.
    ///
    /// From idle this opens a fresh work phase (with a phase-change
    /// emission); otherwise it resumes from the stored remaining time.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Work;
            self.remaining_secs = self.routine.work_secs;
            self.emit_phase_change();
        }
        self.running = true;
        self.emit_update();
    }

    /// Pause the countdown; phase and remaining time are kept.
    pub fn pause(&mut self) {
        self.running = false;
        self.emit_update();
    }

    /// Return to idle unconditionally.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Idle;
        self.remaining_secs = 0;
        self.emit_update();
    }

    /// Advance one second; called by the tick loop.
    ///
    /// The uptime argument is unused, it exists so every tick listener
    /// shares one signature.
    pub fn on_tick(&mut self, _uptime_secs: u64) {
        if !self.running {
            return;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            self.emit_update();
            if self.remaining_secs == 0 {
                self.switch_phase();
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn switch_phase(&mut self) {
        match self.phase {
            Phase::Work => {
                self.phase = Phase::Break;
                self.remaining_secs = self.routine.break_secs;
            }
            _ => {
                self.phase = Phase::Work;
                self.remaining_secs = self.routine.work_secs;
            }
        }
        self.emit_phase_change();
        self.emit_update();
    }

    fn emit_update(&mut self) {
        let snapshot = self.snapshot();
        if let Some(cb) = self.on_update.as_mut() {
            callback::shielded("focus on_update", || cb(&snapshot));
        }
    }

    fn emit_phase_change(&mut self) {
        let phase = self.phase;
        if let Some(cb) = self.on_phase_change.as_mut() {
            callback::shielded("focus on_phase_change", || cb(phase));
        }
    }
}
