//! Periodic wellness nudge timers.
//!
//! Each nudge (eye care, hydration, stretch) is an independent counter
//! advanced once per tick. When an enabled counter reaches its interval
//! it yields its message and resets to zero. Nudges share no state with
//! each other or with the focus timer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeKind {
    Eye,
    Hydration,
    Stretch,
}

impl NudgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeKind::Eye => "eye",
            NudgeKind::Hydration => "hydration",
            NudgeKind::Stretch => "stretch",
        }
    }
}

/// Counter for a single nudge kind.
#[derive(Debug, Clone)]
pub struct NudgeTimer {
    kind: NudgeKind,
    enabled: bool,
    interval_secs: u64,
    message: String,
    elapsed_secs: u64,
}

impl NudgeTimer {
    pub fn new(kind: NudgeKind, enabled: bool, interval_secs: u64, message: impl Into<String>) -> Self {
        Self {
            kind,
            enabled,
            interval_secs,
            message: message.into(),
            elapsed_secs: 0,
        }
    }

    pub fn kind(&self) -> NudgeKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Advance the counter by one second.
    ///
    /// Returns the nudge message when the interval elapses; the counter
    /// resets to zero at that point. Disabled timers never accumulate.
    /// An interval of zero never fires.
    pub fn advance(&mut self) -> Option<&str> {
        if !self.enabled || self.interval_secs == 0 {
            return None;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.interval_secs {
            self.elapsed_secs = 0;
            Some(&self.message)
        } else {
            None
        }
    }
}
