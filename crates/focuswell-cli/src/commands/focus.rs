//! Focus timer commands against a checkpointed engine.
//!
//! Each invocation loads the engine from the kv store, replays the
//! wall-clock seconds that passed since the checkpoint through
//! `on_tick`, applies the command, and checkpoints again. The engine
//! itself stays tick-driven; catch-up is purely host policy.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use focuswell_core::focus::{FocusEngine, FocusSnapshot, Routine};
use focuswell_core::storage::{PlannerDb, Settings};
use serde::{Deserialize, Serialize};

const ENGINE_KEY: &str = "focus_engine";

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Return to idle
    Reset,
    /// Print current engine state as JSON
    Status,
    /// Set the work/break routine
    SetRoutine {
        /// Work phase length in minutes
        #[arg(long, default_value = "25")]
        work_mins: u64,
        /// Break phase length in minutes
        #[arg(long, default_value = "5")]
        break_mins: u64,
        /// Use the short demo routine (10 s work / 5 s break)
        #[arg(long)]
        demo: bool,
    },
}

/// Engine snapshot plus the wall-clock moment it was taken.
#[derive(Serialize, Deserialize)]
struct EngineCheckpoint {
    snapshot: FocusSnapshot,
    saved_at: DateTime<Utc>,
}

fn load_engine(db: &PlannerDb) -> FocusEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(checkpoint) = serde_json::from_str::<EngineCheckpoint>(&json) {
            let mut engine = FocusEngine::from_snapshot(&checkpoint.snapshot);
            if engine.is_running() {
                let elapsed = Utc::now()
                    .signed_duration_since(checkpoint.saved_at)
                    .num_seconds()
                    .max(0) as u64;
                for _ in 0..elapsed {
                    engine.on_tick(0);
                }
            }
            return engine;
        }
    }
    FocusEngine::new(Settings::load_or_default().routine())
}

fn save_engine(db: &PlannerDb, engine: &FocusEngine) -> Result<(), Box<dyn std::error::Error>> {
    let checkpoint = EngineCheckpoint {
        snapshot: engine.snapshot(),
        saved_at: Utc::now(),
    };
    db.kv_set(ENGINE_KEY, &serde_json::to_string(&checkpoint)?)?;
    Ok(())
}

pub fn run(action: FocusAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlannerDb::open()?;
    let mut engine = load_engine(&db);

    match action {
        FocusAction::Start => engine.start(),
        FocusAction::Pause => engine.pause(),
        FocusAction::Reset => engine.reset(),
        FocusAction::Status => {}
        FocusAction::SetRoutine {
            work_mins,
            break_mins,
            demo,
        } => {
            let routine = if demo {
                Routine::demo()
            } else {
                Routine::new(work_mins * 60, break_mins * 60)?
            };
            engine.set_routine(routine);
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    save_engine(&db, &engine)?;
    Ok(())
}
