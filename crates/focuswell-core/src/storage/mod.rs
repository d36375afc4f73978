pub mod migrations;
mod planner_db;
mod settings;

pub use planner_db::PlannerDb;
pub use settings::{
    FocusRemindersConfig, NudgeConfig, NudgesConfig, ProfileConfig, ReminderConfig, RoutineConfig,
    Settings, EYE_NUDGE_MESSAGE, FOCUS_EYE_REMINDER_MESSAGE, FOCUS_HYDRATION_REMINDER_MESSAGE,
    HYDRATION_NUDGE_MESSAGE, STRETCH_NUDGE_MESSAGE,
};

use std::io;
use std::path::PathBuf;

/// Returns the data directory, creating it on demand.
///
/// `$FOCUSWELL_DATA_DIR` overrides the location outright (tests point
/// this at a scratch dir). Otherwise `~/.config/focuswell`, or
/// `~/.config/focuswell-dev` when FOCUSWELL_ENV=dev.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSWELL_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSWELL_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focuswell-dev")
            } else {
                base_dir.join("focuswell")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
