//! TOML-based user settings.
//!
//! Stores the hydration profile, focus routine, wellness nudge toggles,
//! and work-phase reminder rules at `<data dir>/config.toml`. Every
//! section and field carries a serde default, so a partially written or
//! hand-edited file still loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::SettingsError;
use crate::focus::{ReminderRule, Routine, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS};
use crate::hydration::{Activity, Climate, HydrationProfile, Sex};
use crate::tick::{NudgeKind, NudgeTimer};

pub const EYE_NUDGE_MESSAGE: &str = "👀 20-20-20: look 20 ft away for 20 seconds.";
pub const HYDRATION_NUDGE_MESSAGE: &str = "💧 Hydration break — take a small sip (≈250 ml).";
pub const STRETCH_NUDGE_MESSAGE: &str = "🧘 Stand up and stretch for 30 seconds.";

pub const FOCUS_EYE_REMINDER_MESSAGE: &str = "👀 20-20-20: rest your eyes briefly.";
pub const FOCUS_HYDRATION_REMINDER_MESSAGE: &str = "💧 Mini hydration: a quick sip.";

/// Hydration profile inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Ambient temperature in °C; mapped to a climate band.
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub activity: Activity,
}

/// Focus routine durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineConfig {
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_break_secs")]
    pub break_secs: u64,
}

/// One wellness nudge timer.
///
/// A section that sets only `enabled` leaves the interval at zero,
/// which never fires; the per-kind defaults supply the usual values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub interval_secs: u64,
    #[serde(default)]
    pub message: String,
}

/// Wellness nudge timers, one per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgesConfig {
    #[serde(default = "default_eye_nudge")]
    pub eye: NudgeConfig,
    #[serde(default = "default_hydration_nudge")]
    pub hydration: NudgeConfig,
    #[serde(default = "default_stretch_nudge")]
    pub stretch: NudgeConfig,
}

/// One work-phase inline reminder rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default)]
    pub interval_secs: u64,
    #[serde(default)]
    pub message: String,
}

/// Work-phase inline reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusRemindersConfig {
    #[serde(default = "default_eye_reminder")]
    pub eye: ReminderConfig,
    #[serde(default = "default_hydration_reminder")]
    pub hydration: ReminderConfig,
}

/// User settings.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub routine: RoutineConfig,
    #[serde(default)]
    pub nudges: NudgesConfig,
    #[serde(default)]
    pub focus_reminders: FocusRemindersConfig,
}

// Default functions
fn default_work_secs() -> u64 {
    DEFAULT_WORK_SECS
}
fn default_break_secs() -> u64 {
    DEFAULT_BREAK_SECS
}
fn default_eye_nudge() -> NudgeConfig {
    NudgeConfig {
        enabled: false,
        interval_secs: 20 * 60,
        message: EYE_NUDGE_MESSAGE.into(),
    }
}
fn default_hydration_nudge() -> NudgeConfig {
    NudgeConfig {
        enabled: false,
        interval_secs: 60 * 60,
        message: HYDRATION_NUDGE_MESSAGE.into(),
    }
}
fn default_stretch_nudge() -> NudgeConfig {
    NudgeConfig {
        enabled: false,
        interval_secs: 45 * 60,
        message: STRETCH_NUDGE_MESSAGE.into(),
    }
}
fn default_eye_reminder() -> ReminderConfig {
    ReminderConfig {
        interval_secs: 20 * 60,
        message: FOCUS_EYE_REMINDER_MESSAGE.into(),
    }
}
fn default_hydration_reminder() -> ReminderConfig {
    ReminderConfig {
        interval_secs: 60 * 60,
        message: FOCUS_HYDRATION_REMINDER_MESSAGE.into(),
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            sex: Sex::Female,
            weight_kg: None,
            temperature_c: None,
            activity: Activity::Moderate,
        }
    }
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            break_secs: default_break_secs(),
        }
    }
}

impl Default for NudgesConfig {
    fn default() -> Self {
        Self {
            eye: default_eye_nudge(),
            hydration: default_hydration_nudge(),
            stretch: default_stretch_nudge(),
        }
    }
}

impl Default for FocusRemindersConfig {
    fn default() -> Self {
        Self {
            eye: default_eye_reminder(),
            hydration: default_hydration_reminder(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: ProfileConfig::default(),
            routine: RoutineConfig::default(),
            nudges: NudgesConfig::default(),
            focus_reminders: FocusRemindersConfig::default(),
        }
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), SettingsError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(SettingsError::UnknownKey(String::new()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| SettingsError::UnknownKey(key.into()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| SettingsError::UnknownKey(key.into()))?;

                let new_value = if value.eq_ignore_ascii_case("none") {
                    // The literal `none` clears an optional value.
                    serde_json::Value::Null
                } else {
                    match existing {
                        serde_json::Value::Bool(_) => {
                            serde_json::Value::Bool(value.parse::<bool>().map_err(|_| {
                                SettingsError::InvalidValue {
                                    key: key.into(),
                                    message: format!("cannot parse '{value}' as bool"),
                                }
                            })?)
                        }
                        serde_json::Value::Number(_) => Self::parse_number(key, value)?,
                        // A cleared optional carries no type; infer one.
                        serde_json::Value::Null => Self::infer_value(value),
                        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                            serde_json::from_str(value).map_err(|e| {
                                SettingsError::InvalidValue {
                                    key: key.into(),
                                    message: e.to_string(),
                                }
                            })?
                        }
                        _ => serde_json::Value::String(value.into()),
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| SettingsError::UnknownKey(key.into()))?;
        }

        Err(SettingsError::UnknownKey(key.into()))
    }

    fn parse_number(key: &str, value: &str) -> Result<serde_json::Value, SettingsError> {
        if let Ok(n) = value.parse::<u64>() {
            Ok(serde_json::Value::Number(n.into()))
        } else if let Ok(n) = value.parse::<f64>() {
            serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| SettingsError::InvalidValue {
                    key: key.into(),
                    message: format!("cannot parse '{value}' as number"),
                })
        } else {
            Err(SettingsError::InvalidValue {
                key: key.into(),
                message: format!("cannot parse '{value}' as number"),
            })
        }
    }

    fn infer_value(value: &str) -> serde_json::Value {
        if let Ok(b) = value.parse::<bool>() {
            serde_json::Value::Bool(b)
        } else if let Ok(n) = value.parse::<u64>() {
            serde_json::Value::Number(n.into())
        } else if let Some(n) = value.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            serde_json::Value::Number(n)
        } else {
            serde_json::Value::String(value.into())
        }
    }

    pub fn path() -> Result<PathBuf, SettingsError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if
    /// the default settings cannot be written to disk.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings =
                    toml::from_str(&content).map_err(|e| SettingsError::LoadFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::path()?;
        let content = self.to_toml()?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Load from disk, returning defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("falling back to default settings: {e}");
            Self::default()
        })
    }

    /// Serialize to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::SaveFailed {
            path: Self::path().unwrap_or_default(),
            message: e.to_string(),
        })
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by dot-separated key and save.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed for the field's type, or the file cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| SettingsError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| SettingsError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    /// Hydration inputs with the temperature mapped to a climate band.
    pub fn hydration_profile(&self) -> HydrationProfile {
        HydrationProfile {
            sex: self.profile.sex,
            weight_kg: self.profile.weight_kg.filter(|w| *w > 0.0),
            climate: self
                .profile
                .temperature_c
                .map(Climate::from_temperature)
                .unwrap_or_default(),
            activity: self.profile.activity,
        }
    }

    /// Whether the hydration profile has everything the goal math wants.
    pub fn is_profile_complete(&self) -> bool {
        self.profile.weight_kg.is_some_and(|w| w > 0.0) && self.profile.temperature_c.is_some()
    }

    /// The configured focus routine; invalid durations fall back to the
    /// defaults.
    pub fn routine(&self) -> Routine {
        Routine::new(self.routine.work_secs, self.routine.break_secs).unwrap_or_default()
    }

    /// Build the wellness nudge timers from configuration.
    pub fn nudge_timers(&self) -> Vec<NudgeTimer> {
        vec![
            NudgeTimer::new(
                NudgeKind::Eye,
                self.nudges.eye.enabled,
                self.nudges.eye.interval_secs,
                self.nudges.eye.message.clone(),
            ),
            NudgeTimer::new(
                NudgeKind::Hydration,
                self.nudges.hydration.enabled,
                self.nudges.hydration.interval_secs,
                self.nudges.hydration.message.clone(),
            ),
            NudgeTimer::new(
                NudgeKind::Stretch,
                self.nudges.stretch.enabled,
                self.nudges.stretch.interval_secs,
                self.nudges.stretch.message.clone(),
            ),
        ]
    }

    /// Build the work-phase reminder rules from configuration.
    pub fn reminder_rules(&self) -> Vec<ReminderRule> {
        vec![
            ReminderRule::new(
                self.focus_reminders.eye.interval_secs,
                self.focus_reminders.eye.message.clone(),
            ),
            ReminderRule::new(
                self.focus_reminders.hydration.interval_secs,
                self.focus_reminders.hydration.message.clone(),
            ),
        ]
    }
}
