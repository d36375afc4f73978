//! Daily hydration goal model.
//!
//! The goal is derived from a small profile (sex, weight, climate,
//! activity) using IOM baseline intakes with climate and activity
//! multipliers, clamped to a safe range. [`compute_goal`] is pure; the
//! session-scoped intake counter lives in [`tracker::HydrationTracker`].

use serde::{Deserialize, Serialize};

mod tracker;

pub use tracker::{HydrationSnapshot, HydrationTracker, ProfileUpdate};

/// One glass of water, in millilitres.
pub const GLASS_ML: u32 = 250;

/// IOM baseline daily intakes used when no weight is known.
const MALE_BASE_ML: f64 = 3700.0;
const FEMALE_BASE_ML: f64 = 2700.0;

/// Safe clamp range for computed goals.
const GOAL_MIN_ML: f64 = 1200.0;
const GOAL_MAX_ML: f64 = 6000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    #[default]
    Female,
}

impl Sex {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Cool,
    #[default]
    Temperate,
    Hot,
}

impl Climate {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cool" => Some(Climate::Cool),
            "temperate" => Some(Climate::Temperate),
            "hot" => Some(Climate::Hot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Climate::Cool => "cool",
            Climate::Temperate => "temperate",
            Climate::Hot => "hot",
        }
    }

    /// Classify an ambient temperature in degrees Celsius.
    pub fn from_temperature(celsius: f64) -> Self {
        if celsius <= 10.0 {
            Climate::Cool
        } else if celsius >= 25.0 {
            Climate::Hot
        } else {
            Climate::Temperate
        }
    }

    fn factor(&self) -> f64 {
        match self {
            Climate::Cool => 0.90,
            Climate::Temperate => 1.00,
            Climate::Hot => 1.20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Activity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Activity::Low),
            "moderate" => Some(Activity::Moderate),
            "high" => Some(Activity::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Low => "low",
            Activity::Moderate => "moderate",
            Activity::High => "high",
        }
    }

    fn factor(&self) -> f64 {
        match self {
            Activity::Low => 0.95,
            Activity::Moderate => 1.00,
            Activity::High => 1.15,
        }
    }
}

/// Inputs to the goal computation. A non-positive weight counts as
/// unknown and falls back to the per-sex baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HydrationProfile {
    pub sex: Sex,
    pub weight_kg: Option<f64>,
    pub climate: Climate,
    pub activity: Activity,
}

/// Daily hydration goal in millilitres.
///
/// Weight-based (35 ml/kg) when a weight is known, otherwise the IOM
/// baseline for the profile's sex, scaled by climate and activity and
/// clamped to 1.2–6.0 litres.
pub fn compute_goal(profile: &HydrationProfile) -> u32 {
    let base = match profile.weight_kg {
        Some(weight) if weight > 0.0 => weight * 35.0,
        _ => match profile.sex {
            Sex::Male => MALE_BASE_ML,
            Sex::Female => FEMALE_BASE_ML,
        },
    };
    let goal = base * profile.climate.factor() * profile.activity.factor();
    goal.round().clamp(GOAL_MIN_ML, GOAL_MAX_ML) as u32
}
