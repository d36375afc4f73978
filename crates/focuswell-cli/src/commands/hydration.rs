//! Hydration tracking commands.
//!
//! Intake is checkpointed per calendar day in the kv store; a
//! checkpoint from an earlier day is discarded, so every day starts
//! from zero.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use focuswell_core::hydration::{
    compute_goal, Activity, Climate, HydrationProfile, HydrationTracker, Sex, GLASS_ML,
};
use focuswell_core::storage::{PlannerDb, Settings};
use serde::{Deserialize, Serialize};

const INTAKE_KEY: &str = "hydration_intake";

#[derive(Subcommand)]
pub enum HydrationAction {
    /// Print today's intake against the goal
    Status,
    /// Record glasses of water (250 ml each)
    Add {
        /// Number of glasses
        #[arg(long, default_value = "1")]
        glasses: u32,
    },
    /// Zero today's intake
    Reset,
    /// Compute the daily goal, optionally overriding profile fields
    Goal {
        /// male or female
        #[arg(long)]
        sex: Option<String>,
        /// Body weight in kg
        #[arg(long)]
        weight_kg: Option<f64>,
        /// cool, temperate or hot
        #[arg(long)]
        climate: Option<String>,
        /// low, moderate or high
        #[arg(long)]
        activity: Option<String>,
    },
    /// Update the stored hydration profile
    SetProfile {
        /// male or female
        #[arg(long)]
        sex: Option<String>,
        /// Body weight in kg (non-positive clears it)
        #[arg(long)]
        weight_kg: Option<f64>,
        /// Ambient temperature in °C
        #[arg(long)]
        temperature_c: Option<f64>,
        /// low, moderate or high
        #[arg(long)]
        activity: Option<String>,
    },
}

/// Today's total plus the day it belongs to.
#[derive(Serialize, Deserialize)]
struct IntakeCheckpoint {
    date: NaiveDate,
    total_ml: u32,
}

#[derive(Serialize)]
struct StatusReport {
    goal_ml: u32,
    total_ml: u32,
    goal_glasses: u32,
    total_glasses: u32,
    progress_ratio: f64,
    profile: HydrationProfile,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_tracker(db: &PlannerDb, settings: &Settings) -> HydrationTracker {
    let mut tracker = HydrationTracker::new(settings.hydration_profile());
    if let Ok(Some(json)) = db.kv_get(INTAKE_KEY) {
        if let Ok(checkpoint) = serde_json::from_str::<IntakeCheckpoint>(&json) {
            if checkpoint.date == today() {
                tracker.restore_total(checkpoint.total_ml);
            }
        }
    }
    tracker
}

fn save_tracker(db: &PlannerDb, tracker: &HydrationTracker) -> Result<(), Box<dyn std::error::Error>> {
    let checkpoint = IntakeCheckpoint {
        date: today(),
        total_ml: tracker.total_ml(),
    };
    db.kv_set(INTAKE_KEY, &serde_json::to_string(&checkpoint)?)?;
    Ok(())
}

fn status_report(tracker: &HydrationTracker) -> StatusReport {
    StatusReport {
        goal_ml: tracker.goal_ml(),
        total_ml: tracker.total_ml(),
        goal_glasses: tracker.goal_glasses(),
        total_glasses: tracker.total_glasses(),
        progress_ratio: tracker.progress_ratio(),
        profile: tracker.profile(),
    }
}

/// Parse an enum-valued flag; invalid input keeps the previous value.
fn parse_or_ignore<T>(flag: &str, raw: Option<String>, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = raw?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("ignoring invalid {flag} '{raw}'");
    }
    parsed
}

pub fn run(action: HydrationAction) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();

    match action {
        HydrationAction::Status => {
            let db = PlannerDb::open()?;
            let tracker = load_tracker(&db, &settings);
            println!("{}", serde_json::to_string_pretty(&status_report(&tracker))?);
        }
        HydrationAction::Add { glasses } => {
            let db = PlannerDb::open()?;
            let mut tracker = load_tracker(&db, &settings);
            tracker.add_listener("cli", |snap| {
                println!("💧 {} ml / {} ml", snap.total_ml, snap.goal_ml);
            });
            for _ in 0..glasses {
                tracker.add_glass();
            }
            save_tracker(&db, &tracker)?;
        }
        HydrationAction::Reset => {
            let db = PlannerDb::open()?;
            let mut tracker = load_tracker(&db, &settings);
            tracker.reset_today();
            save_tracker(&db, &tracker)?;
            println!("{}", serde_json::to_string_pretty(&status_report(&tracker))?);
        }
        HydrationAction::Goal {
            sex,
            weight_kg,
            climate,
            activity,
        } => {
            let mut profile = settings.hydration_profile();
            if let Some(sex) = parse_or_ignore("sex", sex, Sex::parse) {
                profile.sex = sex;
            }
            if let Some(weight) = weight_kg {
                profile.weight_kg = if weight > 0.0 { Some(weight) } else { None };
            }
            if let Some(climate) = parse_or_ignore("climate", climate, Climate::parse) {
                profile.climate = climate;
            }
            if let Some(activity) = parse_or_ignore("activity", activity, Activity::parse) {
                profile.activity = activity;
            }

            let goal_ml = compute_goal(&profile);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "goal_ml": goal_ml,
                    "goal_glasses": goal_ml / GLASS_ML,
                    "profile": profile,
                }))?
            );
        }
        HydrationAction::SetProfile {
            sex,
            weight_kg,
            temperature_c,
            activity,
        } => {
            let mut settings = settings;
            if let Some(sex) = parse_or_ignore("sex", sex, Sex::parse) {
                settings.profile.sex = sex;
            }
            if let Some(weight) = weight_kg {
                settings.profile.weight_kg = if weight > 0.0 { Some(weight) } else { None };
            }
            if let Some(temperature) = temperature_c {
                settings.profile.temperature_c = Some(temperature);
            }
            if let Some(activity) = parse_or_ignore("activity", activity, Activity::parse) {
                settings.profile.activity = activity;
            }
            settings.save()?;

            // Rebuild the tracker so the report reflects the new goal.
            let db = PlannerDb::open()?;
            let tracker = load_tracker(&db, &settings);
            println!("{}", serde_json::to_string_pretty(&status_report(&tracker))?);
        }
    }

    Ok(())
}
