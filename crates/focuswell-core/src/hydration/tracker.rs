//! Session-scoped hydration intake tracker.

use serde::{Deserialize, Serialize};

use crate::callback;
use crate::hydration::{compute_goal, Activity, Climate, HydrationProfile, Sex, GLASS_ML};

/// Hard ceiling on recorded intake, well above any sane goal.
const TOTAL_CAP_ML: u32 = 10_000;

/// Point-in-time view of the tracker, passed to change listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydrationSnapshot {
    pub goal_ml: u32,
    pub total_ml: u32,
    pub profile: HydrationProfile,
}

/// Partial profile change; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileUpdate {
    pub sex: Option<Sex>,
    pub weight_kg: Option<f64>,
    pub climate: Option<Climate>,
    pub activity: Option<Activity>,
}

type ChangeListener = Box<dyn FnMut(&HydrationSnapshot)>;

/// Tracks today's intake against the computed goal.
///
/// State lives for the session only; hosts that want the total to
/// survive a restart checkpoint the snapshot themselves and feed it
/// back through [`HydrationTracker::restore_total`].
pub struct HydrationTracker {
    goal_ml: u32,
    total_ml: u32,
    profile: HydrationProfile,
    listeners: Vec<(String, ChangeListener)>,
}

impl HydrationTracker {
    pub fn new(profile: HydrationProfile) -> Self {
        Self {
            goal_ml: compute_goal(&profile),
            total_ml: 0,
            profile,
            listeners: Vec::new(),
        }
    }

    /// Register a change listener under a key. Returns false (and
    /// changes nothing) when the key is already registered.
    pub fn add_listener(&mut self, key: impl Into<String>, cb: impl FnMut(&HydrationSnapshot) + 'static) -> bool {
        let key = key.into();
        if self.listeners.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.listeners.push((key, Box::new(cb)));
        true
    }

    pub fn remove_listener(&mut self, key: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(k, _)| k != key);
        self.listeners.len() != before
    }

    /// Apply a partial profile update and recompute the goal.
    ///
    /// A non-positive weight clears the stored weight, falling back to
    /// the per-sex baseline.
    pub fn set_profile(&mut self, update: ProfileUpdate) {
        if let Some(sex) = update.sex {
            self.profile.sex = sex;
        }
        if let Some(weight) = update.weight_kg {
            self.profile.weight_kg = if weight > 0.0 { Some(weight) } else { None };
        }
        if let Some(climate) = update.climate {
            self.profile.climate = climate;
        }
        if let Some(activity) = update.activity {
            self.profile.activity = activity;
        }
        self.goal_ml = compute_goal(&self.profile);
        self.emit_change();
    }

    /// Record one glass (250 ml), capped at 10 litres.
    pub fn add_glass(&mut self) {
        self.total_ml = (self.total_ml + GLASS_ML).min(TOTAL_CAP_ML);
        self.emit_change();
    }

    /// Zero the intake counter, e.g. at the start of a new day.
    pub fn reset_today(&mut self) {
        self.total_ml = 0;
        self.emit_change();
    }

    /// Reload a checkpointed total without notifying listeners.
    pub fn restore_total(&mut self, total_ml: u32) {
        self.total_ml = total_ml.min(TOTAL_CAP_ML);
    }

    pub fn profile(&self) -> HydrationProfile {
        self.profile
    }

    pub fn goal_ml(&self) -> u32 {
        self.goal_ml
    }

    pub fn total_ml(&self) -> u32 {
        self.total_ml
    }

    pub fn goal_glasses(&self) -> u32 {
        self.goal_ml / GLASS_ML
    }

    pub fn total_glasses(&self) -> u32 {
        self.total_ml / GLASS_ML
    }

    /// Fraction of the goal reached, clamped to 1.0. A zero goal reads
    /// as no progress (unreachable through compute_goal's clamp).
    pub fn progress_ratio(&self) -> f64 {
        if self.goal_ml == 0 {
            return 0.0;
        }
        (f64::from(self.total_ml) / f64::from(self.goal_ml)).min(1.0)
    }

    pub fn snapshot(&self) -> HydrationSnapshot {
        HydrationSnapshot {
            goal_ml: self.goal_ml,
            total_ml: self.total_ml,
            profile: self.profile,
        }
    }

    fn emit_change(&mut self) {
        let snapshot = HydrationSnapshot {
            goal_ml: self.goal_ml,
            total_ml: self.total_ml,
            profile: self.profile,
        };
        for (key, cb) in &mut self.listeners {
            callback::shielded(key, || cb(&snapshot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn glasses_accumulate_and_cap() {
        let mut tracker = HydrationTracker::new(HydrationProfile::default());
        for _ in 0..3 {
            tracker.add_glass();
        }
        assert_eq!(tracker.total_ml(), 750);
        assert_eq!(tracker.total_glasses(), 3);

        for _ in 0..100 {
            tracker.add_glass();
        }
        assert_eq!(tracker.total_ml(), 10_000);
    }

    #[test]
    fn progress_ratio_is_monotonic_and_capped() {
        let mut tracker = HydrationTracker::new(HydrationProfile {
            sex: Sex::Female,
            weight_kg: Some(40.0),
            climate: Climate::Cool,
            activity: Activity::Low,
        });
        // 40 * 35 * 0.9 * 0.95 = 1197 -> clamped to 1200.
        assert_eq!(tracker.goal_ml(), 1200);

        let mut last = tracker.progress_ratio();
        for _ in 0..8 {
            tracker.add_glass();
            let ratio = tracker.progress_ratio();
            assert!(ratio >= last);
            assert!(ratio <= 1.0);
            last = ratio;
        }
        assert_eq!(tracker.progress_ratio(), 1.0);
    }

    #[test]
    fn partial_profile_update_recomputes_goal() {
        let mut tracker = HydrationTracker::new(HydrationProfile::default());
        assert_eq!(tracker.goal_ml(), 2700);

        tracker.set_profile(ProfileUpdate {
            sex: Some(Sex::Male),
            weight_kg: Some(80.0),
            climate: Some(Climate::Hot),
            activity: Some(Activity::High),
        });
        assert_eq!(tracker.goal_ml(), 3864);

        // Only the climate changes; everything else sticks.
        tracker.set_profile(ProfileUpdate {
            climate: Some(Climate::Temperate),
            ..Default::default()
        });
        let profile = tracker.profile();
        assert_eq!(profile.sex, Sex::Male);
        assert_eq!(profile.weight_kg, Some(80.0));
        assert_eq!(profile.activity, Activity::High);
        assert_eq!(tracker.goal_ml(), 3220);
    }

    #[test]
    fn non_positive_weight_update_clears_the_weight() {
        let mut tracker = HydrationTracker::new(HydrationProfile {
            weight_kg: Some(70.0),
            ..Default::default()
        });
        tracker.set_profile(ProfileUpdate {
            weight_kg: Some(0.0),
            ..Default::default()
        });
        assert_eq!(tracker.profile().weight_kg, None);
        assert_eq!(tracker.goal_ml(), 2700);
    }

    #[test]
    fn listeners_see_every_change_and_duplicates_are_rejected() {
        let mut tracker = HydrationTracker::new(HydrationProfile::default());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        assert!(tracker.add_listener("ui", move |snap: &HydrationSnapshot| {
            s.borrow_mut().push(snap.total_ml)
        }));
        assert!(!tracker.add_listener("ui", |_| {}));

        tracker.add_glass();
        tracker.add_glass();
        tracker.reset_today();
        assert_eq!(*seen.borrow(), vec![250, 500, 0]);

        assert!(tracker.remove_listener("ui"));
        tracker.add_glass();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn panicking_listener_does_not_poison_the_tracker() {
        let mut tracker = HydrationTracker::new(HydrationProfile::default());
        tracker.add_listener("bad", |_| panic!("widget gone"));

        let count = Rc::new(RefCell::new(0u32));
        let c = count.clone();
        tracker.add_listener("good", move |_| *c.borrow_mut() += 1);

        tracker.add_glass();
        assert_eq!(tracker.total_ml(), 250);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn restore_total_is_silent_and_capped() {
        let mut tracker = HydrationTracker::new(HydrationProfile::default());
        let fired = Rc::new(RefCell::new(0u32));
        let f = fired.clone();
        tracker.add_listener("ui", move |_| *f.borrow_mut() += 1);

        tracker.restore_total(1500);
        assert_eq!(tracker.total_ml(), 1500);
        assert_eq!(tracker.total_glasses(), 6);
        assert_eq!(*fired.borrow(), 0);

        tracker.restore_total(50_000);
        assert_eq!(tracker.total_ml(), 10_000);
    }
}
