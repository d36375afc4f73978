//! Property-based invariant tests for the focus engine and hydration
//! model.
//!
//! 1. Routine construction accepts any positive duration pair.
//! 2. Applying a routine from Idle or Work arms the work phase with
//!    the new duration.
//! 3. A started engine cycles Work -> Break -> Work after exactly
//!    work + break ticks.
//! 4. A paused engine ignores any number of ticks.
//! 5. Reset lands in Idle from any reachable state.
//! 6. A full work phase emits one update per tick plus the break
//!    opener, and exactly one phase change.
//! 7. Restoring a snapshot never exceeds the phase duration.
//! 8. Hydration goals stay within the documented bounds.
//! 9. Glass accounting never exceeds the cap.

use std::cell::RefCell;
use std::rc::Rc;

use focuswell_core::focus::{FocusEngine, FocusSnapshot, Phase, Routine};
use focuswell_core::hydration::{
    compute_goal, Activity, Climate, HydrationProfile, HydrationTracker, Sex, GLASS_ML,
};
use proptest::prelude::*;

fn routine_strategy() -> impl Strategy<Value = Routine> {
    (1u64..=120, 1u64..=60).prop_map(|(work, brk)| Routine::new(work, brk).unwrap())
}

fn profile_strategy() -> impl Strategy<Value = HydrationProfile> {
    (
        prop_oneof![Just(Sex::Male), Just(Sex::Female)],
        prop::option::of(-50.0f64..400.0),
        prop_oneof![Just(Climate::Cool), Just(Climate::Temperate), Just(Climate::Hot)],
        prop_oneof![Just(Activity::Low), Just(Activity::Moderate), Just(Activity::High)],
    )
        .prop_map(|(sex, weight_kg, climate, activity)| HydrationProfile {
            sex,
            weight_kg,
            climate,
            activity,
        })
}

proptest! {
    #[test]
    fn routine_accepts_any_positive_pair(work in 1u64..=10_000, brk in 1u64..=10_000) {
        let routine = Routine::new(work, brk).unwrap();
        prop_assert_eq!(routine.phase_secs(Phase::Work), work);
        prop_assert_eq!(routine.phase_secs(Phase::Break), brk);
        prop_assert_eq!(routine.phase_secs(Phase::Idle), 0);
    }
}

proptest! {
    #[test]
    fn set_routine_arms_the_work_phase_from_idle_and_work(
        initial in routine_strategy(),
        next in routine_strategy(),
        started in any::<bool>(),
        worked in 0u64..=30,
    ) {
        let mut engine = FocusEngine::new(initial);
        if started {
            engine.start();
            for _ in 0..worked.min(initial.work_secs - 1) {
                engine.on_tick(0);
            }
        }

        engine.set_routine(next);
        prop_assert_eq!(engine.phase(), Phase::Work);
        prop_assert_eq!(engine.remaining_secs(), next.work_secs);
        prop_assert_eq!(engine.is_running(), started);
    }
}

proptest! {
    #[test]
    fn engine_cycles_after_work_plus_break_ticks(routine in routine_strategy()) {
        let mut engine = FocusEngine::new(routine);
        engine.start();

        for _ in 0..routine.work_secs {
            engine.on_tick(0);
        }
        prop_assert_eq!(engine.phase(), Phase::Break);
        prop_assert_eq!(engine.remaining_secs(), routine.break_secs);

        for _ in 0..routine.break_secs {
            engine.on_tick(0);
        }
        prop_assert_eq!(engine.phase(), Phase::Work);
        prop_assert_eq!(engine.remaining_secs(), routine.work_secs);
        prop_assert!(engine.is_running());
    }
}

proptest! {
    #[test]
    fn paused_engines_ignore_ticks(
        routine in routine_strategy(),
        worked in 0u64..=30,
        idle_ticks in 0usize..=100,
    ) {
        let mut engine = FocusEngine::new(routine);
        engine.start();

        // Stay inside the work phase before pausing.
        for _ in 0..worked.min(routine.work_secs - 1) {
            engine.on_tick(0);
        }
        engine.pause();

        let before = engine.snapshot();
        for _ in 0..idle_ticks {
            engine.on_tick(0);
        }
        prop_assert_eq!(engine.snapshot(), before);
    }
}

proptest! {
    #[test]
    fn reset_lands_idle_from_any_reachable_state(
        routine in routine_strategy(),
        ops in prop::collection::vec(0u8..4, 0..40),
    ) {
        let mut engine = FocusEngine::new(routine);
        for op in ops {
            match op {
                0 => engine.start(),
                1 => engine.pause(),
                2 => engine.on_tick(0),
                _ => engine.set_routine(routine),
            }
        }

        engine.reset();
        prop_assert_eq!(engine.phase(), Phase::Idle);
        prop_assert_eq!(engine.remaining_secs(), 0);
        prop_assert!(!engine.is_running());
    }
}

proptest! {
    #[test]
    fn a_work_phase_emits_one_update_per_tick_plus_the_opener(routine in routine_strategy()) {
        let updates = Rc::new(RefCell::new(0u64));
        let phase_changes = Rc::new(RefCell::new(0u64));

        let mut engine = FocusEngine::new(routine);
        let u = updates.clone();
        engine.set_on_update(move |_| *u.borrow_mut() += 1);
        let p = phase_changes.clone();
        engine.set_on_phase_change(move |_| *p.borrow_mut() += 1);

        engine.start();
        *updates.borrow_mut() = 0;
        *phase_changes.borrow_mut() = 0;

        for _ in 0..routine.work_secs {
            engine.on_tick(0);
        }

        // Every tick emits an update; the boundary tick also emits the
        // break's opening update and the single phase change.
        prop_assert_eq!(*updates.borrow(), routine.work_secs + 1);
        prop_assert_eq!(*phase_changes.borrow(), 1);
    }
}

proptest! {
    #[test]
    fn restored_snapshots_respect_phase_bounds(
        routine in routine_strategy(),
        phase in prop_oneof![Just(Phase::Idle), Just(Phase::Work), Just(Phase::Break)],
        running in any::<bool>(),
        remaining_secs in 0u64..=100_000,
    ) {
        let snapshot = FocusSnapshot { phase, running, remaining_secs, routine };
        let engine = FocusEngine::from_snapshot(&snapshot);

        prop_assert!(engine.remaining_secs() <= routine.phase_secs(engine.phase()));
        if phase == Phase::Idle {
            prop_assert!(!engine.is_running());
            prop_assert_eq!(engine.remaining_secs(), 0);
        } else {
            prop_assert_eq!(engine.phase(), phase);
            prop_assert_eq!(engine.is_running(), running);
        }
    }
}

proptest! {
    #[test]
    fn hydration_goals_stay_within_bounds(profile in profile_strategy()) {
        let goal = compute_goal(&profile);
        prop_assert!((1200..=6000).contains(&goal), "goal out of range: {goal}");
    }
}

proptest! {
    #[test]
    fn glass_accounting_never_exceeds_the_cap(
        profile in profile_strategy(),
        glasses in 0u32..=60,
    ) {
        let mut tracker = HydrationTracker::new(profile);
        for _ in 0..glasses {
            tracker.add_glass();
        }

        prop_assert_eq!(tracker.total_ml(), (GLASS_ML * glasses).min(10_000));
        prop_assert_eq!(tracker.total_glasses(), tracker.total_ml() / GLASS_ML);

        let ratio = tracker.progress_ratio();
        prop_assert!((0.0..=1.0).contains(&ratio), "ratio out of range: {ratio}");
    }
}
