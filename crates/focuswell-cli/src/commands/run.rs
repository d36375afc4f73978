//! Live wellness session: drives the tick loop once per second until
//! Ctrl-C or a tick limit, with toasts printed to the terminal.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use clap::Args;
use focuswell_core::focus::{
    FocusEngine, Phase, Routine, WorkReminders, BREAK_STARTED_MESSAGE, PHASE_TOAST_MS,
    WORK_STARTED_MESSAGE,
};
use focuswell_core::hydration::HydrationTracker;
use focuswell_core::notify::{NotificationSink, SharedSink};
use focuswell_core::storage::Settings;
use focuswell_core::tick::TickLoop;

#[derive(Args)]
pub struct RunArgs {
    /// Work phase length in minutes (overrides settings)
    #[arg(long)]
    work_mins: Option<u64>,
    /// Break phase length in minutes (overrides settings)
    #[arg(long)]
    break_mins: Option<u64>,
    /// Use the short demo routine (10 s work / 5 s break)
    #[arg(long)]
    demo: bool,
    /// Stop after this many ticks (default: run until Ctrl-C)
    #[arg(long)]
    ticks: Option<u64>,
    /// Tick and nudge only, without the focus countdown
    #[arg(long)]
    no_focus: bool,
}

/// Prints toast messages to the terminal.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, message: &str, _duration_ms: u64) {
        println!("\n{message}");
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();
    if !settings.is_profile_complete() {
        log::warn!("hydration profile incomplete; goal uses baseline values");
    }

    let sink: SharedSink = Rc::new(RefCell::new(ConsoleSink));
    let mut tick_loop = TickLoop::new(settings.nudge_timers(), sink.clone());

    let tracker = HydrationTracker::new(settings.hydration_profile());
    println!(
        "💧 daily goal: {} ml ({} glasses)",
        tracker.goal_ml(),
        tracker.goal_glasses()
    );

    if !args.no_focus {
        let routine = if args.demo {
            Routine::demo()
        } else {
            let base = settings.routine();
            Routine::new(
                args.work_mins.map_or(base.work_secs, |m| m * 60),
                args.break_mins.map_or(base.break_secs, |m| m * 60),
            )?
        };

        let engine = Rc::new(RefCell::new(FocusEngine::new(routine)));

        {
            let mut engine_mut = engine.borrow_mut();

            let toast_sink = sink.clone();
            engine_mut.set_on_phase_change(move |phase| {
                let message = match phase {
                    Phase::Break => BREAK_STARTED_MESSAGE,
                    _ => WORK_STARTED_MESSAGE,
                };
                toast_sink.borrow_mut().notify(message, PHASE_TOAST_MS);
            });

            engine_mut.set_on_update(|snapshot| {
                let paused = if snapshot.running { "" } else { " (paused)" };
                print!(
                    "\r{} {:>5}s{}  ",
                    snapshot.phase.as_str(),
                    snapshot.remaining_secs,
                    paused
                );
                let _ = std::io::stdout().flush();
            });

            engine_mut.start();
        }

        let engine_for_tick = engine.clone();
        tick_loop.add_listener("focus-engine", move |uptime| {
            engine_for_tick.borrow_mut().on_tick(uptime);
        });

        // Reminders read the snapshot after the engine has processed
        // the tick, so they must be registered second.
        let mut reminders = WorkReminders::new(settings.reminder_rules(), sink.clone());
        let engine_for_reminders = engine.clone();
        tick_loop.add_listener("work-reminders", move |_| {
            let snapshot = engine_for_reminders.borrow().snapshot();
            reminders.observe(&snapshot);
        });
    }

    tick_loop.start();
    drive(&mut tick_loop, args.ticks)?;

    println!("\nsession ended after {} ticks", tick_loop.uptime());
    Ok(())
}

/// Fire one tick per second until Ctrl-C, the tick limit, or a stopped
/// loop. Scheduling is only re-armed while the loop reports running.
fn drive(tick_loop: &mut TickLoop, max_ticks: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick completes immediately.
        interval.tick().await;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            if let Some(limit) = max_ticks {
                if tick_loop.uptime() >= limit {
                    break;
                }
            }
            if !tick_loop.is_running() {
                break;
            }

            tokio::select! {
                _ = interval.tick() => tick_loop.tick(),
                _ = &mut ctrl_c => tick_loop.stop(),
            }
        }
    });

    Ok(())
}
