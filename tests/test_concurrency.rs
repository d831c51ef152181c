//! Integration tests for concurrent ticking and resynchronization.
//!
//! A ticker thread stands in for the timer interrupt while other threads
//! resynchronize and sample the clock.

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{TICKS_PER_HOUR, init_clock, reply, set};
use sidereal_clock::config::CoarseConfig;
use sidereal_clock::{JulianMoment, SiderealTicks};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const TICKS: u32 = 200_000;

#[test]
fn test_no_lost_ticks_during_resync() {
    let ticks = SiderealTicks::<CoarseConfig>::new();
    let done = AtomicBool::new(false);
    let moment = JulianMoment::new(2_460_690.5, 3.0, 0.0);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..TICKS {
                ticks.on_tick();
            }
            done.store(true, Ordering::SeqCst);
        });

        s.spawn(|| {
            while !done.load(Ordering::SeqCst) {
                ticks.resynchronize(&moment, 6.0);
            }
        });
    });

    assert_eq!(ticks.ticks(), TICKS);
}

#[test]
fn test_samples_never_pair_new_baseline_with_old_count() {
    let ticks = SiderealTicks::<CoarseConfig>::new();
    let done = AtomicBool::new(false);
    let moment = JulianMoment::new(2_460_690.5, 3.0, 0.0);
    let max_elapsed = TICKS as f64 / TICKS_PER_HOUR as f64;
    ticks.resynchronize(&moment, 6.0);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..TICKS {
                ticks.on_tick();
            }
            done.store(true, Ordering::SeqCst);
        });

        s.spawn(|| {
            while !done.load(Ordering::SeqCst) {
                ticks.resynchronize(&moment, 6.0);
            }
        });

        s.spawn(|| {
            while !done.load(Ordering::SeqCst) {
                let (baseline, now) = ticks.sample();
                let elapsed = now.wrapping_sub(baseline.tick_count);
                assert!(elapsed <= TICKS, "torn sample: {:?} at {}", baseline, now);

                let ut1 = ticks.current_elapsed_hours();
                assert!(ut1 >= 3.0 && ut1 <= 3.0 + max_elapsed, "ut1 = {}", ut1);
            }
        });
    });
}

#[test]
fn test_elapsed_is_monotonic_while_ticking() {
    let ticks = SiderealTicks::<CoarseConfig>::new();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..TICKS {
                ticks.on_tick();
            }
            done.store(true, Ordering::SeqCst);
        });

        s.spawn(|| {
            let mut last = ticks.current_elapsed_hours();
            while !done.load(Ordering::SeqCst) {
                let now = ticks.current_elapsed_hours();
                assert!(now >= last);
                last = now;
            }
        });
    });
}

#[test]
fn test_commands_while_ticking() {
    let ticks = SiderealTicks::<CoarseConfig>::new();
    let clock = init_clock(&ticks);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..TICKS {
                ticks.on_tick();
            }
            done.store(true, Ordering::SeqCst);
        });

        s.spawn(|| {
            loop {
                set(&clock, "SC01/15/25");
                set(&clock, "SL08:00:00");
                // Replies stay well-formed whatever the interleaving
                assert_eq!(reply(&clock, "GSH").len(), 11);
                assert_eq!(reply(&clock, "GC"), "01/15/25");
                if done.load(Ordering::SeqCst) {
                    break;
                }
            }
        });
    });

    assert_eq!(ticks.ticks(), TICKS);
    assert!(clock.is_ready());
}
