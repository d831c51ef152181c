//! Test fixtures and utilities for sidereal-clock testing.
//!
//! Provides:
//! - `MockScheduler`: Test implementation of TimerScheduler
//! - `TestClock`: Clock type used across integration tests
//! - Helper functions for common test scenarios

#![allow(dead_code)]

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use sidereal_clock::config::CoarseConfig;
use sidereal_clock::{Clock, CommandError, SiderealTicks, Site, TimerRequest, TimerScheduler};

// ============================================================================
// MockScheduler - Test Timer Registration
// ============================================================================

/// Mock scheduler for testing.
///
/// Records registrations instead of starting a timer. Tests drive the clock
/// by calling `SiderealTicks::on_tick` directly.
#[derive(Debug, Default)]
pub struct MockScheduler {
    /// Registered requests
    pub requests: Vec<TimerRequest>,

    /// Refuse every registration
    pub refuse: bool,
}

impl MockScheduler {
    /// Create a scheduler that accepts registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler that refuses registrations.
    pub fn refusing() -> Self {
        Self {
            requests: Vec::new(),
            refuse: true,
        }
    }
}

impl TimerScheduler for MockScheduler {
    type Error = &'static str;

    fn register_periodic(&mut self, _callback: fn(), request: TimerRequest) -> Result<(), &'static str> {
        if self.refuse {
            return Err("no free timer");
        }
        self.requests.push(request);
        Ok(())
    }
}

// ============================================================================
// Clock Helpers
// ============================================================================

/// Clock type used in integration tests (decisecond ticks).
pub type TestClock<'a> = Clock<'a, CriticalSectionRawMutex, CoarseConfig>;

/// Sidereal ticks per sidereal hour under `CoarseConfig`.
pub const TICKS_PER_HOUR: u32 = 36_000;

fn noop() {}

/// Create and initialize a clock at Greenwich.
pub fn init_clock(ticks: &SiderealTicks<CoarseConfig>) -> TestClock<'_> {
    init_clock_at(ticks, Site::default())
}

/// Create and initialize a clock at `site`.
pub fn init_clock_at(ticks: &SiderealTicks<CoarseConfig>, site: Site) -> TestClock<'_> {
    let clock = TestClock::new(ticks);
    clock.init(&mut MockScheduler::new(), noop, site).unwrap();
    clock
}

/// Advance the counter by `n` ticks.
pub fn advance(ticks: &SiderealTicks<CoarseConfig>, n: u32) {
    for _ in 0..n {
        ticks.on_tick();
    }
}

/// Execute a command body and return its text reply.
///
/// Panics if the command is unknown or fails.
pub fn reply(clock: &TestClock<'_>, body: &str) -> String {
    let response = clock
        .execute(body)
        .unwrap_or_else(|| panic!("{} not recognized", body))
        .unwrap_or_else(|e| panic!("{} failed: {}", body, e));
    assert!(!response.numeric, "{} replied numerically", body);
    response.as_str().to_string()
}

/// Execute a set command, expecting numeric success.
pub fn set(clock: &TestClock<'_>, body: &str) {
    let response = clock
        .execute(body)
        .unwrap_or_else(|| panic!("{} not recognized", body))
        .unwrap_or_else(|e| panic!("{} failed: {}", body, e));
    assert!(response.numeric, "{} replied with text", body);
}

/// Execute a command, expecting it to be recognized and rejected.
pub fn rejected(clock: &TestClock<'_>, body: &str) -> CommandError {
    match clock.execute(body) {
        Some(Err(e)) => e,
        Some(Ok(response)) => panic!("{} accepted: {:?}", body, response),
        None => panic!("{} not recognized", body),
    }
}
