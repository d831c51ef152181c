//! Configuration traits and implementations for tick rate and protocol limits.
//!
//! The `ClockConfig` trait allows compile-time configuration of the tick rate,
//! timer binding and accepted timezone range without runtime overhead.

use crate::astro::SIDEREAL_RATIO;
use crate::error::ClockError;
use crate::time::CivilDate;

/// Timer periods are expressed in sub-microseconds (1/16 µs).
pub const SUB_MICROS_PER_HOUR: f64 = 16.0 * 1_000_000.0 * 3600.0;

/// Clock configuration trait defining tick rate, timer binding and limits.
///
/// All values are const (zero runtime cost). The tick rate is never re-derived
/// per call; `validate()` must succeed before the clock is started.
pub trait ClockConfig {
    /// Counter increments per sidereal hour (default: 360000, one per sidereal centisecond)
    const TICKS_PER_SIDEREAL_HOUR: u32;

    /// Hardware timer channel requested from the scheduler (default: 3)
    const TIMER_CHANNEL: u8;

    /// Hardware timer priority requested from the scheduler (default: 1)
    const TIMER_PRIORITY: u8;

    /// Smallest accepted timezone, hours added to local time to yield UT1 (default: -13.75)
    const MIN_TIMEZONE: f64;

    /// Largest accepted timezone (default: 12.0)
    const MAX_TIMEZONE: f64;

    /// Civil date, time and timezone used until the first set commands arrive
    const START_DATE: CivilDate;

    /// Timer period in sub-microseconds for one tick.
    ///
    /// One tick is a fixed fraction of a sidereal hour, so the solar-time period
    /// is the base interval divided by the sidereal rate.
    fn tick_period_sub_micros() -> u32 {
        if Self::TICKS_PER_SIDEREAL_HOUR == 0 {
            return 0;
        }
        let base = SUB_MICROS_PER_HOUR / Self::TICKS_PER_SIDEREAL_HOUR as f64;
        libm::round(base / SIDEREAL_RATIO) as u32
    }

    /// Elapsed sidereal hours per tick.
    fn hours_per_tick() -> f64 {
        1.0 / Self::TICKS_PER_SIDEREAL_HOUR as f64
    }

    /// Check that a valid tick-to-hour factor can be established.
    fn validate() -> Result<(), ClockError> {
        if Self::TICKS_PER_SIDEREAL_HOUR == 0 || Self::tick_period_sub_micros() == 0 {
            return Err(ClockError::InvalidTickRate);
        }
        if Self::MIN_TIMEZONE > Self::MAX_TIMEZONE {
            return Err(ClockError::InvalidTimezoneRange);
        }
        Ok(())
    }
}

/// Default start: 2021-02-07 12:00:00, five hours west of Greenwich.
const DEFAULT_START: CivilDate = CivilDate {
    year: 2021,
    month: 2,
    day: 7,
    hour: 12,
    minute: 0,
    second: 0,
    centisecond: 0,
    timezone: 5.0,
};

/// Default configuration for typical mount controllers.
///
/// - TICKS_PER_SIDEREAL_HOUR: 360000 (sidereal centiseconds)
/// - TIMER_CHANNEL: 3
/// - TIMER_PRIORITY: 1
/// - Timezone range: -13.75 ..= 12.0
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ClockConfig for DefaultConfig {
    const TICKS_PER_SIDEREAL_HOUR: u32 = 360_000;
    const TIMER_CHANNEL: u8 = 3;
    const TIMER_PRIORITY: u8 = 1;
    const MIN_TIMEZONE: f64 = -13.75;
    const MAX_TIMEZONE: f64 = 12.0;
    const START_DATE: CivilDate = DEFAULT_START;
}

/// Coarse configuration for slow timers.
///
/// Ticks once per sidereal decisecond (36000 per sidereal hour). Everything
/// else matches `DefaultConfig`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CoarseConfig;

impl ClockConfig for CoarseConfig {
    const TICKS_PER_SIDEREAL_HOUR: u32 = 36_000;
    const TIMER_CHANNEL: u8 = 3;
    const TIMER_PRIORITY: u8 = 1;
    const MIN_TIMEZONE: f64 = -13.75;
    const MAX_TIMEZONE: f64 = 12.0;
    const START_DATE: CivilDate = DEFAULT_START;
}
