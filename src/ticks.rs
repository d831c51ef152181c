//! Sidereal tick integrator.
//!
//! Owns the counter incremented by the timer interrupt and the baseline that
//! anchors it to UT1 and sidereal time. Nothing outside this module touches
//! either directly.
//!
//! ```text
//! sidereal = normalize(baseline.sidereal_hour + (ticks - baseline.tick_count) / TICKS_PER_SIDEREAL_HOUR)
//! ut1      =           baseline.ut1_hour      + (ticks - baseline.tick_count) / TICKS_PER_SIDEREAL_HOUR / SIDEREAL_RATIO
//! ```
//!
//! The counter is never reset. Resynchronization moves the baseline instead,
//! and always writes all three baseline fields together with a counter
//! snapshot taken inside the same critical section.

use crate::astro::{SIDEREAL_RATIO, normalize_hour};
use crate::config::ClockConfig;
use crate::time::JulianMoment;
use core::cell::Cell;
use core::marker::PhantomData;
use critical_section::Mutex;
use portable_atomic::{AtomicU32, Ordering};

/// Synchronization point between the counter and the time scales.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Baseline {
    /// UT1 hours since the current Julian Day at synchronization
    pub ut1_hour: f64,
    /// Local apparent sidereal time at synchronization
    pub sidereal_hour: f64,
    /// Counter value at synchronization
    pub tick_count: u32,
}

impl Baseline {
    const ZERO: Self = Self {
        ut1_hour: 0.0,
        sidereal_hour: 0.0,
        tick_count: 0,
    };
}

/// Time source used by command handlers.
///
/// Object-safe view of [`SiderealTicks`] so the command table does not depend
/// on the tick-rate configuration.
pub trait TickSource {
    /// Local apparent sidereal time now, [0, 24).
    fn current_sidereal_hours(&self) -> f64;

    /// UT1 hours since the baseline's Julian Day (not normalized).
    fn current_elapsed_hours(&self) -> f64;

    /// Re-anchor the counter at `moment.hour` UT1 and `sidereal` LAST.
    fn resynchronize(&self, moment: &JulianMoment, sidereal: f64);
}

/// Interrupt-driven sidereal clock.
///
/// Const-constructible so it can live in a `static` shared with the timer
/// callback:
///
/// ```rust,ignore
/// static TICKS: SiderealTicks<DefaultConfig> = SiderealTicks::new();
///
/// fn clock_tick() {
///     TICKS.on_tick();
/// }
/// ```
pub struct SiderealTicks<C: ClockConfig> {
    counter: AtomicU32,
    baseline: Mutex<Cell<Baseline>>,
    _config: PhantomData<fn() -> C>,
}

impl<C: ClockConfig> SiderealTicks<C> {
    /// Create a stopped clock at counter zero with an all-zero baseline.
    pub const fn new() -> Self {
        Self {
            counter: AtomicU32::new(0),
            baseline: Mutex::new(Cell::new(Baseline::ZERO)),
            _config: PhantomData,
        }
    }

    /// Advance the counter by one tick.
    ///
    /// Called from the timer interrupt. Never blocks.
    #[inline]
    pub fn on_tick(&self) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Raw counter value.
    pub fn ticks(&self) -> u32 {
        self.counter.load(Ordering::Acquire)
    }

    /// Baseline and counter read as one consistent pair.
    pub fn sample(&self) -> (Baseline, u32) {
        critical_section::with(|cs| {
            let baseline = self.baseline.borrow(cs).get();
            (baseline, self.counter.load(Ordering::Acquire))
        })
    }

    /// Sidereal hours elapsed between the baseline and `now`.
    fn elapsed_sidereal(baseline: &Baseline, now: u32) -> f64 {
        now.wrapping_sub(baseline.tick_count) as f64 * C::hours_per_tick()
    }

    /// Local apparent sidereal time now, [0, 24).
    pub fn current_sidereal_hours(&self) -> f64 {
        let (baseline, now) = self.sample();
        normalize_hour(baseline.sidereal_hour + Self::elapsed_sidereal(&baseline, now))
    }

    /// UT1 hours since the baseline's Julian Day.
    ///
    /// Not normalized: values past 24 mean the day has rolled over since the
    /// last resynchronization.
    pub fn current_elapsed_hours(&self) -> f64 {
        let (baseline, now) = self.sample();
        baseline.ut1_hour + Self::elapsed_sidereal(&baseline, now) / SIDEREAL_RATIO
    }

    /// Re-anchor the counter.
    ///
    /// Snapshots the counter and stores it with `moment.hour` and `sidereal`
    /// in a single critical section.
    pub fn resynchronize(&self, moment: &JulianMoment, sidereal: f64) {
        let tick_count = critical_section::with(|cs| {
            let tick_count = self.counter.load(Ordering::Acquire);
            self.baseline.borrow(cs).set(Baseline {
                ut1_hour: moment.hour,
                sidereal_hour: sidereal,
                tick_count,
            });
            tick_count
        });
        log_debug!(
            "resync: ut1 {} h, sidereal {} h at tick {}",
            moment.hour,
            sidereal,
            tick_count
        );
    }
}

impl<C: ClockConfig> core::fmt::Debug for SiderealTicks<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (baseline, now) = self.sample();
        f.debug_struct("SiderealTicks")
            .field("ticks", &now)
            .field("baseline", &baseline)
            .finish()
    }
}

impl<C: ClockConfig> Default for SiderealTicks<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockConfig> TickSource for SiderealTicks<C> {
    fn current_sidereal_hours(&self) -> f64 {
        SiderealTicks::current_sidereal_hours(self)
    }

    fn current_elapsed_hours(&self) -> f64 {
        SiderealTicks::current_elapsed_hours(self)
    }

    fn resynchronize(&self, moment: &JulianMoment, sidereal: f64) {
        SiderealTicks::resynchronize(self, moment, sidereal)
    }
}
