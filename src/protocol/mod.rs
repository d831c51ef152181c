//! Command protocol handler and clock facade.
//!
//! `Clock` ties the tick integrator to the conversion engine and serializes
//! command execution behind a `blocking_mutex::Mutex`. Every command runs to
//! completion inside one lock; the tick callback never takes this lock.
//!
//! Mnemonic dispatch goes through the static table in [`table`]; the command
//! bodies live in [`handlers`].

pub mod handlers;
pub mod table;

use crate::astro::{gregorian_to_julian, julian_to_last};
use crate::config::{ClockConfig, DefaultConfig};
use crate::error::{ClockError, CommandError};
use crate::response::Response;
use crate::scheduler::{TimerRequest, TimerScheduler};
use crate::ticks::{SiderealTicks, TickSource};
use crate::time::{JulianMoment, Site};
use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Julian Day and timezone saved across restarts.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaselineSnapshot {
    /// Julian Day at 0h UT1 of the current date
    pub julian_day: f64,
    /// Hours added to local time to yield UT1
    pub timezone: f64,
}

/// Mutable clock state guarded by the command lock.
#[derive(Debug, Clone)]
struct ClockState {
    site: Site,
    /// Julian Day and timezone of the baseline; `hour` is the UT1 hour at the
    /// last resynchronization.
    ut1: JulianMoment,
    date_ready: bool,
    time_ready: bool,
}

impl ClockState {
    const fn new() -> Self {
        Self {
            site: Site::new(0.0, 0.0),
            ut1: JulianMoment::new(0.0, 0.0, 0.0),
            date_ready: false,
            time_ready: false,
        }
    }

    fn is_ready(&self) -> bool {
        self.date_ready && self.time_ready
    }
}

/// Command execution context handed to each handler.
///
/// Holds the locked clock state and the tick source for the duration of one
/// command.
pub struct Session<'a> {
    state: &'a mut ClockState,
    ticks: &'a dyn TickSource,
    min_timezone: f64,
    max_timezone: f64,
}

impl<'a> Session<'a> {
    /// Current UT1 instant. `hour` is not normalized.
    fn now(&self) -> JulianMoment {
        JulianMoment::new(
            self.state.ut1.day,
            self.ticks.current_elapsed_hours(),
            self.state.ut1.timezone,
        )
    }

    /// Current local date and time of day, normalized.
    fn local(&self) -> JulianMoment {
        self.now().shifted(self.state.ut1.timezone)
    }

    fn timezone(&self) -> f64 {
        self.state.ut1.timezone
    }

    /// Store `moment` as the new UT1 baseline and re-anchor the counter at
    /// the matching LAST.
    fn resync(&mut self, moment: JulianMoment) {
        let moment = moment.normalized();
        let sidereal = julian_to_last(&moment, &self.state.site);
        self.ticks.resynchronize(&moment, sidereal);
        self.state.ut1 = moment;
    }
}

impl core::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Sidereal clock with its command surface.
///
/// `M` is the raw mutex supplied by the platform for command-level exclusion.
/// It only has to exclude other command paths. `CriticalSectionRawMutex`
/// masks interrupts for the whole command on single-core targets, which
/// delays ticks; prefer `ThreadModeRawMutex` when commands run in thread mode.
///
/// The tick counter itself lives in a [`SiderealTicks`] shared with the timer
/// callback:
///
/// ```rust,ignore
/// static TICKS: SiderealTicks<DefaultConfig> = SiderealTicks::new();
/// static CLOCK: Clock<'static, ThreadModeRawMutex> = Clock::new(&TICKS);
///
/// fn clock_tick() {
///     TICKS.on_tick();
/// }
///
/// CLOCK.init(&mut scheduler, clock_tick, site)?;
/// let reply = CLOCK.execute("GS");
/// ```
pub struct Clock<'a, M: RawMutex, C: ClockConfig = DefaultConfig> {
    ticks: &'a SiderealTicks<C>,
    state: Mutex<M, RefCell<ClockState>>,
    on_ready: Option<fn()>,
}

impl<'a, M: RawMutex, C: ClockConfig> Clock<'a, M, C> {
    /// Create a clock over `ticks`. Call [`init`](Self::init) before use.
    pub const fn new(ticks: &'a SiderealTicks<C>) -> Self {
        Self {
            ticks,
            state: Mutex::new(RefCell::new(ClockState::new())),
            on_ready: None,
        }
    }

    /// Builder method to install the readiness hook.
    ///
    /// The hook runs once, the first time both date and time have been set.
    pub const fn with_ready_hook(mut self, hook: fn()) -> Self {
        self.on_ready = Some(hook);
        self
    }

    /// Validate the configuration, register the tick callback and set the
    /// start baseline for `site`.
    pub fn init<S: TimerScheduler>(
        &self,
        scheduler: &mut S,
        callback: fn(),
        site: Site,
    ) -> Result<(), ClockError> {
        if let Err(e) = C::validate() {
            log_error!("clock config rejected: {}", e);
            return Err(e);
        }

        let request = TimerRequest {
            period_sub_micros: C::tick_period_sub_micros(),
            channel: C::TIMER_CHANNEL,
            priority: C::TIMER_PRIORITY,
        };
        if scheduler.register_periodic(callback, request).is_err() {
            log_error!("timer {} registration failed", request.channel);
            return Err(ClockError::TimerRegistration);
        }
        log_info!(
            "clock ticking every {} sub-us on timer {}",
            request.period_sub_micros,
            request.channel
        );

        let start = C::START_DATE;
        let mut moment = gregorian_to_julian(&start);
        moment.hour = start.hours() + start.timezone;

        self.with_session(|session| {
            session.state.site = site;
            session.resync(moment);
        });
        Ok(())
    }

    /// Change the observing site, keeping the current UT1 instant.
    pub fn set_site(&self, site: Site) {
        self.with_session(|session| {
            session.state.site = site;
            let now = session.now();
            session.resync(now);
        });
        log_info!("site set to lon {} rad, lat {} rad", site.longitude, site.latitude);
    }

    /// Current observing site.
    pub fn site(&self) -> Site {
        self.with_session(|session| session.state.site)
    }

    /// Local apparent sidereal time now, [0, 24).
    pub fn last(&self) -> f64 {
        self.ticks.current_sidereal_hours()
    }

    /// Current UT1 instant with `hour` in [0, 24).
    pub fn ut1(&self) -> JulianMoment {
        self.with_session(|session| session.now().normalized())
    }

    /// Date has been set at least once.
    pub fn date_is_ready(&self) -> bool {
        self.with_session(|session| session.state.date_ready)
    }

    /// Time has been set at least once.
    pub fn time_is_ready(&self) -> bool {
        self.with_session(|session| session.state.time_ready)
    }

    /// Both date and time have been set.
    pub fn is_ready(&self) -> bool {
        self.with_session(|session| session.state.is_ready())
    }

    /// Current Julian Day and timezone for persistence.
    pub fn snapshot(&self) -> BaselineSnapshot {
        self.with_session(|session| {
            let now = session.now().normalized();
            BaselineSnapshot {
                julian_day: now.day,
                timezone: now.timezone,
            }
        })
    }

    /// Adopt a persisted Julian Day and timezone.
    ///
    /// The running UT1 time of day is kept. Readiness flags are not changed.
    pub fn restore(&self, snapshot: BaselineSnapshot) {
        self.with_session(|session| {
            let now = session.now().normalized();
            session.resync(JulianMoment::new(
                snapshot.julian_day,
                now.hour,
                snapshot.timezone,
            ));
        });
        log_info!(
            "baseline restored: JD {} tz {}",
            snapshot.julian_day,
            snapshot.timezone
        );
    }

    /// Execute one command.
    ///
    /// `mnemonic` is the two-letter command and `parameter` everything after
    /// it (sub-selector or argument). Returns `None` for commands this clock
    /// does not handle.
    pub fn command(
        &self,
        mnemonic: &str,
        parameter: &str,
    ) -> Option<Result<Response, CommandError>> {
        let meta = table::find_command(mnemonic, parameter)?;

        let (result, became_ready) = self.with_session(|session| {
            let was_ready = session.state.is_ready();
            let result = (meta.handler)(session, parameter);
            (result, !was_ready && session.state.is_ready())
        });

        if became_ready {
            log_info!("date and time ready");
            if let Some(hook) = self.on_ready {
                hook();
            }
        }
        Some(result)
    }

    /// Execute a command body such as `GS`, `GX89` or `SC01/15/25`.
    pub fn execute(&self, body: &str) -> Option<Result<Response, CommandError>> {
        let mnemonic = body.get(..2)?;
        let parameter = body.get(2..)?;
        self.command(mnemonic, parameter)
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut Session<'_>) -> R) -> R {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            let mut session = Session {
                state: &mut *state,
                ticks: self.ticks,
                min_timezone: C::MIN_TIMEZONE,
                max_timezone: C::MAX_TIMEZONE,
            };
            f(&mut session)
        })
    }
}

impl<M: RawMutex, C: ClockConfig> core::fmt::Debug for Clock<'_, M, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Clock")
            .field("ticks", &self.ticks)
            .field("on_ready", &self.on_ready.is_some())
            .finish_non_exhaustive()
    }
}
