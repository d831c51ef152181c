//! Timer registration abstraction.
//!
//! The `TimerScheduler` trait is the only thing the clock needs from the task
//! scheduler: a periodic callback bound to a hardware timer. Timer allocation
//! and interrupt wiring stay on the scheduler's side.

/// Periodic timer request for the tick callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimerRequest {
    /// Callback period in sub-microseconds (1/16 µs)
    pub period_sub_micros: u32,

    /// Hardware timer channel
    pub channel: u8,

    /// Interrupt priority (0 highest)
    pub priority: u8,
}

impl TimerRequest {
    /// Callback period in nanoseconds.
    pub fn period_nanos(&self) -> u64 {
        self.period_sub_micros as u64 * 1000 / 16
    }
}

/// Platform-agnostic periodic timer registration.
///
/// Implementations must invoke `callback` from the timer interrupt at the
/// requested period until the system shuts down. The callback never blocks.
pub trait TimerScheduler {
    /// Platform-specific error type
    type Error;

    /// Register `callback` to run every `request.period_sub_micros`.
    fn register_periodic(&mut self, callback: fn(), request: TimerRequest) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_nanos() {
        let request = TimerRequest {
            period_sub_micros: 160_000,
            channel: 3,
            priority: 1,
        };
        assert_eq!(request.period_nanos(), 10_000_000);
    }
}
