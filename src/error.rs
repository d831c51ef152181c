//! Error types for clock commands and startup.
//!
//! `CommandError` is the shared error-code taxonomy reported through the
//! command protocol. `ClockError` covers startup configuration failures.

use core::fmt;

/// Command error code.
///
/// Returned by command handlers when a command is recognized but cannot be
/// applied. No clock state is mutated when a handler returns an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Date/time readiness query answered negatively
    NotReady,

    /// Parameter does not match the command's grammar
    ParamForm,

    /// Parameter is well-formed but outside the accepted range
    ParamRange,
}

impl CommandError {
    /// Numeric code used by the framing layer of the command dispatcher.
    pub const fn code(&self) -> u8 {
        match self {
            CommandError::NotReady => 1,
            CommandError::ParamRange => 2,
            CommandError::ParamForm => 3,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotReady => write!(f, "Date/time not ready"),
            CommandError::ParamForm => write!(f, "Parameter format error"),
            CommandError::ParamRange => write!(f, "Parameter out of range"),
        }
    }
}

/// Startup error.
///
/// The clock cannot establish its tick-to-hour factor. These are fatal at
/// startup; nothing at runtime produces them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Zero ticks per sidereal hour, or a timer period that rounds to zero
    InvalidTickRate,

    /// Configured timezone bounds are inverted
    InvalidTimezoneRange,

    /// Scheduler refused to register the tick callback
    TimerRegistration,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::InvalidTickRate => write!(f, "Invalid tick rate"),
            ClockError::InvalidTimezoneRange => write!(f, "Invalid timezone range"),
            ClockError::TimerRegistration => write!(f, "Timer registration failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::format;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", CommandError::ParamForm), "Parameter format error");
        assert_eq!(format!("{}", CommandError::ParamRange), "Parameter out of range");
        assert_eq!(format!("{}", CommandError::NotReady), "Date/time not ready");
        assert_eq!(format!("{}", ClockError::InvalidTickRate), "Invalid tick rate");
        assert_eq!(
            format!("{}", ClockError::TimerRegistration),
            "Timer registration failed"
        );
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            CommandError::NotReady.code(),
            CommandError::ParamRange.code(),
            CommandError::ParamForm.code(),
        ];
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CommandError::ParamForm, CommandError::ParamForm);
        assert_ne!(CommandError::ParamForm, CommandError::ParamRange);
    }
}
