//! Time representations.
//!
//! Plain value types shared by the conversion engine, the tick integrator and
//! the command handlers. Nothing here touches shared state.

pub mod calendar;
pub mod text;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Civil (calendar) date and time with a timezone offset.
///
/// Produced by parsing command parameters and by the conversion engine.
/// Text that cannot be parsed, or fields outside the calendar, never become a
/// `CivilDate`: parsers return `None` instead.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CivilDate {
    /// Calendar year (astronomical numbering, year 0 exists)
    pub year: i32,
    /// Month 1-12
    pub month: u8,
    /// Day of month 1-31
    pub day: u8,
    /// Hour 0-23
    pub hour: u8,
    /// Minute 0-59
    pub minute: u8,
    /// Second 0-59
    pub second: u8,
    /// Centisecond 0-99
    pub centisecond: u8,
    /// Hours added to local time to yield UT1
    pub timezone: f64,
}

impl CivilDate {
    /// Midnight on the given calendar day.
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            centisecond: 0,
            timezone: 0.0,
        }
    }

    /// Builder method to set the time of day.
    pub const fn with_time(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Builder method to set the timezone.
    pub const fn with_timezone(mut self, timezone: f64) -> Self {
        self.timezone = timezone;
        self
    }

    /// Time of day as fractional hours.
    pub fn hours(&self) -> f64 {
        self.hour as f64
            + (self.minute as f64 + (self.second as f64 + self.centisecond as f64 / 100.0) / 60.0)
                / 60.0
    }

    /// Check every field against the calendar.
    pub fn is_valid(&self) -> bool {
        calendar::is_valid_date(self.year, self.month, self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
            && self.centisecond < 100
    }
}

/// Julian Day with a separately tracked hour.
///
/// `day` is the Julian Day at 0h UT of the date (always `x.5`); `hour` counts
/// hours since then and may leave [0, 24) transiently. Call [`normalized`]
/// before storing a moment as a baseline.
///
/// [`normalized`]: JulianMoment::normalized
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JulianMoment {
    /// Julian Day at the epoch boundary of the date
    pub day: f64,
    /// Hours elapsed since `day`
    pub hour: f64,
    /// Hours added to local time to yield UT1
    pub timezone: f64,
}

impl JulianMoment {
    /// Create a moment.
    pub const fn new(day: f64, hour: f64, timezone: f64) -> Self {
        Self {
            day,
            hour,
            timezone,
        }
    }

    /// Carry whole days out of `hour` into `day` so that `hour` is in [0, 24).
    pub fn normalized(self) -> Self {
        let mut days = libm::floor(self.hour / 24.0);
        let mut hour = self.hour - days * 24.0;
        if hour >= 24.0 {
            hour -= 24.0;
            days += 1.0;
        }
        Self {
            day: self.day + days,
            hour,
            timezone: self.timezone,
        }
    }

    /// Same instant viewed `offset` hours earlier, normalized.
    ///
    /// With `offset` set to the timezone this yields the local calendar day
    /// and local time of day.
    pub fn shifted(self, offset: f64) -> Self {
        Self {
            hour: self.hour - offset,
            ..self
        }
        .normalized()
    }
}

/// Observing site.
///
/// Longitude is positive west of Greenwich.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Site {
    /// Longitude in radians, positive west
    pub longitude: f64,
    /// Latitude in radians, positive north
    pub latitude: f64,
}

impl Site {
    /// Create a site from radians.
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Create a site from degrees.
    pub fn from_degrees(longitude: f64, latitude: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_hours() {
        let date = CivilDate::from_ymd(2025, 1, 15).with_time(20, 30, 36);
        assert!((date.hours() - 20.51).abs() < 1e-12);
    }

    #[test]
    fn test_civil_validation() {
        assert!(CivilDate::from_ymd(2024, 2, 29).is_valid());
        assert!(!CivilDate::from_ymd(2023, 2, 29).is_valid());
        assert!(!CivilDate::from_ymd(2023, 13, 1).is_valid());
        assert!(!CivilDate::from_ymd(2023, 1, 1).with_time(24, 0, 0).is_valid());
        assert!(!CivilDate::from_ymd(2023, 1, 1).with_time(0, 60, 0).is_valid());
    }

    #[test]
    fn test_normalize_carries_days() {
        let moment = JulianMoment::new(2_451_544.5, 29.0, 0.0).normalized();
        assert_eq!(moment.day, 2_451_545.5);
        assert!((moment.hour - 5.0).abs() < 1e-12);

        let moment = JulianMoment::new(2_451_544.5, -5.0, 0.0).normalized();
        assert_eq!(moment.day, 2_451_543.5);
        assert!((moment.hour - 19.0).abs() < 1e-12);

        let moment = JulianMoment::new(2_451_544.5, 50.0, 0.0).normalized();
        assert_eq!(moment.day, 2_451_546.5);
        assert!((moment.hour - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_shifted_by_timezone() {
        // 23:00 UT1 seen from five hours east (timezone -5) is 04:00 next day
        let local = JulianMoment::new(2_451_544.5, 23.0, -5.0).shifted(-5.0);
        assert_eq!(local.day, 2_451_545.5);
        assert!((local.hour - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_site_from_degrees() {
        let site = Site::from_degrees(180.0, -90.0);
        assert!((site.longitude - core::f64::consts::PI).abs() < 1e-12);
        assert!((site.latitude + core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
