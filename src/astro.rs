//! Astronomical conversion engine.
//!
//! Gregorian calendar ↔ Julian Day, Julian Day → Greenwich apparent sidereal
//! time (GAST) → local apparent sidereal time (LAST), and hour normalization.
//!
//! All functions are pure and total over well-formed inputs.

use crate::time::{CivilDate, JulianMoment, Site, calendar};
use core::f64::consts::PI;
use libm::{cos, floor, fmod, sin};

/// Ratio of sidereal to solar time.
pub const SIDEREAL_RATIO: f64 = 1.002_737_909_35;

/// Julian Day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Julian days per Julian century.
pub const JULIAN_CENTURY: f64 = 36_525.0;

/// Last Julian Day number still counted in the Julian calendar.
const GREGORIAN_SWITCH: f64 = 2_299_160.0;

/// Reduce an hour value into [0, 24).
///
/// Defined for finite input of any magnitude; the reduction is exact.
pub fn normalize_hour(hours: f64) -> f64 {
    debug_assert!(hours.is_finite(), "non-finite hour value");
    let mut h = fmod(hours, 24.0);
    if h < 0.0 {
        h += 24.0;
    }
    // A tiny negative remainder can round up to exactly 24
    if h >= 24.0 { 0.0 } else { h }
}

/// Reduce an hour-angle value into [-12, 12).
pub fn normalize_hour_angle(hours: f64) -> f64 {
    normalize_hour(hours + 12.0) - 12.0
}

/// Convert radians to hours of angle.
pub fn radians_to_hours(radians: f64) -> f64 {
    radians * 12.0 / PI
}

/// Julian Day at 0h of a civil date.
///
/// January and February count as months 13 and 14 of the previous year. The
/// Gregorian correction applies from 1582-10-15; earlier dates are read in the
/// Julian calendar. The returned hour is 0 and the timezone is carried over.
pub fn gregorian_to_julian(date: &CivilDate) -> JulianMoment {
    let mut y = date.year as f64;
    let mut m = date.month as f64;
    if date.month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let b = if calendar::is_gregorian(date.year, date.month, date.day) {
        2.0 - floor(y / 100.0) + floor(y / 400.0)
    } else {
        0.0
    };

    let day = b + floor(365.25 * y) + floor(30.6001 * (m + 1.0)) + date.day as f64 + 1_720_994.5;
    JulianMoment::new(day, 0.0, date.timezone)
}

/// Civil date of a Julian Day.
///
/// Only the calendar date is produced: the time-of-day fields are zero and the
/// moment's hour is ignored. Days up to 2299160 are Julian-calendar dates.
pub fn julian_to_gregorian(moment: &JulianMoment) -> CivilDate {
    let i = floor(moment.day + 0.5);

    let b = if i > GREGORIAN_SWITCH {
        let a = floor((i - 1_867_216.25) / 36_524.25);
        i + 1.0 + a - floor(a / 4.0)
    } else {
        i
    };

    let c = b + 1524.0;
    let d = floor((c - 122.1) / 365.25);
    let e = floor(365.25 * d);
    let g = floor((c - e) / 30.6001);

    let day = floor(c - e - floor(30.6001 * g));
    let month = if g < 13.5 { g - 1.0 } else { g - 13.0 };
    let year = if month > 2.5 { d - 4716.0 } else { d - 4715.0 };

    CivilDate::from_ymd(year as i32, month as u8, day as u8).with_timezone(moment.timezone)
}

/// Greenwich apparent sidereal time in hours, [0, 24).
///
/// Mean sidereal time from the polynomial in days since J2000.0, plus the
/// equation of the equinoxes from the dominant nutation terms.
pub fn julian_to_gast(moment: &JulianMoment) -> f64 {
    let day0 = gregorian_to_julian(&julian_to_gregorian(moment)).day;

    let h = moment.hour;
    let d = (moment.day - J2000) + h / 24.0;
    let d0 = day0 - J2000;
    let t = d / JULIAN_CENTURY;

    let gmst = 6.697_374_558 + 0.065_709_824_419_08 * d0 + SIDEREAL_RATIO * h + 0.000_026 * t * t;

    // Longitude of the Moon's ascending node, mean longitude of the Sun,
    // obliquity of the ecliptic (degrees)
    let omega = 125.04 - 0.052_954 * d;
    let l = 280.47 + 0.985_65 * d;
    let epsilon = 23.4393 - 0.000_000_4 * d;

    let nutation = -0.000_319 * sin(omega.to_radians()) - 0.000_024 * sin((2.0 * l).to_radians());
    let equation_of_equinoxes = nutation * cos(epsilon.to_radians());

    normalize_hour(gmst + equation_of_equinoxes)
}

/// Local apparent sidereal time in hours, [0, 24).
pub fn julian_to_last(moment: &JulianMoment, site: &Site) -> f64 {
    normalize_hour(julian_to_gast(moment) - radians_to_hours(site.longitude))
}
