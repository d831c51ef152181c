//! Calendar rules.
//!
//! Julian calendar before the 1582 reform, Gregorian from 1582-10-15 on.

/// First day of the Gregorian calendar.
pub const GREGORIAN_START: (i32, u8, u8) = (1582, 10, 15);

/// True if the date falls on or after the Gregorian reform.
pub fn is_gregorian(year: i32, month: u8, day: u8) -> bool {
    (year, month, day) >= GREGORIAN_START
}

/// Leap year rule of the calendar in force that year.
pub fn is_leap_year(year: i32) -> bool {
    if year < GREGORIAN_START.0 {
        year.rem_euclid(4) == 0
    } else {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

/// Number of days in a month, 0 for an invalid month.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Check year/month/day against the calendar, including the ten days
/// dropped by the reform (1582-10-05 to 1582-10-14).
pub fn is_valid_date(year: i32, month: u8, day: u8) -> bool {
    if day == 0 || day > days_in_month(year, month) {
        return false;
    }
    !(year == 1582 && month == 10 && (5..15).contains(&day))
}
