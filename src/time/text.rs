//! Text grammars for command parameters and reply formatting.
//!
//! Parameters:
//! - Date `MM/DD/YY` (years 2000-2099)
//! - Time `HH:MM:SS` or `HH:MM:SS.S` with up to four fractional digits
//! - Timezone `[s]H[H]` or `[s]H[H]:MM` with `MM` one of 00, 30, 45
//!
//! Replies are written into caller-provided `heapless::String` buffers.

use super::CivilDate;
use core::fmt::Write;

/// Number of fractional second digits in an `HH:MM:SS` reply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Precision {
    /// `HH:MM:SS`
    Seconds,
    /// `HH:MM:SS.ss`
    Centiseconds,
    /// `HH:MM:SS.ssss`
    TenThousandths,
}

impl Precision {
    fn decimals(self) -> u32 {
        match self {
            Precision::Seconds => 0,
            Precision::Centiseconds => 2,
            Precision::TenThousandths => 4,
        }
    }
}

fn digit(b: u8) -> Option<u32> {
    if b.is_ascii_digit() {
        Some((b - b'0') as u32)
    } else {
        None
    }
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] => Some(digit(*a)? * 10 + digit(*b)?),
        _ => None,
    }
}

/// Parse a local calendar date `MM/DD/YY`.
///
/// The returned date carries `timezone` and a zero time of day. Returns
/// `None` for malformed text or a day that does not exist.
pub fn parse_date(text: &str, timezone: f64) -> Option<CivilDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 8 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let month = two_digits(&bytes[0..2])?;
    let day = two_digits(&bytes[3..5])?;
    let year = two_digits(&bytes[6..8])?;

    let date = CivilDate::from_ymd(2000 + year as i32, month as u8, day as u8)
        .with_timezone(timezone);
    if date.is_valid() { Some(date) } else { None }
}

/// Parse a time of day `HH:MM:SS[.S...]` into hours.
pub fn parse_hms(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour = two_digits(&bytes[0..2])?;
    let minute = two_digits(&bytes[3..5])?;
    let second = two_digits(&bytes[6..8])?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    let mut fraction = 0.0;
    match &bytes[8..] {
        [] => {}
        [b'.', rest @ ..] if (1..=4).contains(&rest.len()) => {
            let mut scale = 0.1;
            for b in rest {
                fraction += digit(*b)? as f64 * scale;
                scale /= 10.0;
            }
        }
        _ => return None,
    }

    Some(hour as f64 + minute as f64 / 60.0 + (second as f64 + fraction) / 3600.0)
}

/// Parse a timezone offset `[s]H[H][:MM]` into hours.
///
/// Only the grammar is checked here; range limits belong to the caller.
pub fn parse_timezone(text: &str) -> Option<f64> {
    let (sign, rest) = match text.as_bytes() {
        [b'-', rest @ ..] => (-1.0, rest),
        [b'+', rest @ ..] => (1.0, rest),
        rest => (1.0, rest),
    };

    let (hour_digits, minute_digits) = match rest.iter().position(|b| *b == b':') {
        Some(colon) => (&rest[..colon], Some(&rest[colon + 1..])),
        None => (rest, None),
    };

    let hours = match hour_digits {
        [a] => digit(*a)?,
        [_, _] => two_digits(hour_digits)?,
        _ => return None,
    };

    let minutes = match minute_digits {
        None => 0,
        Some(m) => match two_digits(m)? {
            m @ (0 | 30 | 45) => m,
            _ => return None,
        },
    };

    Some(sign * (hours as f64 + minutes as f64 / 60.0))
}

/// Float error allowed in `hours` before a digit is dropped (about 3.6 µs).
const TRUNCATION_SLACK: f64 = 1e-9;

/// Write `hours` as `HH:MM:SS[.fraction]`, truncated to the last digit shown.
///
/// Values are expected in [0, 24). The reply never reaches 24h, so it stays
/// on the same day as the date derived from the same moment.
pub fn format_hms<const N: usize>(out: &mut heapless::String<N>, hours: f64, precision: Precision) {
    let decimals = precision.decimals();
    let scale = 10u64.pow(decimals);
    let units_per_hour = 3600 * scale;

    let total = libm::floor((hours.max(0.0) + TRUNCATION_SLACK) * units_per_hour as f64) as u64;
    let total = total.min(24 * units_per_hour - 1);

    let h = total / units_per_hour;
    let m = (total / (60 * scale)) % 60;
    let s = (total / scale) % 60;
    let _ = write!(out, "{:02}:{:02}:{:02}", h, m, s);

    if decimals > 0 {
        let fraction = total % scale;
        let _ = write!(out, ".{:0width$}", fraction, width = decimals as usize);
    }
}

/// Write a signed offset as `sHH:MM`.
pub fn format_offset<const N: usize>(out: &mut heapless::String<N>, hours: f64) {
    let sign = if hours < 0.0 { '-' } else { '+' };
    let minutes = libm::round(libm::fabs(hours) * 60.0) as u32;
    let _ = write!(out, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60);
}

/// Write a calendar date as `MM/DD/YY`.
pub fn format_date<const N: usize>(out: &mut heapless::String<N>, date: &CivilDate) {
    let _ = write!(
        out,
        "{:02}/{:02}/{:02}",
        date.month,
        date.day,
        date.year.rem_euclid(100)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    type Buf = heapless::String<24>;

    fn hms(hours: f64, precision: Precision) -> Buf {
        let mut out = Buf::new();
        format_hms(&mut out, hours, precision);
        out
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("01/15/25", 5.0).unwrap();
        assert_eq!((date.year, date.month, date.day), (2025, 1, 15));
        assert_eq!(date.timezone, 5.0);

        assert!(parse_date("02/29/24", 0.0).is_some());
        assert!(parse_date("02/29/23", 0.0).is_none());
        assert!(parse_date("13/01/25", 0.0).is_none());
        assert!(parse_date("00/10/25", 0.0).is_none());
        assert!(parse_date("1/15/25", 0.0).is_none());
        assert!(parse_date("01-15-25", 0.0).is_none());
        assert!(parse_date("", 0.0).is_none());
    }

    #[test]
    fn test_parse_hms() {
        assert!((parse_hms("20:30:36").unwrap() - 20.51).abs() < 1e-12);
        assert!((parse_hms("00:00:01.5").unwrap() - 1.5 / 3600.0).abs() < 1e-12);
        assert!((parse_hms("12:00:00.250").unwrap() - (12.0 + 0.25 / 3600.0)).abs() < 1e-12);
        assert!(parse_hms("24:00:00").is_none());
        assert!(parse_hms("12:60:00").is_none());
        assert!(parse_hms("12:00").is_none());
        assert!(parse_hms("12:00:00.").is_none());
        assert!(parse_hms("12:00:00.12345").is_none());
        assert!(parse_hms("12:00:00x").is_none());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("-05:00"), Some(-5.0));
        assert_eq!(parse_timezone("+05"), Some(5.0));
        assert_eq!(parse_timezone("5"), Some(5.0));
        assert_eq!(parse_timezone("-09:30"), Some(-9.5));
        assert_eq!(parse_timezone("+05:45"), Some(5.75));
        assert_eq!(parse_timezone("-14:00"), Some(-14.0));
        assert_eq!(parse_timezone("+05:15"), None);
        assert_eq!(parse_timezone("+5:3"), None);
        assert_eq!(parse_timezone("+123"), None);
        assert_eq!(parse_timezone(""), None);
        assert_eq!(parse_timezone("-"), None);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(hms(20.51, Precision::Seconds).as_str(), "20:30:36");
        assert_eq!(hms(0.0, Precision::Centiseconds).as_str(), "00:00:00.00");
        assert_eq!(
            hms(1.0 + 0.5 / 3600.0, Precision::TenThousandths).as_str(),
            "01:00:00.5000"
        );
        assert_eq!(hms(20.5 + 0.999 / 3600.0, Precision::Seconds).as_str(), "20:30:00");
    }

    #[test]
    fn test_format_hms_never_reaches_midnight() {
        assert_eq!(hms(23.9999999, Precision::Seconds).as_str(), "23:59:59");
        assert_eq!(hms(23.9999999, Precision::Centiseconds).as_str(), "23:59:59.99");
        assert_eq!(
            hms(24.0 - 1e-12, Precision::TenThousandths).as_str(),
            "23:59:59.9999"
        );
    }

    #[test]
    fn test_format_offset() {
        let mut out = Buf::new();
        format_offset(&mut out, 5.0);
        assert_eq!(out.as_str(), "+05:00");

        let mut out = Buf::new();
        format_offset(&mut out, -9.5);
        assert_eq!(out.as_str(), "-09:30");
    }

    #[test]
    fn test_format_date() {
        let mut out = Buf::new();
        format_date(&mut out, &CivilDate::from_ymd(2025, 1, 15));
        assert_eq!(out.as_str(), "01/15/25");

        let mut out = Buf::new();
        format_date(&mut out, &CivilDate::from_ymd(2100, 12, 31));
        assert_eq!(out.as_str(), "12/31/00");
    }
}
