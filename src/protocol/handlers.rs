//! Command handlers.
//!
//! Each handler runs with the clock state locked. Get commands format a
//! text reply; set commands validate their argument, re-derive the UT1
//! baseline and reply with the numeric success flag. A rejected argument
//! leaves the state untouched.

use super::Session;
use crate::astro::{gregorian_to_julian, julian_to_gregorian};
use crate::error::CommandError;
use crate::response::{Reply, Response};
use crate::time::JulianMoment;
use crate::time::text::{self, Precision};

fn hms_reply(hours: f64, precision: Precision) -> Response {
    let mut reply = Reply::new();
    text::format_hms(&mut reply, hours, precision);
    Response::from_reply(reply)
}

fn date_reply(moment: &JulianMoment) -> Response {
    let mut reply = Reply::new();
    text::format_date(&mut reply, &julian_to_gregorian(moment));
    Response::from_reply(reply)
}

fn precision(parameter: &str, high: Precision) -> Precision {
    if parameter == "H" { high } else { Precision::Seconds }
}

/// `Ga`: local time on a 12-hour dial.
pub fn get_standard_time(session: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    let mut hours = session.local().hour;
    if hours > 12.0 {
        hours -= 12.0;
    }
    Ok(hms_reply(hours, Precision::Seconds))
}

/// `GC`: local calendar date.
pub fn get_calendar_date(session: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    Ok(date_reply(&session.local()))
}

/// `Gc`: clock format, always 24-hour.
pub fn get_time_format(_: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    Ok(Response::text("24"))
}

/// `GG`: hours added to local time to yield UT1.
pub fn get_utc_offset(session: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    let mut reply = Reply::new();
    text::format_offset(&mut reply, session.timezone());
    Ok(Response::from_reply(reply))
}

/// `GL` / `GLH`: local time on a 24-hour dial.
pub fn get_local_time(session: &mut Session<'_>, parameter: &str) -> Result<Response, CommandError> {
    let hours = session.local().hour;
    Ok(hms_reply(hours, precision(parameter, Precision::TenThousandths)))
}

/// `GS` / `GSH`: local apparent sidereal time.
pub fn get_sidereal_time(
    session: &mut Session<'_>,
    parameter: &str,
) -> Result<Response, CommandError> {
    let hours = session.ticks.current_sidereal_hours();
    Ok(hms_reply(hours, precision(parameter, Precision::Centiseconds)))
}

/// `GX80`: UT1 time of day.
pub fn get_ut1_time(session: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    let hours = session.now().normalized().hour;
    Ok(hms_reply(hours, Precision::Centiseconds))
}

/// `GX81`: UT1 calendar date.
pub fn get_ut1_date(session: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    Ok(date_reply(&session.now().normalized()))
}

/// `GX89`: numeric success once date and time have both been set.
pub fn get_ready_status(session: &mut Session<'_>, _: &str) -> Result<Response, CommandError> {
    if session.state.is_ready() {
        Ok(Response::numeric())
    } else {
        Err(CommandError::NotReady)
    }
}

/// `SC MM/DD/YY`: set the local date, keeping the local time of day.
pub fn set_calendar_date(
    session: &mut Session<'_>,
    parameter: &str,
) -> Result<Response, CommandError> {
    let timezone = session.timezone();
    let Some(date) = text::parse_date(parameter, timezone) else {
        log_warn!("SC rejected: {}", parameter);
        return Err(CommandError::ParamForm);
    };

    let local = session.local();
    let day = gregorian_to_julian(&date).day;
    session.resync(JulianMoment::new(day, local.hour + timezone, timezone));
    session.state.date_ready = true;

    log_info!("date set to {}", parameter);
    Ok(Response::numeric())
}

/// `SG [s]HH[:MM]`: set the timezone, keeping the UT1 instant.
pub fn set_utc_offset(session: &mut Session<'_>, parameter: &str) -> Result<Response, CommandError> {
    let Some(timezone) = text::parse_timezone(parameter) else {
        log_warn!("SG rejected: {}", parameter);
        return Err(CommandError::ParamForm);
    };
    if timezone < session.min_timezone || timezone > session.max_timezone {
        log_warn!("SG out of range: {}", parameter);
        return Err(CommandError::ParamRange);
    }

    let now = session.now();
    session.resync(JulianMoment { timezone, ..now });

    log_info!("timezone set to {}", parameter);
    Ok(Response::numeric())
}

/// `SL HH:MM:SS[.SSSS]`: set the local time, keeping the local date.
pub fn set_local_time(session: &mut Session<'_>, parameter: &str) -> Result<Response, CommandError> {
    let Some(hours) = text::parse_hms(parameter) else {
        log_warn!("SL rejected: {}", parameter);
        return Err(CommandError::ParamForm);
    };

    let timezone = session.timezone();
    let local = session.local();
    session.resync(JulianMoment::new(local.day, hours + timezone, timezone));
    session.state.time_ready = true;

    log_info!("time set to {}", parameter);
    Ok(Response::numeric())
}
