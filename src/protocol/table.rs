//! Command table.
//!
//! Maps a two-letter mnemonic plus its selector grammar to a handler. The
//! table is const and lives in ROM; lookup is a linear scan in table order.

use super::Session;
use super::handlers;
use crate::error::CommandError;
use crate::response::Response;

/// Command handler function.
pub type Handler = fn(&mut Session<'_>, &str) -> Result<Response, CommandError>;

/// Text accepted after the mnemonic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Nothing may follow the mnemonic
    None,

    /// Empty for normal precision, `H` for high precision
    Precision,

    /// Exactly this sub-selector
    Exact(&'static str),

    /// Free-form argument, validated by the handler
    Argument,
}

impl Selector {
    /// Check whether `parameter` selects this entry.
    pub fn accepts(&self, parameter: &str) -> bool {
        match self {
            Selector::None => parameter.is_empty(),
            Selector::Precision => parameter.is_empty() || parameter == "H",
            Selector::Exact(sub) => parameter == *sub,
            Selector::Argument => true,
        }
    }
}

/// Command metadata and handler.
#[derive(Debug, Clone, Copy)]
pub struct CommandMeta {
    /// Two-letter mnemonic
    pub mnemonic: &'static str,

    /// Selector grammar
    pub selector: Selector,

    /// Human-readable description
    pub description: &'static str,

    /// Handler
    pub handler: Handler,
}

/// All commands handled by the clock.
pub static COMMANDS: &[CommandMeta] = &[
    CommandMeta {
        mnemonic: "Ga",
        selector: Selector::None,
        description: "Get standard time (12h)",
        handler: handlers::get_standard_time,
    },
    CommandMeta {
        mnemonic: "GC",
        selector: Selector::None,
        description: "Get standard calendar date",
        handler: handlers::get_calendar_date,
    },
    CommandMeta {
        mnemonic: "Gc",
        selector: Selector::None,
        description: "Get local time format",
        handler: handlers::get_time_format,
    },
    CommandMeta {
        mnemonic: "GG",
        selector: Selector::None,
        description: "Get UTC offset",
        handler: handlers::get_utc_offset,
    },
    CommandMeta {
        mnemonic: "GL",
        selector: Selector::Precision,
        description: "Get local standard time (24h)",
        handler: handlers::get_local_time,
    },
    CommandMeta {
        mnemonic: "GS",
        selector: Selector::Precision,
        description: "Get sidereal time",
        handler: handlers::get_sidereal_time,
    },
    CommandMeta {
        mnemonic: "GX",
        selector: Selector::Exact("80"),
        description: "Get UT1 time",
        handler: handlers::get_ut1_time,
    },
    CommandMeta {
        mnemonic: "GX",
        selector: Selector::Exact("81"),
        description: "Get UT1 date",
        handler: handlers::get_ut1_date,
    },
    CommandMeta {
        mnemonic: "GX",
        selector: Selector::Exact("89"),
        description: "Get date/time ready status",
        handler: handlers::get_ready_status,
    },
    CommandMeta {
        mnemonic: "SC",
        selector: Selector::Argument,
        description: "Set calendar date (MM/DD/YY)",
        handler: handlers::set_calendar_date,
    },
    CommandMeta {
        mnemonic: "SG",
        selector: Selector::Argument,
        description: "Set UTC offset ([s]HH[:MM])",
        handler: handlers::set_utc_offset,
    },
    CommandMeta {
        mnemonic: "SL",
        selector: Selector::Argument,
        description: "Set local time (HH:MM:SS[.SSSS])",
        handler: handlers::set_local_time,
    },
];

/// Find the entry handling `mnemonic` with `parameter`.
///
/// Returns `None` when the mnemonic is unknown or no entry's selector accepts
/// the parameter.
pub fn find_command(mnemonic: &str, parameter: &str) -> Option<&'static CommandMeta> {
    COMMANDS
        .iter()
        .find(|meta| meta.mnemonic == mnemonic && meta.selector.accepts(parameter))
}
