//! Response types for clock commands.
//!
//! `Response` represents a recognized command that completed. Failures are
//! returned as `Err(CommandError)`, not `Response`.

/// Reply buffer capacity (longest reply is `HH:MM:SS.ssss`).
pub const MAX_REPLY: usize = 24;

/// Reply text buffer.
pub type Reply = heapless::String<MAX_REPLY>;

/// Command execution response with reply text and framing flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Reply text (empty for numeric replies)
    pub message: Reply,

    /// Numeric reply: the dispatcher frames a success flag instead of text
    pub numeric: bool,
}

impl Response {
    /// Create textual response.
    pub fn text(message: &str) -> Self {
        let mut msg = Reply::new();
        let _ = msg.push_str(message);

        Self {
            message: msg,
            numeric: false,
        }
    }

    /// Create textual response from an already formatted buffer.
    pub fn from_reply(message: Reply) -> Self {
        Self {
            message,
            numeric: false,
        }
    }

    /// Create numeric success response.
    pub fn numeric() -> Self {
        Self {
            message: Reply::new(),
            numeric: true,
        }
    }

    /// Reply text.
    pub fn as_str(&self) -> &str {
        self.message.as_str()
    }
}
