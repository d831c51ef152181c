//! # sidereal-clock
//!
//! Interrupt-driven sidereal clock for embedded telescope-mount controllers.
//!
//! **Key features:**
//! - **Tick integrator** - Timer-driven counter anchored to UT1 and local apparent sidereal time
//! - **Conversions** - Gregorian ↔ Julian Day, GAST and LAST, hour normalization
//! - **Command protocol** - LX200-style get/set commands for date, time and timezone
//! - **Static allocation** - Const-constructible state, zero heap usage
//!
//! ## Optional Features
//!
//! - `defmt` - Route log output to `defmt`
//! - `serde` - Derive `Serialize`/`Deserialize` on site and baseline types
//! - `sim` - Host simulator binary (`clock-sim`)
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Logging macros must be declared before the modules that use them
#[macro_use]
mod logging;

// ============================================================================
// Module Declarations
// ============================================================================

// Configuration and errors
pub mod config;
pub mod error;

// Time representations and conversions
pub mod astro;
pub mod time;

// Tick integrator and timer seam
pub mod scheduler;
pub mod ticks;

// Command protocol
pub mod protocol;
pub mod response;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Configuration
pub use config::{ClockConfig, CoarseConfig, DefaultConfig};

// Error types
pub use error::{ClockError, CommandError};

// Time types
pub use time::{CivilDate, JulianMoment, Site};

// Clock
pub use protocol::{BaselineSnapshot, Clock};
pub use scheduler::{TimerRequest, TimerScheduler};
pub use ticks::{SiderealTicks, TickSource};

// Response types
pub use response::Response;

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
