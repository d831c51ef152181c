//! Host simulator for the sidereal clock.
//!
//! Runs the tick callback from a std thread and answers LX200-style frames
//! read from stdin.
//!
//! Usage:
//!   clock-sim [site.toml]
//!
//! Config format:
//! ```toml
//! [site]
//! longitude = 75.0   # degrees, positive west
//! latitude = 40.0    # degrees, positive north
//!
//! [start]
//! date = "01/15/25"
//! time = "20:30:36"
//! timezone = "+05:00"
//! ```
//!
//! Then type frames such as `:GS#`, `:GX89#` or `:SC01/15/25#`. Text replies
//! are terminated with `#`; set commands reply `1` or `0`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use serde::Deserialize;
use sidereal_clock::{Clock, DefaultConfig, Site, SiderealTicks, TimerRequest, TimerScheduler};
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use std::thread;
use std::time::{Duration, Instant};

static TICKS: SiderealTicks<DefaultConfig> = SiderealTicks::new();

// The std critical-section is a process-wide lock; the tick thread only
// increments an atomic and never waits on it.
static CLOCK: Clock<'static, CriticalSectionRawMutex> =
    Clock::new(&TICKS).with_ready_hook(on_ready);

fn clock_tick() {
    TICKS.on_tick();
}

fn on_ready() {
    eprintln!("clock-sim: date and time ready");
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimConfig {
    site: SiteConfig,
    start: Option<StartConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SiteConfig {
    longitude: f64,
    latitude: f64,
}

#[derive(Debug, Deserialize)]
struct StartConfig {
    date: String,
    time: String,
    timezone: String,
}

/// Calls the tick callback from a dedicated thread on a fixed-rate schedule.
struct ThreadScheduler;

impl TimerScheduler for ThreadScheduler {
    type Error = io::Error;

    fn register_periodic(&mut self, callback: fn(), request: TimerRequest) -> Result<(), io::Error> {
        let period = Duration::from_nanos(request.period_nanos());
        thread::Builder::new()
            .name(format!("timer{}", request.channel))
            .spawn(move || {
                let mut next = Instant::now() + period;
                loop {
                    let now = Instant::now();
                    if next > now {
                        thread::sleep(next - now);
                    }
                    callback();
                    next += period;
                }
            })?;
        Ok(())
    }
}

fn load_config(path: Option<&str>) -> Result<SimConfig, String> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    toml::from_str(&text).map_err(|e| format!("{}: {}", path, e))
}

fn apply_start(start: &StartConfig) -> Result<(), String> {
    for (mnemonic, parameter) in [
        ("SG", start.timezone.as_str()),
        ("SC", start.date.as_str()),
        ("SL", start.time.as_str()),
    ] {
        match CLOCK.command(mnemonic, parameter) {
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(format!("[start] {}{}: {}", mnemonic, parameter, e)),
            None => return Err(format!("[start] {}: unknown command", mnemonic)),
        }
    }
    Ok(())
}

/// Answer every `:body#` frame found in `line`.
fn answer(line: &str, out: &mut impl Write) -> io::Result<()> {
    for frame in line.split('#') {
        let Some(start) = frame.find(':') else {
            continue;
        };
        let body = &frame[start + 1..];

        match CLOCK.execute(body) {
            Some(Ok(response)) if response.numeric => write!(out, "1")?,
            Some(Ok(response)) => write!(out, "{}#", response.as_str())?,
            Some(Err(e)) => {
                eprintln!("clock-sim: {}: {} (code {})", body, e, e.code());
                write!(out, "0")?;
            }
            None => eprintln!("clock-sim: {}: not a clock command", body),
        }
    }
    writeln!(out)?;
    out.flush()
}

fn main() {
    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref()).unwrap_or_else(|e| {
        eprintln!("clock-sim: {}", e);
        process::exit(1);
    });

    let site = Site::from_degrees(config.site.longitude, config.site.latitude);
    if let Err(e) = CLOCK.init(&mut ThreadScheduler, clock_tick, site) {
        eprintln!("clock-sim: {}", e);
        process::exit(1);
    }

    if let Some(start) = &config.start {
        if let Err(e) = apply_start(start) {
            eprintln!("clock-sim: {}", e);
            process::exit(1);
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if answer(&line, &mut stdout).is_err() {
            break;
        }
    }
}
