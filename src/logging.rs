//! Logging macros.
//!
//! - `defmt` feature: forwards to `defmt`
//! - Unit tests: prints to stdout
//! - Otherwise: no-op (arguments are still type-checked)

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::info!($($arg)*);

        #[cfg(test)]
        {
            extern crate std;
            std::println!("[INFO] {}", format_args!($($arg)*));
        }

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::warn!($($arg)*);

        #[cfg(test)]
        {
            extern crate std;
            std::println!("[WARN] {}", format_args!($($arg)*));
        }

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::error!($($arg)*);

        #[cfg(test)]
        {
            extern crate std;
            std::eprintln!("[ERROR] {}", format_args!($($arg)*));
        }

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::debug!($($arg)*);

        #[cfg(test)]
        {
            extern crate std;
            std::println!("[DEBUG] {}", format_args!($($arg)*));
        }

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = format_args!($($arg)*);
    }};
}
