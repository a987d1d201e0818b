//! Logging abstraction
//!
//! Library code logs through these macros so the same call sites work on
//! every target:
//! - `defmt` feature: forwards to `defmt` (RTT on the board)
//! - Host tests: `println!`
//! - Host non-test: arguments are evaluated by reference and dropped
//!
//! Arguments must implement both `core::fmt::Display` and `defmt::Format`.

/// Log informational message
macro_rules! log_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($fmt $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!(concat!("[INFO] ", $fmt) $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($(&$arg,)*);
    }};
}

/// Log warning message
macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($fmt $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!(concat!("[WARN] ", $fmt) $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($(&$arg,)*);
    }};
}

/// Log debug message
macro_rules! log_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($fmt $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!(concat!("[DEBUG] ", $fmt) $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($(&$arg,)*);
    }};
}
