//! Logging shim.
//!
//! The firmware logs through `defmt` (RTT transport). Host builds of the
//! library, which is what the test-suite exercises, route the same call sites
//! to the `log` facade so no defmt global logger is needed at link time.
#![macro_use]
#![allow(unused_macros)]

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::info!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        ::log::info!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        ::log::warn!($($arg)*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::error!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        ::log::error!($($arg)*);
    }};
}
