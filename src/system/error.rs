//! Error types
//!
//! The coordination core has almost no failure paths: full queues are
//! recovered in place and channel receives cannot fail. What remains are
//! sensor reads, which real hardware can get wrong, and conversions from raw
//! codes into the command enums.

use core::fmt;

/// A sensor sample could not be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum SensorError {
    /// The bus transaction failed
    Bus,
    /// The conversion did not finish in time
    NotReady,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "sensor bus transaction failed"),
            Self::NotReady => write!(f, "sensor conversion not ready"),
        }
    }
}

/// A raw code does not name a known command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum DecodeError {
    /// Glyph codes run from 0 to 19
    InvalidGlyph(u8),
    /// Pixel command codes run from 0 to 11
    InvalidPixelCommand(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGlyph(code) => write!(f, "no glyph with code {code}"),
            Self::InvalidPixelCommand(code) => write!(f, "no pixel command with code {code}"),
        }
    }
}
