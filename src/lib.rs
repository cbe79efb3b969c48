//! Multi-peripheral switchboard controller
//!
//! A mode dispatcher reads a switch bank and drives three consumers over
//! bounded queues: a two-digit display, a stepper positioner and an RGBW strip.
//! This library holds everything that does not touch a pin, so it builds and
//! runs its tests on the host; the firmware binary binds it to the RP2350.
#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible to every module below
mod fmt;

pub mod config;
pub mod system;
pub mod task;
