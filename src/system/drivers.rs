//! Driver traits
//!
//! The coordination core never touches pins. The binary implements these
//! traits on top of the RP2350 peripherals; the tests implement them with
//! recorders.
#![allow(async_fn_in_trait)]

use crate::system::command::Rgbw;
use crate::system::error::SensorError;
use crate::system::glyph::{Glyph, Side};
use crate::system::mode::Inputs;

/// Two-digit seven-segment display
pub trait DigitDriver {
    /// Light `glyph` on `side`, with that side's common cathode enabled and the other one disabled
    fn render(&mut self, side: Side, glyph: Glyph);
}

/// Stepper positioner
pub trait MotorDriver {
    /// Advance by `count` steps; the sign selects the direction
    async fn step(&mut self, count: i32);
}

/// Addressable RGBW strip
pub trait StripDriver {
    fn set_pixel(&mut self, index: usize, color: Rgbw);

    /// Push the staged pixel values out to the strip
    async fn commit(&mut self);
}

/// Temperature and humidity sensor
pub trait Sensor {
    /// Whole degrees Celsius
    async fn read_temperature(&mut self) -> Result<i32, SensorError>;

    /// Whole percent relative humidity
    async fn read_humidity(&mut self) -> Result<i32, SensorError>;
}

/// Switch bank and push buttons
pub trait InputBank {
    fn read(&mut self) -> Inputs;
}
