//! Commands carried by the step and pixel queues

use crate::system::error::DecodeError;

/// Rotation direction of the positioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Direction {
    /// One step clockwise, +1 on the step queue
    Clockwise,
    /// One step counter-clockwise, -1 on the step queue
    CounterClockwise,
}

impl Direction {
    /// The single-step command pushed for this direction
    pub const fn unit(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }
}

/// One RGBW pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const OFF: Self = Self::new(0, 0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0, 0);
    pub const BLUE: Self = Self::new(0, 0, 255, 0);
    pub const WHITE: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }
}

/// Work item for the pixel task, codes 0 to 11
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PixelCommand {
    Red,
    Green,
    Blue,
    White,
    /// Red, green, blue, white on consecutive pixels
    MultiColor,
    /// Red at four brightness levels
    BrightnessRamp,
    /// Cancellable rainbow animation
    ColorCycle,
    /// Alert flash phase with one lit pixel
    AlertOne,
    /// Alert flash phase with two lit pixels
    AlertTwo,
    /// Alert flash phase with three lit pixels
    AlertThree,
    /// Turn every pixel off
    Wipe,
    /// Cancellable white breathing animation
    PulseFade,
}

impl PixelCommand {
    /// Whether the command runs a frame loop that can be interrupted
    pub const fn is_animation(self) -> bool {
        matches!(self, Self::ColorCycle | Self::PulseFade)
    }
}

impl TryFrom<u8> for PixelCommand {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Red,
            1 => Self::Green,
            2 => Self::Blue,
            3 => Self::White,
            4 => Self::MultiColor,
            5 => Self::BrightnessRamp,
            6 => Self::ColorCycle,
            7 => Self::AlertOne,
            8 => Self::AlertTwo,
            9 => Self::AlertThree,
            10 => Self::Wipe,
            11 => Self::PulseFade,
            _ => return Err(DecodeError::InvalidPixelCommand(code)),
        })
    }
}

/// Result of an animation, reported back to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PixelOutcome {
    /// Ran every frame
    Completed,
    /// Stopped early because the mode selection changed
    Interrupted,
}
