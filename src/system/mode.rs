//! Mode decoding
//!
//! Turning the switch bank into behavior happens in three steps:
//! 1. the binary samples pins into an [`Inputs`] value,
//! 2. [`Inputs::decode`] reduces that to a [`Selection`], the value that is
//!    compared between iterations and published to running animations,
//! 3. [`SensorMode::from_code`] / [`LedMode::from_code`] look the selection up
//!    in a fixed table of handlers, which the dispatcher then executes.
//!
//! # Switch bank
//! - DIP1..DIP4: sensor sub-code, DIP1 is the most significant bit
//! - DIP5: sensor-mode line, asserted when low
//! - DIP6..DIP8: LED sub-code, DIP6 is the most significant bit

use crate::system::command::{Direction, PixelCommand};
use crate::system::glyph::{label, GlyphPair};

/// Bit of DIP5 in the raw switch bank
const SENSOR_LINE: u8 = 1 << 4;

/// One sample of the switch bank and push buttons
///
/// `bank` holds the pin level of DIP1 in bit 0 through DIP8 in bit 7
/// (set = high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Inputs {
    pub bank: u8,
    /// Primary button (blanks the strip while held)
    pub primary: bool,
    /// Secondary button (alert flash in the red LED mode)
    pub secondary: bool,
}

impl Inputs {
    /// Bank with the sensor-mode line asserted and the given 4-bit sub-code
    pub const fn sensor(code: u8) -> Self {
        let mut bank = 0;
        let mut bit = 0;
        while bit < 4 {
            // DIP1 carries bit 3 of the code
            if code & (1 << (3 - bit)) != 0 {
                bank |= 1 << bit;
            }
            bit += 1;
        }
        Self {
            bank,
            primary: false,
            secondary: false,
        }
    }

    /// Bank with the sensor-mode line released and the given 3-bit LED sub-code
    pub const fn lighting(code: u8) -> Self {
        let mut bank = SENSOR_LINE;
        let mut bit = 0;
        while bit < 3 {
            // DIP6 carries bit 2 of the code
            if code & (1 << (2 - bit)) != 0 {
                bank |= 1 << (5 + bit);
            }
            bit += 1;
        }
        Self {
            bank,
            primary: false,
            secondary: false,
        }
    }

    pub const fn with_primary(mut self, held: bool) -> Self {
        self.primary = held;
        self
    }

    pub const fn with_secondary(mut self, held: bool) -> Self {
        self.secondary = held;
        self
    }

    fn dip(&self, index: u8) -> bool {
        self.bank & (1 << (index - 1)) != 0
    }

    /// 4-bit code read from DIP1..DIP4
    pub fn sensor_code(&self) -> u8 {
        (1..=4).fold(0, |code, dip| (code << 1) | u8::from(self.dip(dip)))
    }

    /// 3-bit code read from DIP6..DIP8
    pub fn led_code(&self) -> u8 {
        (6..=8).fold(0, |code, dip| (code << 1) | u8::from(self.dip(dip)))
    }

    /// Whether the sensor-mode line is asserted (DIP5 low)
    pub fn sensor_mode(&self) -> bool {
        self.bank & SENSOR_LINE == 0
    }

    /// Reduces the raw sample to the behavior it selects
    pub fn decode(&self) -> Selection {
        if self.sensor_mode() {
            Selection::Sensor(self.sensor_code())
        } else if self.primary {
            Selection::Blank
        } else {
            let code = self.led_code();
            Selection::Lighting {
                code,
                // the secondary button only means something in the red mode
                alert: code == 0 && self.secondary,
            }
        }
    }
}

/// Behavior selected by one input sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Selection {
    /// Sensor-mode line asserted, 4-bit sub-code
    Sensor(u8),
    /// LED family with the primary button held
    Blank,
    /// LED family, 3-bit sub-code
    Lighting { code: u8, alert: bool },
}

/// Handlers of the sensor-mode family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum SensorMode {
    /// Burst counter-clockwise by the settled temperature
    Temperature,
    /// Burst clockwise by the humidity reading
    Humidity,
    /// One revolution in a fixed direction
    Rotate(Direction),
    /// One revolution clockwise, then one back
    Sweep,
    /// No motion, digit queue health check
    Stop,
}

const SENSOR_MODES: [SensorMode; 16] = [
    SensorMode::Temperature,                         // 0000
    SensorMode::Stop,                                // 0001
    SensorMode::Rotate(Direction::CounterClockwise), // 0010
    SensorMode::Stop,                                // 0011
    SensorMode::Rotate(Direction::Clockwise),        // 0100
    SensorMode::Stop,                                // 0101
    SensorMode::Sweep,                               // 0110
    SensorMode::Stop,                                // 0111
    SensorMode::Humidity,                            // 1000
    SensorMode::Stop,                                // 1001
    SensorMode::Rotate(Direction::CounterClockwise), // 1010
    SensorMode::Stop,                                // 1011
    SensorMode::Rotate(Direction::Clockwise),        // 1100
    SensorMode::Stop,                                // 1101
    SensorMode::Sweep,                               // 1110
    SensorMode::Stop,                                // 1111
];

impl SensorMode {
    pub const fn from_code(code: u8) -> Self {
        SENSOR_MODES[(code & 0x0F) as usize]
    }

    /// Glyph pair shown when the handler is entered
    pub const fn label(self) -> GlyphPair {
        match self {
            Self::Temperature => label::TEMPERATURE,
            Self::Humidity => label::HUMIDITY,
            Self::Rotate(Direction::Clockwise) => label::ROTATE_CW,
            Self::Rotate(Direction::CounterClockwise) => label::ROTATE_CCW,
            Self::Sweep => label::SWEEP_OUT,
            Self::Stop => label::STOP,
        }
    }
}

/// Handlers of the LED family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum LedMode {
    /// Single command, fire and forget
    Static(PixelCommand),
    /// Three-phase alert flash sequenced by the dispatcher
    Alert,
    /// Long-running, cancellable command
    Animation(PixelCommand),
}

const LED_MODES: [PixelCommand; 8] = [
    PixelCommand::Red,
    PixelCommand::Green,
    PixelCommand::Blue,
    PixelCommand::White,
    PixelCommand::MultiColor,
    PixelCommand::BrightnessRamp,
    PixelCommand::PulseFade,
    PixelCommand::ColorCycle,
];

impl LedMode {
    pub fn from_code(code: u8, alert: bool) -> Self {
        let command = LED_MODES[usize::from(code & 0x07)];
        if command.is_animation() {
            Self::Animation(command)
        } else if alert && command == PixelCommand::Red {
            Self::Alert
        } else {
            Self::Static(command)
        }
    }
}
