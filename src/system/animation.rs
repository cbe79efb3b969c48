//! Strip patterns and frame-stepped animations
//!
//! Static commands map to a single [`Frame`]. The two animated commands are
//! iterators that yield one frame per step; the pixel task commits each frame
//! and checks for cancellation between frames, so an animation never has to
//! know how it gets stopped.

use crate::config::{COLOR_CYCLE_FRAMES, PULSE_HALF_FRAMES, STRIP_LEN};
use crate::system::command::{PixelCommand, Rgbw};

/// Colors of every pixel on the strip
pub type Frame = [Rgbw; STRIP_LEN];

/// Frame for a single-shot command, `None` for the animations
pub fn pattern(command: PixelCommand) -> Option<Frame> {
    let off = Rgbw::OFF;
    let red = Rgbw::RED;
    let frame = match command {
        PixelCommand::Red => [red; STRIP_LEN],
        PixelCommand::Green => [Rgbw::GREEN; STRIP_LEN],
        PixelCommand::Blue => [Rgbw::BLUE; STRIP_LEN],
        PixelCommand::White => [Rgbw::WHITE; STRIP_LEN],
        PixelCommand::MultiColor => [red, Rgbw::GREEN, Rgbw::BLUE, Rgbw::WHITE],
        PixelCommand::BrightnessRamp => [
            Rgbw::new(63, 0, 0, 0),
            Rgbw::new(128, 0, 0, 0),
            Rgbw::new(191, 0, 0, 0),
            red,
        ],
        PixelCommand::AlertOne => [red, off, off, off],
        PixelCommand::AlertTwo => [red, red, off, off],
        PixelCommand::AlertThree => [red, red, red, off],
        PixelCommand::Wipe => [off; STRIP_LEN],
        PixelCommand::ColorCycle | PixelCommand::PulseFade => return None,
    };
    Some(frame)
}

/// Classic color wheel, red to green to blue and back to red
pub fn wheel(position: u8) -> Rgbw {
    let position = 255 - position;
    if position < 85 {
        Rgbw::new(255 - position * 3, 0, position * 3, 0)
    } else if position < 170 {
        let position = position - 85;
        Rgbw::new(0, position * 3, 255 - position * 3, 0)
    } else {
        let position = position - 170;
        Rgbw::new(position * 3, 255 - position * 3, 0, 0)
    }
}

/// Perceptual brightness correction, gamma 2.8
pub fn gamma(level: u8) -> u8 {
    let normalized = f32::from(level) / 255.0;
    (libm::powf(normalized, 2.8) * 255.0 + 0.5) as u8
}

/// Rainbow spread over the strip, rotated one wheel position per frame
#[derive(Debug, Clone)]
pub struct ColorCycle {
    frame: u16,
}

impl ColorCycle {
    pub const fn new() -> Self {
        Self { frame: 0 }
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ColorCycle {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.frame >= COLOR_CYCLE_FRAMES {
            return None;
        }
        let mut frame = [Rgbw::OFF; STRIP_LEN];
        for (index, pixel) in frame.iter_mut().enumerate() {
            let offset = index * 256 / STRIP_LEN + usize::from(self.frame);
            *pixel = wheel((offset & 0xFF) as u8);
        }
        self.frame += 1;
        Some(frame)
    }
}

/// White channel breathing up then down through the gamma curve
#[derive(Debug, Clone)]
pub struct PulseFade {
    step: u16,
}

impl PulseFade {
    pub const fn new() -> Self {
        Self { step: 0 }
    }

    fn level(&self) -> u8 {
        let level = if self.step < PULSE_HALF_FRAMES {
            self.step
        } else {
            2 * PULSE_HALF_FRAMES - 1 - self.step
        };
        level.min(255) as u8
    }
}

impl Default for PulseFade {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PulseFade {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step >= 2 * PULSE_HALF_FRAMES {
            return None;
        }
        let white = gamma(self.level());
        self.step += 1;
        Some([Rgbw::new(0, 0, 0, white); STRIP_LEN])
    }
}

/// One of the two cancellable animations
#[derive(Debug, Clone)]
pub enum Animation {
    ColorCycle(ColorCycle),
    PulseFade(PulseFade),
}

impl Animation {
    pub fn for_command(command: PixelCommand) -> Option<Self> {
        match command {
            PixelCommand::ColorCycle => Some(Self::ColorCycle(ColorCycle::new())),
            PixelCommand::PulseFade => Some(Self::PulseFade(PulseFade::new())),
            _ => None,
        }
    }
}

impl Iterator for Animation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        match self {
            Self::ColorCycle(cycle) => cycle.next(),
            Self::PulseFade(pulse) => pulse.next(),
        }
    }
}
