//! Digit display glyphs
//!
//! The display has two digits. Every refresh draws one glyph on the left digit
//! and one on the right, so the dispatcher always talks in [`GlyphPair`]s.

use crate::system::error::DecodeError;

/// Which half of the display a glyph is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// One renderable symbol, codes 0 to 19
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Glyph {
    /// Decimal digit 0-9
    Digit(u8),
    /// Hex letter A-F, stored as 10-15
    Hex(u8),
    L,
    R,
    DecimalPoint,
    /// Dash, also used as the blank/error symbol
    Dash,
}

impl Glyph {
    /// Raw glyph code handed to the digit driver
    pub const fn code(self) -> u8 {
        match self {
            Self::Digit(d) => d,
            Self::Hex(h) => h,
            Self::L => 16,
            Self::R => 17,
            Self::DecimalPoint => 18,
            Self::Dash => 19,
        }
    }

    /// Lit segments, bit 0 = a through bit 6 = g, bit 7 = decimal point
    pub const fn segments(self) -> u8 {
        SEGMENTS[self.code() as usize]
    }
}

#[rustfmt::skip]
const SEGMENTS: [u8; 20] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, // 0-9
    0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,                         // A-F
    0x38, // L
    0x50, // r
    0x80, // decimal point
    0x40, // dash
];

impl TryFrom<u8> for Glyph {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0..=9 => Ok(Self::Digit(code)),
            10..=15 => Ok(Self::Hex(code)),
            16 => Ok(Self::L),
            17 => Ok(Self::R),
            18 => Ok(Self::DecimalPoint),
            19 => Ok(Self::Dash),
            _ => Err(DecodeError::InvalidGlyph(code)),
        }
    }
}

/// Left and right glyph of one display refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct GlyphPair {
    pub left: Glyph,
    pub right: Glyph,
}

impl GlyphPair {
    pub const fn new(left: Glyph, right: Glyph) -> Self {
        Self { left, right }
    }
}

/// Mode labels shown while a sensor-family handler runs
pub mod label {
    use super::{Glyph, GlyphPair};

    pub const TEMPERATURE: GlyphPair = GlyphPair::new(Glyph::Digit(0), Glyph::Dash);
    pub const HUMIDITY: GlyphPair = GlyphPair::new(Glyph::Digit(1), Glyph::R);
    pub const ROTATE_CW: GlyphPair = GlyphPair::new(Glyph::Digit(2), Glyph::R);
    pub const ROTATE_CCW: GlyphPair = GlyphPair::new(Glyph::Digit(3), Glyph::L);
    pub const SWEEP_OUT: GlyphPair = GlyphPair::new(Glyph::Digit(4), Glyph::R);
    pub const SWEEP_BACK: GlyphPair = GlyphPair::new(Glyph::Digit(4), Glyph::L);
    pub const STOP: GlyphPair = GlyphPair::new(Glyph::Digit(5), Glyph::Dash);
    /// "OF", shown while the digit queues recover from an overflow
    pub const OVERFLOW: GlyphPair = GlyphPair::new(Glyph::Digit(0), Glyph::Hex(15));
}
