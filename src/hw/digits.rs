//! Seven-segment display adapter
//!
//! Segments are shared by both digits; the common-cathode enable lines pick
//! which digit lights up. A digit is enabled by pulling its cathode low.

use embassy_rp::gpio::{Level, Output};
use switchboard::system::drivers::DigitDriver;
use switchboard::system::glyph::{Glyph, Side};

use super::resources::DisplayResources;

pub struct SegmentDisplay<'d> {
    /// a, b, c, d, e, f, g, dp
    segments: [Output<'d>; 8],
    left: Output<'d>,
    right: Output<'d>,
}

impl SegmentDisplay<'static> {
    pub fn new(r: DisplayResources) -> Self {
        Self {
            segments: [
                Output::new(r.seg_a, Level::Low),
                Output::new(r.seg_b, Level::Low),
                Output::new(r.seg_c, Level::Low),
                Output::new(r.seg_d, Level::Low),
                Output::new(r.seg_e, Level::Low),
                Output::new(r.seg_f, Level::Low),
                Output::new(r.seg_g, Level::Low),
                Output::new(r.seg_dp, Level::Low),
            ],
            // both digits dark until the first refresh
            left: Output::new(r.left_enable, Level::High),
            right: Output::new(r.right_enable, Level::High),
        }
    }
}

impl DigitDriver for SegmentDisplay<'_> {
    fn render(&mut self, side: Side, glyph: Glyph) {
        let (on, off) = match side {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        };
        off.set_high();
        on.set_low();

        let pattern = glyph.segments();
        for (bit, segment) in self.segments.iter_mut().enumerate() {
            segment.set_level(Level::from(pattern & (1 << bit) != 0));
        }
    }
}
