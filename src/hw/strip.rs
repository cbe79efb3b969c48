//! WS2812 strip adapter
//!
//! Drives the strip through the PIO WS2812 program. The strip only has RGB
//! emitters, so the white channel is added onto all three colors. Global
//! brightness is applied here, on commit.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{Instance, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use smart_leds::{brightness, RGB8};
use switchboard::config::{STRIP_BRIGHTNESS, STRIP_LEN};
use switchboard::system::command::Rgbw;
use switchboard::system::drivers::StripDriver;

use super::resources::{Irqs, StripResources};

pub struct Ws2812Strip<'d, P: Instance, const S: usize> {
    driver: PioWs2812<'d, P, S, STRIP_LEN>,
    staged: [RGB8; STRIP_LEN],
}

impl Ws2812Strip<'static, PIO0, 0> {
    pub fn new(r: StripResources) -> Self {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(r.pio, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let driver = PioWs2812::new(&mut common, sm0, r.dma, r.data_pin, &program);
        Self {
            driver,
            staged: [RGB8::default(); STRIP_LEN],
        }
    }
}

fn fold_white(color: Rgbw) -> RGB8 {
    RGB8::new(
        color.r.saturating_add(color.w),
        color.g.saturating_add(color.w),
        color.b.saturating_add(color.w),
    )
}

impl<P: Instance, const S: usize> StripDriver for Ws2812Strip<'_, P, S> {
    fn set_pixel(&mut self, index: usize, color: Rgbw) {
        if let Some(pixel) = self.staged.get_mut(index) {
            *pixel = fold_white(color);
        }
    }

    async fn commit(&mut self) {
        let mut frame = [RGB8::default(); STRIP_LEN];
        let dimmed = brightness(self.staged.iter().copied(), STRIP_BRIGHTNESS);
        for (out, pixel) in frame.iter_mut().zip(dimmed) {
            *out = pixel;
        }
        self.driver.write(&frame).await;
    }
}
