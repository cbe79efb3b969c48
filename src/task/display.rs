//! Display Task
//!
//! Drives the two-digit seven-segment display from the left and right digit
//! queues. One refresh always draws the left glyph before the right one, and
//! the whole refresh happens while holding the shared token so it never
//! overlaps a burst tick of the dispatcher.

use embassy_time::Timer;

use crate::config::Timing;
use crate::system::drivers::DigitDriver;
use crate::system::glyph::Side;
use crate::system::links::Links;

/// Draws one glyph pair.
///
/// Waits for a left glyph, takes the token, then waits for the matching right
/// glyph. Each glyph stays lit for `digit_dwell`. The dispatcher always queues
/// pairs, so the wait for the right glyph is short.
pub async fn refresh<D: DigitDriver>(links: &Links, digits: &mut D, timing: &Timing) {
    let left = links.left.receive().await;
    let _token = links.take_token().await;

    digits.render(Side::Left, left);
    Timer::after(timing.digit_dwell).await;

    let right = links.right.receive().await;
    digits.render(Side::Right, right);
    Timer::after(timing.digit_dwell).await;
}

/// Refreshes the display forever
pub async fn run<D: DigitDriver>(links: &Links, mut digits: D, timing: Timing) {
    info!("Display task started");
    loop {
        refresh(links, &mut digits, &timing).await;
    }
}
