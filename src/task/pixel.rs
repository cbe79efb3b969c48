//! Pixel Task
//!
//! Executes pixel commands one at a time. Static commands paint a single
//! frame. The two animations run a frame loop that checks the published mode
//! selection before every frame and stop as soon as it moves away from the
//! selection the dispatcher launched them for. A published change also ends
//! the current frame wait early.
//!
//! Only animations report an outcome back to the dispatcher.

use embassy_futures::select::select;
use embassy_time::Timer;

use crate::config::Timing;
use crate::system::animation::{self, Animation, Frame};
use crate::system::command::{PixelCommand, PixelOutcome};
use crate::system::drivers::StripDriver;
use crate::system::links::Links;

async fn paint<S: StripDriver>(strip: &mut S, frame: &Frame) {
    for (index, color) in frame.iter().enumerate() {
        strip.set_pixel(index, *color);
    }
    strip.commit().await;
}

/// Runs one command to completion or interruption.
///
/// Returns the outcome for animations and `None` for single-shot commands.
pub async fn execute<S: StripDriver>(
    links: &Links,
    strip: &mut S,
    command: PixelCommand,
    timing: &Timing,
) -> Option<PixelOutcome> {
    if let Some(frame) = animation::pattern(command) {
        paint(strip, &frame).await;
        return None;
    }

    let frames = Animation::for_command(command)?;
    let launched = links.launched();
    for frame in frames {
        if links.selection() != launched {
            return Some(PixelOutcome::Interrupted);
        }
        paint(strip, &frame).await;
        select(Timer::after(timing.frame), links.selection_changed()).await;
    }
    if links.selection() != launched {
        return Some(PixelOutcome::Interrupted);
    }
    Some(PixelOutcome::Completed)
}

/// Takes commands off the pixel queue forever, with a one-frame dwell after each
pub async fn run<S: StripDriver>(links: &Links, mut strip: S, timing: Timing) {
    info!("Pixel task started");
    loop {
        let command = links.pixels.receive().await;
        debug!("pixel command {:?}", command);

        if let Some(outcome) = execute(links, &mut strip, command, &timing).await {
            debug!("animation {:?}: {:?}", command, outcome);
            links.report(outcome);
        }
        Timer::after(timing.frame).await;
    }
}
