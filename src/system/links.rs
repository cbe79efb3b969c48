//! Inter-task links
//!
//! Everything the four tasks share lives in one [`Links`] value, built once at
//! startup and handed to each task by reference:
//! - two digit queues (left, right), always fed in pairs
//! - the step queue, one entry per physical step
//! - the pixel command queue
//! - the shared token, serializing a display refresh against a burst tick
//! - the animation outcome, reported by the pixel task
//! - the selection an animation was launched for and the current one, published
//!   by the dispatcher while the animation runs
//!
//! The token guards timing, not data: it wraps `()`.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_sync::signal::Signal;
use embassy_time::Timer;

use crate::config::{Timing, DIGIT_QUEUE_DEPTH, PIXEL_QUEUE_DEPTH, STEP_QUEUE_DEPTH};
use crate::system::command::{PixelCommand, PixelOutcome};
use crate::system::glyph::{label, Glyph, GlyphPair};
use crate::system::mode::Selection;

/// Queue of glyphs for one display half
pub type DigitQueue = Channel<CriticalSectionRawMutex, Glyph, DIGIT_QUEUE_DEPTH>;

/// Queue of signed step counts
pub type StepQueue = Channel<CriticalSectionRawMutex, i32, STEP_QUEUE_DEPTH>;

/// Queue of pixel commands
pub type PixelQueue = Channel<CriticalSectionRawMutex, PixelCommand, PIXEL_QUEUE_DEPTH>;

/// Proof of holding the shared token; dropping it releases the token
pub type Token<'a> = MutexGuard<'a, CriticalSectionRawMutex, ()>;

#[derive(Clone, Copy)]
struct Snapshot {
    launched: Option<Selection>,
    current: Option<Selection>,
}

pub struct Links {
    pub left: DigitQueue,
    pub right: DigitQueue,
    pub steps: StepQueue,
    pub pixels: PixelQueue,
    token: Mutex<CriticalSectionRawMutex, ()>,
    outcome: Signal<CriticalSectionRawMutex, PixelOutcome>,
    snapshot: BlockingMutex<CriticalSectionRawMutex, Cell<Snapshot>>,
    changed: Signal<CriticalSectionRawMutex, ()>,
}

impl Links {
    pub const fn new() -> Self {
        Self {
            left: Channel::new(),
            right: Channel::new(),
            steps: Channel::new(),
            pixels: Channel::new(),
            token: Mutex::new(()),
            outcome: Signal::new(),
            snapshot: BlockingMutex::new(Cell::new(Snapshot {
                launched: None,
                current: None,
            })),
            changed: Signal::new(),
        }
    }

    /// Queues one display refresh.
    ///
    /// A full digit queue is not waited out: both queues are reset, the
    /// overflow pair is shown for the settle delay, then `pair` is queued.
    pub async fn show(&self, pair: GlyphPair, timing: &Timing) {
        if self.digits_full() {
            self.recover_digits(timing).await;
        }
        self.left.send(pair.left).await;
        self.right.send(pair.right).await;
    }

    /// Settle window of the stop handler, recovering the digit queues first if they are full
    pub async fn check_health(&self, timing: &Timing) {
        if self.digits_full() {
            self.recover_digits(timing).await;
        } else {
            Timer::after(timing.overflow_settle).await;
        }
    }

    fn digits_full(&self) -> bool {
        self.left.is_full() || self.right.is_full()
    }

    /// Resets both digit queues under the token.
    ///
    /// The display takes its left glyph before the token, so it may be holding
    /// one whose right half is still queued. That right glyph survives the
    /// reset to keep the halves paired.
    async fn recover_digits(&self, timing: &Timing) {
        let token = self.take_token().await;
        warn!(
            "digit queues full ({}/{}), resetting",
            self.left.len(),
            self.right.len()
        );
        let pending = if self.right.len() > self.left.len() {
            self.right.try_receive().ok()
        } else {
            None
        };
        self.left.clear();
        self.right.clear();
        if let Some(glyph) = pending {
            let _ = self.right.try_send(glyph);
        }
        let _ = self.left.try_send(label::OVERFLOW.left);
        let _ = self.right.try_send(label::OVERFLOW.right);
        drop(token);
        Timer::after(timing.overflow_settle).await;
    }

    /// Waits for the shared token
    pub async fn take_token(&self) -> Token<'_> {
        self.token.lock().await
    }

    /// Records the selection an animation is started for.
    ///
    /// Forgets any outcome or change left over from an earlier animation.
    pub fn launch(&self, selection: Selection) {
        self.outcome.reset();
        self.changed.reset();
        self.snapshot.lock(|cell| {
            cell.set(Snapshot {
                launched: Some(selection),
                current: Some(selection),
            })
        });
    }

    /// Called by the pixel task when an animation ends
    pub fn report(&self, outcome: PixelOutcome) {
        self.outcome.signal(outcome);
    }

    /// Waits for the pixel task to report an animation outcome
    pub async fn outcome(&self) -> PixelOutcome {
        self.outcome.wait().await
    }

    /// Updates the current selection, waking a waiting animation if it moved
    pub fn publish(&self, selection: Selection) {
        let moved = self.snapshot.lock(|cell| {
            let mut snapshot = cell.get();
            let moved = snapshot.current != Some(selection);
            snapshot.current = Some(selection);
            cell.set(snapshot);
            moved
        });
        if moved {
            self.changed.signal(());
        }
    }

    /// Latest published selection
    pub fn selection(&self) -> Option<Selection> {
        self.snapshot.lock(|cell| cell.get().current)
    }

    /// Selection passed to the last [`Links::launch`]
    pub fn launched(&self) -> Option<Selection> {
        self.snapshot.lock(|cell| cell.get().launched)
    }

    /// Resolves once a published selection differs from the one before it
    pub async fn selection_changed(&self) {
        self.changed.wait().await
    }
}

impl Default for Links {
    fn default() -> Self {
        Self::new()
    }
}
