//! Compile-time configuration
//!
//! Queue depths, mechanical constants and the timing profile used by every task.
//! There is no runtime configuration source; the firmware uses [`Timing::default`]
//! and the tests build their own, much shorter, profile.

use embassy_time::Duration;

/// Depth of each of the two digit queues (left, right)
pub const DIGIT_QUEUE_DEPTH: usize = 5;

/// Depth of the step queue
pub const STEP_QUEUE_DEPTH: usize = 2;

/// Depth of the pixel command queue
pub const PIXEL_QUEUE_DEPTH: usize = 4;

/// Number of pixels on the strip
pub const STRIP_LEN: usize = 4;

/// Global strip brightness applied by the strip adapter (0-255)
pub const STRIP_BRIGHTNESS: u8 = 25;

/// Steps in one full revolution of the positioner (28BYJ-48 geared output)
pub const FULL_REVOLUTION: u32 = 2048;

/// Coil levels (IN1..IN4) of the full-step sequence, stepped forward for clockwise
pub const COIL_SEQUENCE: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// Time between two coil phases of the stepper
pub const STEP_INTERVAL: Duration = Duration::from_millis(2);

/// Humidity readings further apart than this are treated as drifting
pub const HUMIDITY_BAND: i32 = 2;

/// Frames in one color-cycle pass
pub const COLOR_CYCLE_FRAMES: u16 = 256;

/// Frames in each half (rise, fall) of one pulse-fade pass
pub const PULSE_HALF_FRAMES: u16 = 256;

/// Delays used by the tasks.
///
/// Kept in one value so a whole profile can be swapped at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long each rendered digit stays lit before the next one is drawn
    pub digit_dwell: Duration,
    /// Delay between two steps of a burst, while the shared token is released
    pub step_tick: Duration,
    /// Gap between the two sensor samples that are compared
    pub sample_gap: Duration,
    /// Poll interval while the primary button is held
    pub blank_poll: Duration,
    /// Hold time of each phase of the alert flash
    pub alert_phase: Duration,
    /// Settle delay of the digit queue health check
    pub overflow_settle: Duration,
    /// Animation frame period and dwell after each pixel command
    pub frame: Duration,
    /// Pause between two dispatcher iterations
    pub idle_poll: Duration,
    /// Switch sampling period while an animation runs
    pub input_poll: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            digit_dwell: Duration::from_millis(5),
            step_tick: Duration::from_millis(2),
            sample_gap: Duration::from_millis(500),
            blank_poll: Duration::from_millis(500),
            alert_phase: Duration::from_millis(500),
            overflow_settle: Duration::from_secs(5),
            frame: Duration::from_millis(15),
            idle_poll: Duration::from_millis(20),
            input_poll: Duration::from_millis(1),
        }
    }
}
