//! 28BYJ-48 stepper adapter
//!
//! Full-step drive over four GPIO coil lines. The coil phase is kept between
//! calls so consecutive single steps continue the sequence.

use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;
use switchboard::config::{COIL_SEQUENCE, STEP_INTERVAL};
use switchboard::system::drivers::MotorDriver;

use super::resources::StepperResources;

pub struct Stepper<'d> {
    coils: [Output<'d>; 4],
    phase: usize,
}

impl Stepper<'static> {
    pub fn new(r: StepperResources) -> Self {
        Self {
            coils: [
                Output::new(r.in1, Level::Low),
                Output::new(r.in2, Level::Low),
                Output::new(r.in3, Level::Low),
                Output::new(r.in4, Level::Low),
            ],
            phase: 0,
        }
    }
}

impl Stepper<'_> {
    fn energize(&mut self) {
        for (coil, on) in self.coils.iter_mut().zip(COIL_SEQUENCE[self.phase]) {
            coil.set_level(Level::from(on));
        }
    }
}

impl MotorDriver for Stepper<'_> {
    async fn step(&mut self, count: i32) {
        let phases = COIL_SEQUENCE.len();
        for _ in 0..count.unsigned_abs() {
            self.phase = if count > 0 {
                (self.phase + 1) % phases
            } else {
                (self.phase + phases - 1) % phases
            };
            self.energize();
            Timer::after(STEP_INTERVAL).await;
        }
    }
}
