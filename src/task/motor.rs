//! Motor Task
//!
//! Forwards the step queue to the positioner. The dispatcher pushes one unit
//! step per burst tick and this task issues each entry as its own motor
//! command, so a burst interleaves with everything else step by step.

use embassy_futures::yield_now;

use crate::system::drivers::MotorDriver;
use crate::system::links::Links;

/// Issues every queued step count to the motor, one dequeue per command
pub async fn run<M: MotorDriver>(links: &Links, mut motor: M) {
    info!("Motor task started");
    loop {
        let count = links.steps.receive().await;
        debug!("step {}", count);
        motor.step(count).await;
        yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::select;
    use embassy_time::{Duration, Timer};
    use std::cell::RefCell;

    struct Counter<'a>(&'a RefCell<Vec<i32>>);

    impl MotorDriver for Counter<'_> {
        async fn step(&mut self, count: i32) {
            self.0.borrow_mut().push(count);
        }
    }

    #[test]
    fn each_queue_entry_is_one_motor_command() {
        let links = Links::new();
        let issued = RefCell::new(Vec::new());

        let feed = async {
            for count in [1, 1, -1, 3] {
                links.steps.send(count).await;
            }
            Timer::after(Duration::from_millis(2)).await;
        };
        block_on(select(run(&links, Counter(&issued)), feed));

        assert_eq!(*issued.borrow(), vec![1, 1, -1, 3]);
    }
}
