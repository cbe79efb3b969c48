//! Mode Dispatcher
//!
//! The only task that makes decisions. Every iteration it samples the switch
//! bank, decodes it into a [`Selection`] and runs the matching handler:
//!
//! - sensor family: label the mode on the display, then either sample the
//!   sensor or run a step burst
//! - LED family: queue pixel commands, sequence the alert flash, or start an
//!   animation and wait for it to complete or be interrupted
//!
//! An interrupted animation or a released blanking button makes the next
//! iteration start right away; every other iteration is followed by
//! `idle_poll`.
//!
//! # Step bursts
//! A burst holds the shared token between ticks. Each tick pushes one unit
//! step, yields, releases the token for `step_tick`, then takes it back. Bursts
//! started by the rotate and sweep handlers re-read the switch bank before each
//! tick and end as soon as their code is no longer selected.

use embassy_futures::select::{select, Either};
use embassy_futures::yield_now;
use embassy_time::Timer;

use crate::config::{Timing, FULL_REVOLUTION};
use crate::system::command::{Direction, PixelCommand, PixelOutcome};
use crate::system::drivers::{InputBank, Sensor};
use crate::system::glyph::label;
use crate::system::hysteresis::{self, Trend};
use crate::system::links::Links;
use crate::system::mode::{LedMode, Selection, SensorMode};

/// Pixel commands of the alert flash, each held for `alert_phase`
const ALERT_SEQUENCE: [PixelCommand; 7] = [
    PixelCommand::AlertOne,
    PixelCommand::AlertTwo,
    PixelCommand::AlertThree,
    PixelCommand::Red,
    PixelCommand::AlertThree,
    PixelCommand::AlertTwo,
    PixelCommand::AlertOne,
];

/// What the main loop does after one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Tick {
    /// Pause for `idle_poll` before sampling again
    Done,
    /// Sample the inputs again immediately
    Reevaluate,
}

pub struct Dispatcher<'a, I, S> {
    links: &'a Links,
    inputs: I,
    sensor: S,
    timing: Timing,
    /// Last sensor-family code whose side effects ran
    previous: Option<u8>,
    /// Last selection written to the log
    announced: Option<Selection>,
}

impl<'a, I: InputBank, S: Sensor> Dispatcher<'a, I, S> {
    pub fn new(links: &'a Links, inputs: I, sensor: S, timing: Timing) -> Self {
        Self {
            links,
            inputs,
            sensor,
            timing,
            previous: None,
            announced: None,
        }
    }

    /// Loops over [`Dispatcher::tick`] forever
    pub async fn run(&mut self) {
        info!("Dispatcher started");
        loop {
            if self.tick().await == Tick::Done {
                Timer::after(self.timing.idle_poll).await;
            }
        }
    }

    /// One pass of sample, decode, handle
    pub async fn tick(&mut self) -> Tick {
        let selection = self.inputs.read().decode();
        if self.announced != Some(selection) {
            info!("mode {:?}", selection);
            self.announced = Some(selection);
        }

        match selection {
            Selection::Sensor(code) => {
                self.sensor_mode(code).await;
                Tick::Done
            }
            Selection::Blank => {
                self.previous = None;
                self.blank().await;
                Tick::Reevaluate
            }
            Selection::Lighting { code, alert } => {
                self.previous = None;
                self.lighting(selection, LedMode::from_code(code, alert)).await
            }
        }
    }

    async fn sensor_mode(&mut self, code: u8) {
        let mode = SensorMode::from_code(code);
        let fresh = self.previous != Some(code);
        self.previous = Some(code);

        self.links.show(mode.label(), &self.timing).await;

        match mode {
            SensorMode::Stop => {
                info!("Stop");
                self.links.check_health(&self.timing).await;
            }
            _ if !fresh => {}
            SensorMode::Temperature => self.temperature().await,
            SensorMode::Humidity => self.humidity().await,
            SensorMode::Rotate(direction) => {
                self.burst(direction, FULL_REVOLUTION, Some(code)).await;
            }
            SensorMode::Sweep => {
                let out = self.burst(Direction::Clockwise, FULL_REVOLUTION, Some(code)).await;
                if out == FULL_REVOLUTION {
                    self.links.show(label::SWEEP_BACK, &self.timing).await;
                    self.burst(Direction::CounterClockwise, FULL_REVOLUTION, Some(code))
                        .await;
                }
            }
        }
    }

    async fn temperature(&mut self) {
        let first = self.sensor.read_temperature().await;
        Timer::after(self.timing.sample_gap).await;
        let second = self.sensor.read_temperature().await;

        let trend = hysteresis::temperature(first, second);
        match trend {
            Trend::Settled(value) => {
                info!("T={}C", value);
                let bound = hysteresis::temperature_burst(trend);
                self.burst(Direction::CounterClockwise, bound, None).await;
            }
            Trend::Drifting(value) => info!("T={}C, not settled", value),
            Trend::Unavailable(e) => warn!("temperature unavailable: {}", e),
        }
    }

    async fn humidity(&mut self) {
        let first = self.sensor.read_humidity().await;
        Timer::after(self.timing.sample_gap).await;
        let second = self.sensor.read_humidity().await;

        let trend = hysteresis::humidity(first, second);
        match trend {
            Trend::Settled(value) => info!("RH={}%", value),
            Trend::Drifting(value) => info!("RH={}%, drifting", value),
            Trend::Unavailable(e) => {
                warn!("humidity unavailable: {}", e);
                return;
            }
        }
        let bound = hysteresis::humidity_burst(trend);
        self.burst(Direction::Clockwise, bound, None).await;
    }

    /// Pushes up to `bound` unit steps and returns how many went out.
    ///
    /// With an `origin` code the burst ends early once that code is no longer
    /// selected.
    async fn burst(&mut self, direction: Direction, bound: u32, origin: Option<u8>) -> u32 {
        let links = self.links;
        let step = direction.unit();
        debug!("burst {:?} x{}", direction, bound);

        let mut token = links.take_token().await;
        let mut sent = 0;
        while sent < bound {
            if let Some(code) = origin {
                if self.inputs.read().decode() != Selection::Sensor(code) {
                    info!("burst cut short after {} steps", sent);
                    break;
                }
            }
            links.steps.send(step).await;
            yield_now().await;
            drop(token);
            Timer::after(self.timing.step_tick).await;
            token = links.take_token().await;
            sent += 1;
        }
        sent
    }

    /// Wipes the strip and holds while the primary button stays down
    async fn blank(&mut self) {
        self.links.pixels.send(PixelCommand::Wipe).await;
        while self.inputs.read().decode() == Selection::Blank {
            Timer::after(self.timing.blank_poll).await;
        }
    }

    async fn lighting(&mut self, selection: Selection, mode: LedMode) -> Tick {
        match mode {
            LedMode::Static(command) => {
                self.links.pixels.send(command).await;
                Tick::Done
            }
            LedMode::Alert => {
                for command in ALERT_SEQUENCE {
                    self.links.pixels.send(command).await;
                    Timer::after(self.timing.alert_phase).await;
                }
                Tick::Done
            }
            LedMode::Animation(command) => match self.animate(selection, command).await {
                PixelOutcome::Completed => Tick::Done,
                PixelOutcome::Interrupted => Tick::Reevaluate,
            },
        }
    }

    /// Starts an animation and keeps the published selection current until it ends.
    ///
    /// The switches are sampled every `input_poll` for as long as the
    /// animation runs, including while it still waits in the pixel queue.
    async fn animate(&mut self, selection: Selection, command: PixelCommand) -> PixelOutcome {
        let links = self.links;
        links.launch(selection);
        links.pixels.send(command).await;

        let poll = self.timing.input_poll;
        let inputs = &mut self.inputs;
        let watch = async {
            loop {
                Timer::after(poll).await;
                links.publish(inputs.read().decode());
            }
        };

        let outcome = match select(links.outcome(), watch).await {
            Either::First(outcome) => outcome,
            Either::Second(_) => links.outcome().await,
        };
        if outcome == PixelOutcome::Interrupted {
            info!("{:?} interrupted", command);
        }
        outcome
    }
}

/// Runs the dispatcher forever
pub async fn run<I: InputBank, S: Sensor>(links: &Links, inputs: I, sensor: S, timing: Timing) {
    Dispatcher::new(links, inputs, sensor, timing).run().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::error::SensorError;
    use crate::system::mode::Inputs;
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    struct Switches<'a>(&'a Cell<Inputs>);

    impl InputBank for Switches<'_> {
        fn read(&mut self) -> Inputs {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct Readings {
        temperature: VecDeque<Result<i32, SensorError>>,
        humidity: VecDeque<Result<i32, SensorError>>,
    }

    impl Sensor for Readings {
        async fn read_temperature(&mut self) -> Result<i32, SensorError> {
            self.temperature.pop_front().unwrap_or(Err(SensorError::NotReady))
        }

        async fn read_humidity(&mut self) -> Result<i32, SensorError> {
            self.humidity.pop_front().unwrap_or(Err(SensorError::NotReady))
        }
    }

    fn timing() -> Timing {
        Timing {
            digit_dwell: Duration::from_micros(10),
            step_tick: Duration::from_micros(10),
            sample_gap: Duration::from_micros(100),
            blank_poll: Duration::from_micros(100),
            alert_phase: Duration::from_micros(50),
            overflow_settle: Duration::from_micros(200),
            frame: Duration::from_micros(20),
            idle_poll: Duration::from_micros(50),
            input_poll: Duration::from_micros(5),
        }
    }

    fn token_held(links: &Links) -> bool {
        embassy_futures::poll_once(links.take_token()).is_pending()
    }

    /// Runs one tick while draining the step queue; returns the tick result and the steps seen
    fn tick_collecting_steps<I: InputBank, S: Sensor>(
        links: &Links,
        dispatcher: &mut Dispatcher<'_, I, S>,
    ) -> (Tick, Vec<i32>) {
        let steps = RefCell::new(Vec::new());
        let drain = async {
            loop {
                let step = links.steps.receive().await;
                steps.borrow_mut().push(step);
            }
        };
        let tick = match block_on(select(dispatcher.tick(), drain)) {
            Either::First(tick) => tick,
            Either::Second(_) => unreachable!(),
        };
        while let Ok(step) = links.steps.try_receive() {
            steps.borrow_mut().push(step);
        }
        (tick, steps.into_inner())
    }

    #[test]
    fn settled_temperature_bursts_counter_clockwise_inclusive() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(0));
        let sensor = Readings {
            temperature: VecDeque::from([Ok(22), Ok(22)]),
            ..Readings::default()
        };
        let mut dispatcher = Dispatcher::new(&links, Switches(&switches), sensor, timing());

        let (tick, steps) = tick_collecting_steps(&links, &mut dispatcher);
        assert_eq!(tick, Tick::Done);
        assert_eq!(steps.len(), 23);
        assert!(steps.iter().all(|step| *step == -1));
        assert_eq!(links.left.try_receive(), Ok(label::TEMPERATURE.left));
        assert_eq!(links.right.try_receive(), Ok(label::TEMPERATURE.right));
        assert!(!token_held(&links));
    }

    #[test]
    fn unsettled_temperature_does_not_move() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(0));
        let sensor = Readings {
            temperature: VecDeque::from([Ok(22), Ok(23)]),
            ..Readings::default()
        };
        let mut dispatcher = Dispatcher::new(&links, Switches(&switches), sensor, timing());

        let (_, steps) = tick_collecting_steps(&links, &mut dispatcher);
        assert!(steps.is_empty());
    }

    #[test]
    fn failed_sensor_read_does_not_move() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(8));
        let sensor = Readings {
            humidity: VecDeque::from([Err(SensorError::Bus), Ok(40)]),
            ..Readings::default()
        };
        let mut dispatcher = Dispatcher::new(&links, Switches(&switches), sensor, timing());

        let (_, steps) = tick_collecting_steps(&links, &mut dispatcher);
        assert!(steps.is_empty());
    }

    #[test]
    fn drifting_humidity_bursts_clockwise_by_first_reading() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(8));
        let sensor = Readings {
            humidity: VecDeque::from([Ok(40), Ok(45)]),
            ..Readings::default()
        };
        let mut dispatcher = Dispatcher::new(&links, Switches(&switches), sensor, timing());

        let (_, steps) = tick_collecting_steps(&links, &mut dispatcher);
        assert_eq!(steps, vec![1; 40]);
        assert_eq!(links.left.try_receive(), Ok(label::HUMIDITY.left));
        assert_eq!(links.right.try_receive(), Ok(label::HUMIDITY.right));
    }

    #[test]
    fn repeated_sensor_tick_only_relabels() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(8));
        let sensor = Readings {
            humidity: VecDeque::from([Ok(3), Ok(3), Ok(50), Ok(50)]),
            ..Readings::default()
        };
        let mut dispatcher = Dispatcher::new(&links, Switches(&switches), sensor, timing());

        let (_, first) = tick_collecting_steps(&links, &mut dispatcher);
        let (_, second) = tick_collecting_steps(&links, &mut dispatcher);
        assert_eq!(first.len(), 3);
        assert!(second.is_empty());
        assert_eq!(links.left.len(), 2);
        assert_eq!(links.right.len(), 2);
    }

    #[test]
    fn rotate_sends_one_full_revolution() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(4));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        let (_, steps) = tick_collecting_steps(&links, &mut dispatcher);
        assert_eq!(steps.len(), FULL_REVOLUTION as usize);
        assert!(steps.iter().all(|step| *step == 1));
    }

    #[test]
    fn sweep_goes_out_and_back() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(6));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        let (_, steps) = tick_collecting_steps(&links, &mut dispatcher);
        let revolution = FULL_REVOLUTION as usize;
        assert_eq!(steps.len(), 2 * revolution);
        assert!(steps[..revolution].iter().all(|step| *step == 1));
        assert!(steps[revolution..].iter().all(|step| *step == -1));
        assert_eq!(links.left.try_receive(), Ok(label::SWEEP_OUT.left));
        assert_eq!(links.right.try_receive(), Ok(label::SWEEP_OUT.right));
        assert_eq!(links.right.try_receive(), Ok(label::SWEEP_BACK.right));
    }

    #[test]
    fn sweep_cut_short_on_the_way_out_skips_the_way_back() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(6));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        let steps = RefCell::new(Vec::new());
        let drain = async {
            loop {
                let step = links.steps.receive().await;
                steps.borrow_mut().push(step);
                if steps.borrow().len() == 100 {
                    switches.set(Inputs::sensor(1));
                }
            }
        };
        block_on(select(dispatcher.tick(), drain));
        while let Ok(step) = links.steps.try_receive() {
            steps.borrow_mut().push(step);
        }

        let steps = steps.into_inner();
        assert!(steps.len() < FULL_REVOLUTION as usize);
        assert!(steps.iter().all(|step| *step == 1));
        assert_eq!(links.left.try_receive(), Ok(label::SWEEP_OUT.left));
        assert_eq!(links.right.try_receive(), Ok(label::SWEEP_OUT.right));
        assert!(links.left.is_empty());
        assert!(links.right.is_empty());
    }

    #[test]
    fn switch_flip_cuts_a_burst_short() {
        let links = Links::new();
        let switches = Cell::new(Inputs::sensor(2));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        let steps = RefCell::new(0usize);
        let drain = async {
            loop {
                links.steps.receive().await;
                *steps.borrow_mut() += 1;
                if *steps.borrow() == 100 {
                    switches.set(Inputs::sensor(1));
                }
            }
        };
        block_on(select(dispatcher.tick(), drain));
        while links.steps.try_receive().is_ok() {
            *steps.borrow_mut() += 1;
        }

        let steps = steps.into_inner();
        assert!(steps >= 100);
        assert!(steps < 100 + 4, "burst ran on for {steps} steps");
        assert!(!token_held(&links));
    }

    #[test]
    fn stop_runs_the_health_check() {
        let links = Links::new();
        let timing = timing();
        for _ in 0..crate::config::DIGIT_QUEUE_DEPTH - 1 {
            block_on(links.show(label::ROTATE_CW, &timing));
        }
        let switches = Cell::new(Inputs::sensor(15));
        let mut dispatcher = Dispatcher::new(&links, Switches(&switches), Readings::default(), timing);

        // the stop label fills the queues, the health check then resets them
        assert_eq!(block_on(dispatcher.tick()), Tick::Done);
        assert_eq!(links.left.len(), 1);
        assert_eq!(links.left.try_receive(), Ok(label::OVERFLOW.left));
        assert_eq!(links.right.try_receive(), Ok(label::OVERFLOW.right));
    }

    #[test]
    fn static_led_mode_queues_its_command() {
        let links = Links::new();
        let switches = Cell::new(Inputs::lighting(4));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        assert_eq!(block_on(dispatcher.tick()), Tick::Done);
        assert_eq!(links.pixels.try_receive(), Ok(PixelCommand::MultiColor));
    }

    #[test]
    fn secondary_button_in_red_mode_flashes_the_alert() {
        let links = Links::new();
        let switches = Cell::new(Inputs::lighting(0).with_secondary(true));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        let sent = RefCell::new(Vec::new());
        let drain = async {
            loop {
                let command = links.pixels.receive().await;
                sent.borrow_mut().push(command);
            }
        };
        block_on(select(dispatcher.tick(), drain));
        while let Ok(command) = links.pixels.try_receive() {
            sent.borrow_mut().push(command);
        }
        assert_eq!(sent.into_inner(), ALERT_SEQUENCE.to_vec());
    }

    #[test]
    fn held_primary_button_wipes_and_waits_for_release() {
        let links = Links::new();
        let switches = Cell::new(Inputs::lighting(2).with_primary(true));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        let release = async {
            Timer::after(Duration::from_millis(2)).await;
            switches.set(Inputs::lighting(2));
            // keep running until the tick returns
            loop {
                yield_now().await;
            }
        };
        let tick = match block_on(select(dispatcher.tick(), release)) {
            Either::First(tick) => tick,
            Either::Second(_) => unreachable!(),
        };
        assert_eq!(tick, Tick::Reevaluate);
        assert_eq!(links.pixels.try_receive(), Ok(PixelCommand::Wipe));
        assert!(links.pixels.try_receive().is_err());
    }

    #[test]
    fn interrupted_animation_asks_for_immediate_reevaluation() {
        let links = Links::new();
        let switches = Cell::new(Inputs::lighting(7));
        let mut dispatcher =
            Dispatcher::new(&links, Switches(&switches), Readings::default(), timing());

        // stands in for the pixel task: waits for the change, then reports
        let pixel = async {
            assert_eq!(links.pixels.receive().await, PixelCommand::ColorCycle);
            assert_eq!(links.launched(), Some(Selection::Lighting { code: 7, alert: false }));
            assert_eq!(links.selection(), Some(Selection::Lighting { code: 7, alert: false }));
            switches.set(Inputs::lighting(1));
            while links.selection() != Some(Selection::Lighting { code: 1, alert: false }) {
                yield_now().await;
            }
            links.report(PixelOutcome::Interrupted);
            loop {
                yield_now().await;
            }
        };
        let tick = match block_on(select(dispatcher.tick(), pixel)) {
            Either::First(tick) => tick,
            Either::Second(_) => unreachable!(),
        };
        assert_eq!(tick, Tick::Reevaluate);
    }
}
