//! Switchboard firmware entry point
//!
//! Binds the coordination core to the RP2350 and spawns the four tasks:
//! - the mode dispatcher on the highest priority interrupt executor
//! - the pixel task on a second interrupt executor below it
//! - the display and motor tasks on the thread executor
//!
//! Everything here is hardware specific; host builds get an empty `main` so
//! the library and its tests build on any machine.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

/// RP2350 driver adapters
#[cfg(target_arch = "arm")]
mod hw;

#[cfg(target_arch = "arm")]
use {
    embassy_executor::{InterruptExecutor, Spawner},
    embassy_rp::block::ImageDef,
    embassy_rp::interrupt,
    embassy_rp::interrupt::{InterruptExt, Priority},
    embassy_rp::peripherals::PIO0,
    hw::digits::SegmentDisplay,
    hw::resources::*,
    hw::sensor::{Hdc1080, SensorBus},
    hw::stepper::Stepper,
    hw::strip::Ws2812Strip,
    hw::switches::Switches,
    static_cell::StaticCell,
    switchboard::config::Timing,
    switchboard::system::links::Links,
    switchboard::task,
    {defmt_rtt as _, panic_probe as _},
};

/// Firmware image type for bootloader
#[cfg(target_arch = "arm")]
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

#[cfg(target_arch = "arm")]
static LINKS: StaticCell<Links> = StaticCell::new();

#[cfg(target_arch = "arm")]
static DISPATCH_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[cfg(target_arch = "arm")]
static PIXEL_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[cfg(target_arch = "arm")]
#[interrupt]
unsafe fn SPAREIRQ_IRQ_1() {
    DISPATCH_EXECUTOR.on_interrupt()
}

#[cfg(target_arch = "arm")]
#[interrupt]
unsafe fn SPAREIRQ_IRQ_0() {
    PIXEL_EXECUTOR.on_interrupt()
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn dispatch(links: &'static Links, switches: Switches<'static>, sensor: Hdc1080<SensorBus>) {
    task::dispatch::run(links, switches, sensor, Timing::default()).await;
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn pixel(links: &'static Links, strip: Ws2812Strip<'static, PIO0, 0>) {
    task::pixel::run(links, strip, Timing::default()).await;
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn display(links: &'static Links, digits: SegmentDisplay<'static>) {
    task::display::run(links, digits, Timing::default()).await;
}

#[cfg(target_arch = "arm")]
#[embassy_executor::task]
async fn motor(links: &'static Links, stepper: Stepper<'static>) {
    task::motor::run(links, stepper).await;
}

/// Firmware entry point
#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    defmt::info!("Switchboard starting");
    let links: &'static Links = LINKS.init(Links::new());

    let switches = Switches::new(r.switches);
    let sensor = Hdc1080::new(hw::sensor::bus(r.sensor));
    let strip = Ws2812Strip::new(r.strip);
    let digits = SegmentDisplay::new(r.display);
    let stepper = Stepper::new(r.stepper);

    // lower number preempts higher number
    interrupt::SPAREIRQ_IRQ_1.set_priority(Priority::P2);
    let high = DISPATCH_EXECUTOR.start(interrupt::SPAREIRQ_IRQ_1);
    interrupt::SPAREIRQ_IRQ_0.set_priority(Priority::P3);
    let medium = PIXEL_EXECUTOR.start(interrupt::SPAREIRQ_IRQ_0);

    // consumers first so nothing queued by the dispatcher waits on an absent task
    spawner.spawn(display(links, digits)).unwrap();
    spawner.spawn(motor(links, stepper)).unwrap();
    medium.spawn(pixel(links, strip)).unwrap();
    high.spawn(dispatch(links, switches, sensor)).unwrap();
}

#[cfg(not(target_arch = "arm"))]
fn main() {}
