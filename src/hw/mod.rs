//! RP2350 adapters for the driver traits of the coordination core
pub mod digits;
pub mod resources;
pub mod sensor;
pub mod stepper;
pub mod strip;
pub mod switches;
