//! DIP bank and push button sampling
//!
//! DIP switches pull their line to ground when on, so the pins idle high.
//! Buttons drive their line high while pressed.

use embassy_rp::gpio::{Input, Pull};
use switchboard::system::drivers::InputBank;
use switchboard::system::mode::Inputs;

use super::resources::SwitchResources;

pub struct Switches<'d> {
    /// DIP1 first
    dips: [Input<'d>; 8],
    primary: Input<'d>,
    secondary: Input<'d>,
}

impl Switches<'static> {
    pub fn new(r: SwitchResources) -> Self {
        Self {
            dips: [
                Input::new(r.dip1, Pull::Up),
                Input::new(r.dip2, Pull::Up),
                Input::new(r.dip3, Pull::Up),
                Input::new(r.dip4, Pull::Up),
                Input::new(r.dip5, Pull::Up),
                Input::new(r.dip6, Pull::Up),
                Input::new(r.dip7, Pull::Up),
                Input::new(r.dip8, Pull::Up),
            ],
            primary: Input::new(r.primary, Pull::Down),
            secondary: Input::new(r.secondary, Pull::Down),
        }
    }
}

impl InputBank for Switches<'_> {
    fn read(&mut self) -> Inputs {
        let bank = self
            .dips
            .iter()
            .enumerate()
            .filter(|(_, dip)| dip.is_high())
            .fold(0u8, |bank, (bit, _)| bank | (1 << bit));
        Inputs {
            bank,
            primary: self.primary.is_high(),
            secondary: self.secondary.is_high(),
        }
    }
}
