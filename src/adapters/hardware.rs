//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! The machines take one hardware object that is both a [`ButtonPort`]
//! and a [`TxPort`].  [`HardwareAdapter`] glues a button registry and a
//! transmitter registry into that single object so the service can borrow
//! it for a whole loop pass.

use crate::app::ports::{ButtonPort, TxPort};
use crate::error::Result;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<B: ButtonPort, T: TxPort> {
    buttons: B,
    transmitters: T,
}

impl<B: ButtonPort, T: TxPort> HardwareAdapter<B, T> {
    pub fn new(buttons: B, transmitters: T) -> Self {
        Self {
            buttons,
            transmitters,
        }
    }

    pub fn buttons(&self) -> &B {
        &self.buttons
    }

    pub fn transmitters(&self) -> &T {
        &self.transmitters
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<B: ButtonPort, T: TxPort> ButtonPort for HardwareAdapter<B, T> {
    fn init(&mut self, button_id: u32) -> Result<()> {
        self.buttons.init(button_id)
    }

    fn is_pressed(&mut self, button_id: u32) -> bool {
        self.buttons.is_pressed(button_id)
    }

    fn tick(&self) -> u32 {
        self.buttons.tick()
    }
}

// ── TxPort implementation ─────────────────────────────────────

impl<B: ButtonPort, T: TxPort> TxPort for HardwareAdapter<B, T> {
    fn init(&mut self, tx_id: u8, carrier_on: bool) -> Result<()> {
        self.transmitters.init(tx_id, carrier_on)
    }

    fn carrier_set(&mut self, tx_id: u8, on: bool) {
        self.transmitters.carrier_set(tx_id, on);
    }

    fn symbol_timer_start(&mut self) {
        self.transmitters.symbol_timer_start();
    }

    fn symbol_timer_stop(&mut self) {
        self.transmitters.symbol_timer_stop();
    }

    fn symbol_timer_ticks(&mut self) -> u32 {
        self.transmitters.symbol_timer_ticks()
    }
}
