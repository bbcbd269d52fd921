//! Port adapters over generic `embedded-hal` peripherals.
//!
//! [`HalButtons`] turns a registry of [`InputPin`]s into a [`ButtonPort`];
//! [`HalTransmitters`] turns a registry of [`SetDutyCycle`] carriers plus a
//! shared [`SymbolTimer`] into a [`TxPort`].  Registries are fixed-capacity
//! `heapless::Vec`s sized by the caller.
//!
//! The port contract is infallible, so HAL errors are logged and mapped to
//! the safe reading: a pin that cannot be read is not pressed, a carrier
//! that cannot be written keeps its previous level.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;
use log::{info, warn};

use crate::app::ports::{ButtonPort, Clock, SymbolTimer, TxPort};
use crate::error::{InitError, Result};
use crate::nec::NEC_PWM_DUTY_PERCENT;

// ───────────────────────────────────────────────────────────────
// Buttons
// ───────────────────────────────────────────────────────────────

struct HalButton<P> {
    id: u32,
    pin: P,
    active_low: bool,
}

/// Up to `N` buttons read straight from GPIO input pins.
pub struct HalButtons<P: InputPin, C: Clock, const N: usize> {
    buttons: Vec<HalButton<P>, N>,
    clock: C,
}

impl<P: InputPin, C: Clock, const N: usize> HalButtons<P, C, N> {
    pub fn new(clock: C) -> Self {
        Self {
            buttons: Vec::new(),
            clock,
        }
    }

    /// Wire `pin` as button `id`.
    pub fn register(&mut self, id: u32, pin: P, active_low: bool) -> Result<()> {
        self.buttons
            .push(HalButton { id, pin, active_low })
            .map_err(|_| InitError::RegistryFull)?;
        Ok(())
    }

    fn find(&mut self, id: u32) -> Option<&mut HalButton<P>> {
        self.buttons.iter_mut().find(|b| b.id == id)
    }
}

impl<P: InputPin, C: Clock, const N: usize> ButtonPort for HalButtons<P, C, N> {
    fn init(&mut self, button_id: u32) -> Result<()> {
        self.find(button_id).ok_or(InitError::UnknownButton(button_id))?;
        info!("button {}: GPIO input ready", button_id);
        Ok(())
    }

    fn is_pressed(&mut self, button_id: u32) -> bool {
        let Some(b) = self.find(button_id) else {
            return false;
        };
        let level = if b.active_low { b.pin.is_low() } else { b.pin.is_high() };
        level.unwrap_or_else(|e| {
            warn!("button {}: pin read failed: {:?}", button_id, e);
            false
        })
    }

    fn tick(&self) -> u32 {
        self.clock.now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Transmitters
// ───────────────────────────────────────────────────────────────

struct HalTx<W> {
    id: u8,
    carrier: W,
}

/// Up to `N` IR carriers sharing one symbol timer.
pub struct HalTransmitters<W: SetDutyCycle, T: SymbolTimer, const N: usize> {
    txs: Vec<HalTx<W>, N>,
    timer: T,
}

impl<W: SetDutyCycle, T: SymbolTimer, const N: usize> HalTransmitters<W, T, N> {
    pub fn new(timer: T) -> Self {
        Self {
            txs: Vec::new(),
            timer,
        }
    }

    /// Wire `carrier` as transmitter `id`.
    pub fn register(&mut self, id: u8, carrier: W) -> Result<()> {
        self.txs
            .push(HalTx { id, carrier })
            .map_err(|_| InitError::RegistryFull)?;
        Ok(())
    }

    /// The carrier registered as `id`.
    pub fn carrier(&self, id: u8) -> Option<&W> {
        self.txs.iter().find(|t| t.id == id).map(|t| &t.carrier)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<W: SetDutyCycle, T: SymbolTimer, const N: usize> TxPort for HalTransmitters<W, T, N> {
    fn init(&mut self, tx_id: u8, carrier_on: bool) -> Result<()> {
        if !self.txs.iter().any(|t| t.id == tx_id) {
            return Err(InitError::UnknownTransmitter(tx_id).into());
        }
        self.carrier_set(tx_id, carrier_on);
        info!("tx {}: carrier ready", tx_id);
        Ok(())
    }

    fn carrier_set(&mut self, tx_id: u8, on: bool) {
        let Some(tx) = self.txs.iter_mut().find(|t| t.id == tx_id) else {
            return;
        };
        let res = if on {
            tx.carrier.set_duty_cycle_percent(NEC_PWM_DUTY_PERCENT)
        } else {
            tx.carrier.set_duty_cycle_fully_off()
        };
        if let Err(e) = res {
            warn!("tx {}: carrier write failed: {:?}", tx_id, e);
        }
    }

    fn symbol_timer_start(&mut self) {
        self.timer.start();
    }

    fn symbol_timer_stop(&mut self) {
        self.timer.stop();
    }

    fn symbol_timer_ticks(&mut self) -> u32 {
        self.timer.ticks()
    }
}
