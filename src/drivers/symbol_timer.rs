//! NEC symbol tick counter.
//!
//! The hardware timer raises an alarm every 56.25 µs; its ISR calls
//! [`on_symbol_tick`], which bumps [`SYMBOL_TICKS`].  The transmitter
//! busy-waits on deltas of that counter through [`IsrSymbolTimer`].

use core::sync::atomic::{AtomicU32, Ordering};

use crate::app::ports::SymbolTimer;
use crate::drivers::hw_init;

/// Ticks since the last [`SymbolTimer::start`].  Single writer (the ISR).
pub static SYMBOL_TICKS: AtomicU32 = AtomicU32::new(0);

/// Alarm ISR body.  Wraps at `u32::MAX`.
pub fn on_symbol_tick() {
    SYMBOL_TICKS.fetch_add(1, Ordering::Release);
}

/// [`SymbolTimer`] over an ISR-driven counter.
pub struct IsrSymbolTimer {
    ticks: &'static AtomicU32,
}

impl IsrSymbolTimer {
    /// The board timer, counting into [`SYMBOL_TICKS`].
    pub fn board() -> Self {
        Self::new(&SYMBOL_TICKS)
    }

    pub fn new(ticks: &'static AtomicU32) -> Self {
        Self { ticks }
    }
}

impl SymbolTimer for IsrSymbolTimer {
    fn start(&mut self) {
        self.ticks.store(0, Ordering::Release);
        hw_init::symbol_timer_start();
    }

    fn stop(&mut self) {
        hw_init::symbol_timer_stop();
    }

    fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }
}
