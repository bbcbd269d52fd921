//! ISR-latched button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The GPIO interrupt fires on
//! both edges and the ISR stores the new level into a per-button
//! [`ButtonLatch`].  The main loop reads the latch through the
//! [`ButtonPort`] implemented by [`LatchedButtons`]; debouncing is left to
//! the button machine.

use core::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::app::ports::{ButtonPort, Clock};
use crate::drivers::hw_init;
use crate::error::{InitError, Result};
use crate::pins;

/// Buttons wired on this board.
pub const BUTTON_COUNT: usize = 1;

/// Pressed flag written by the ISR, read by the main loop.
pub struct ButtonLatch {
    pressed: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
        }
    }

    /// Publish a level.  Safe from interrupt context.
    pub fn publish(&self, pressed: bool) {
        self.pressed.store(pressed, Ordering::Release);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// One latch per wired button, indexed by button id.
pub static BUTTON_LATCHES: [ButtonLatch; BUTTON_COUNT] = [ButtonLatch::new()];

/// ISR handler; register this on the button GPIO (any edge).
/// Safe to call from interrupt context (lock-free atomic store).
#[allow(unused)]
pub fn button_isr_handler(slot: usize, pressed: bool) {
    if let Some(latch) = BUTTON_LATCHES.get(slot) {
        latch.publish(pressed);
    }
}

/// Static description of one wired button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonWiring {
    pub gpio: i32,
    pub active_low: bool,
}

/// Board button table; the index is the button id.
pub const BOARD_BUTTONS: [ButtonWiring; BUTTON_COUNT] = [ButtonWiring {
    gpio: pins::BUTTON_GPIO,
    active_low: pins::BUTTON_ACTIVE_LOW,
}];

/// [`ButtonPort`] over a table of ISR latches.
pub struct LatchedButtons<C: Clock> {
    wiring: &'static [ButtonWiring],
    latches: &'static [ButtonLatch],
    clock: C,
    /// Bit `n` set once button `n` has been brought up.
    ready: u32,
}

impl<C: Clock> LatchedButtons<C> {
    /// The buttons of this board, backed by [`BUTTON_LATCHES`].
    pub fn board(clock: C) -> Self {
        Self::new(&BOARD_BUTTONS, &BUTTON_LATCHES, clock)
    }

    pub fn new(wiring: &'static [ButtonWiring], latches: &'static [ButtonLatch], clock: C) -> Self {
        Self {
            wiring,
            latches,
            clock,
            ready: 0,
        }
    }

    fn slot(&self, button_id: u32) -> Option<usize> {
        let slot = button_id as usize;
        (slot < self.wiring.len() && slot < self.latches.len() && slot < 32).then_some(slot)
    }
}

impl<C: Clock> ButtonPort for LatchedButtons<C> {
    fn init(&mut self, button_id: u32) -> Result<()> {
        let slot = self.slot(button_id).ok_or(InitError::UnknownButton(button_id))?;
        if self.ready & (1 << slot) != 0 {
            return Ok(());
        }
        let w = self.wiring[slot];
        // Seed the latch so a button held at boot is seen before its first edge.
        self.latches[slot].publish(hw_init::gpio_read(w.gpio) != w.active_low);
        self.ready |= 1 << slot;
        info!("button {}: GPIO{} latched", button_id, w.gpio);
        Ok(())
    }

    fn is_pressed(&mut self, button_id: u32) -> bool {
        self.slot(button_id)
            .is_some_and(|slot| self.latches[slot].is_pressed())
    }

    fn tick(&self) -> u32 {
        self.clock.now_ms()
    }
}
