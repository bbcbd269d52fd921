//! Peripheral drivers and one-shot hardware initialisation.

pub mod button;
pub mod hw_init;
pub mod ir_led;
pub mod symbol_timer;
pub mod watchdog;
