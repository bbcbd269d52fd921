//! Retina firmware library.
//!
//! A single push-button IR remote: a debounced button machine, an NEC
//! transmitter machine and an orchestrator that maps short presses onto a
//! rotation of codes.  Exposes the pure-logic modules for integration
//! testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod nec;
pub mod pins;

// The implementations behind these are cfg-gated per target; host builds
// get simulation stubs.
pub mod adapters;
pub mod drivers;
