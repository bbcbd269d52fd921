//! Port traits: the hexagonal boundary between the machines and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ButtonFsm / TxFsm (domain)
//! ```
//!
//! Driven adapters (GPIO latches, PWM carrier, symbol timer) implement
//! these traits.  The machines consume them via generics, so the domain
//! core never touches a register.  Hardware identities (`button_id`,
//! `tx_id`) are opaque to the core; each adapter owns the registry that
//! maps them to real peripherals and rejects unknown ones in `init`.

use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for debounced buttons.
pub trait ButtonPort {
    /// One-shot, idempotent bring-up of the button hardware.
    /// Fails with [`InitError::UnknownButton`](crate::error::InitError::UnknownButton)
    /// when `button_id` is not in the registry.
    fn init(&mut self, button_id: u32) -> Result<()>;

    /// Raw (undebounced) level: `true` while the button is held down.
    fn is_pressed(&mut self, button_id: u32) -> bool;

    /// Monotonic milliseconds, wrapping at `u32::MAX`.
    fn tick(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Transmitter port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the IR transmitter.
///
/// The symbol timer is shared by every transmitter and only runs while a
/// frame is being sent.
pub trait TxPort {
    /// One-shot, idempotent bring-up; leaves the carrier in `carrier_on`.
    /// Fails with [`InitError::UnknownTransmitter`](crate::error::InitError::UnknownTransmitter)
    /// when `tx_id` is not in the registry.
    fn init(&mut self, tx_id: u8, carrier_on: bool) -> Result<()>;

    /// Gate the 38 kHz carrier on or off.
    fn carrier_set(&mut self, tx_id: u8, on: bool);

    /// Reset the symbol tick counter to zero and start counting.
    fn symbol_timer_start(&mut self);

    /// Stop the symbol timer.
    fn symbol_timer_stop(&mut self);

    /// Symbol ticks (56.25 µs each) since the last start, wrapping.
    fn symbol_timer_ticks(&mut self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Supporting capabilities used by the adapters
// ───────────────────────────────────────────────────────────────

/// Millisecond time source behind [`ButtonPort::tick`].
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Fine-grained tick source behind the `symbol_timer_*` port calls.
pub trait SymbolTimer {
    fn start(&mut self);
    fn stop(&mut self);
    fn ticks(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driving adapter: domain → outside world)
// ───────────────────────────────────────────────────────────────

/// Outbound channel for [`AppEvent`](super::events::AppEvent)s.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
