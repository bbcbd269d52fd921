//! System configuration parameters
//!
//! All tunable parameters for the Retina remote.  The defaults reproduce
//! the stock board: user button 0 with 150 ms debounce, transmitter 0, and
//! the three colour codes of the LED strip remote.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fsm::retina::ROTATION_CAPACITY;
use crate::nec::NecCode;

// ---------------------------------------------------------------------------
// Remote codes (24-key RGB strip remote, address 0x00F7)
// ---------------------------------------------------------------------------

pub const LIL_REMOTE_ADDRESS: u16 = 0x00F7;

/// "Red" key, 0x00F720DF.
pub const LIL_RED_BUTTON: u32 = NecCode::new(LIL_REMOTE_ADDRESS, 0x20).to_code();
/// "Green" key, 0x00F7A05F.
pub const LIL_GREEN_BUTTON: u32 = NecCode::new(LIL_REMOTE_ADDRESS, 0xA0).to_code();
/// "Blue" key, 0x00F7609F.
pub const LIL_BLUE_BUTTON: u32 = NecCode::new(LIL_REMOTE_ADDRESS, 0x60).to_code();

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetinaConfig {
    // --- Button ---
    /// Button identity in the button registry
    pub button_id: u32,
    /// Minimum stable time before an edge is accepted (ms)
    pub debounce_ms: u32,

    // --- Transmitter ---
    /// Transmitter identity in the transmitter registry
    pub tx_id: u8,

    // --- Orchestrator ---
    /// Presses at or above this length are not short presses (ms)
    pub long_press_ms: u32,
    /// Codes sent in turn, one per short press
    pub codes: [u32; ROTATION_CAPACITY],

    // --- Timing ---
    /// Main loop yield while every machine is idle (ms)
    pub idle_poll_ms: u32,
}

impl Default for RetinaConfig {
    fn default() -> Self {
        Self {
            // Button
            button_id: 0,
            debounce_ms: 150,

            // Transmitter
            tx_id: 0,

            // Orchestrator
            long_press_ms: 3000,
            codes: [LIL_RED_BUTTON, LIL_GREEN_BUTTON, LIL_BLUE_BUTTON],

            // Timing
            idle_poll_ms: 10, // 100 Hz
        }
    }
}

impl RetinaConfig {
    /// Reject settings the machines cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if self.long_press_ms <= self.debounce_ms {
            return Err(Error::Config("long_press_ms must exceed debounce_ms"));
        }
        if self.codes.contains(&0) {
            return Err(Error::Config("rotation codes must be non-zero"));
        }
        Ok(())
    }
}
