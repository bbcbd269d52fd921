//! Application service, the hexagonal core.
//!
//! [`RetinaService`] owns the button, transmitter and orchestrator machines
//! and runs them in a fixed order on every loop pass.  All I/O flows through
//! the port traits of the hardware object handed to each call, so the whole
//! service is testable with mock adapters.
//!
//! ```text
//!  ButtonPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │      RetinaService        │
//!     TxPort ◀────│  Button · Tx · Retina     │
//!                 └──────────────────────────┘
//! ```

use log::info;

use crate::config::RetinaConfig;
use crate::error::Result;
use crate::fsm::button::ButtonFsm;
use crate::fsm::retina::{RetinaFsm, RetinaPeers};
use crate::fsm::tx::TxFsm;
use crate::fsm::{Fire, StateMachine};

use super::events::AppEvent;
use super::ports::{ButtonPort, EventSink, TxPort};

// ───────────────────────────────────────────────────────────────
// RetinaService
// ───────────────────────────────────────────────────────────────

/// Drives the three machines against hardware `H`.
pub struct RetinaService<H: ButtonPort + TxPort + 'static> {
    button: ButtonFsm,
    tx: TxFsm<H>,
    retina: RetinaFsm,
    passes: u64,
}

impl<H: ButtonPort + TxPort + 'static> RetinaService<H> {
    /// Validate `config` and build every machine, bringing up the button
    /// and transmitter through `hw`.
    pub fn new(config: &RetinaConfig, hw: &mut H) -> Result<Self> {
        config.validate()?;
        let button = ButtonFsm::new(hw, config.debounce_ms, config.button_id)?;
        let tx = TxFsm::new(hw, config.tx_id)?;
        let retina = RetinaFsm::new(config.long_press_ms, config.codes)?;
        Ok(Self {
            button,
            tx,
            retina,
            passes: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the service on `sink`.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            button_id: self.button.button_id(),
            tx_id: self.tx.tx_id(),
        });
        info!(
            "RetinaService started: button {} -> tx {}",
            self.button.button_id(),
            self.tx.tx_id()
        );
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// One loop pass: Button, then Transmitter, then Retina.
    ///
    /// A code queued by the Retina is sent by the Transmitter on the next
    /// pass.  Blocks for a whole frame when one is pending.
    pub fn fire_all(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        self.passes += 1;

        // 1. Button
        let prev = self.button.state();
        self.button.fire(hw);
        let now = self.button.state();
        if now != prev {
            sink.emit(&AppEvent::ButtonChanged { from: prev, to: now });
        }

        // 2. Transmitter
        let pending = self.tx.code();
        if self.tx.fire(hw) {
            sink.emit(&AppEvent::FrameSent {
                tx_id: self.tx.tx_id(),
                code: pending,
            });
        }

        // 3. Retina
        let index = self.retina.index();
        let queued = self.retina.fire(&mut RetinaPeers {
            button: &mut self.button,
            tx: &mut self.tx,
        });
        if queued {
            sink.emit(&AppEvent::CodeQueued {
                index,
                code: self.tx.code(),
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// `true` when no machine has work in progress and the loop may sleep
    /// longer between passes.
    pub fn is_idle(&self) -> bool {
        !(self.button.check_activity() || self.tx.check_activity() || self.retina.check_activity())
    }

    pub fn button(&self) -> &ButtonFsm {
        &self.button
    }

    pub fn tx(&self) -> &TxFsm<H> {
        &self.tx
    }

    pub fn retina(&self) -> &RetinaFsm {
        &self.retina
    }

    /// Loop passes executed since construction.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
