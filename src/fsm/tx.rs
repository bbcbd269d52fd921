//! IR transmitter machine.
//!
//! One state, one self-transition: whenever a code is pending, encode it as
//! an NEC frame, push it out through the [`TxPort`], and clear it.  The send
//! is a blocking busy-wait on the symbol tick counter; a full frame takes
//! roughly 250–290 ms.

use log::info;

use super::{Fire, Fsm, StateMachine, Transition};
use crate::app::ports::TxPort;
use crate::error::Result;
use crate::nec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    WaitTx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxData {
    /// Pending code; 0 means nothing to send.
    pub code: u32,
    pub tx_id: u8,
}

fn check_tx_start<P>(d: &TxData, _port: &P) -> bool {
    d.code != 0
}

fn do_tx_start<P: TxPort>(d: &mut TxData, port: &mut P) {
    send_nec_code(port, d.tx_id, d.code);
    info!("tx {}: sent 0x{:08X}", d.tx_id, d.code);
    d.code = 0;
}

/// Spin until `ticks` symbol ticks have elapsed since the first read.
fn wait_for_tx_ticks<P: TxPort + ?Sized>(port: &mut P, ticks: u32) {
    let start = port.symbol_timer_ticks();
    while port.symbol_timer_ticks().wrapping_sub(start) < ticks {
        core::hint::spin_loop();
    }
}

/// Transmit `code` as one complete NEC frame on `tx_id`.
///
/// Starts the symbol timer, emits prologue, 32 data bits MSB first and
/// epilogue, then stops the timer.  Blocks for the whole frame.
pub fn send_nec_code<P: TxPort + ?Sized>(port: &mut P, tx_id: u8, code: u32) {
    port.symbol_timer_start();
    for burst in nec::frame(code) {
        port.carrier_set(tx_id, true);
        wait_for_tx_ticks(port, burst.on_ticks);
        port.carrier_set(tx_id, false);
        wait_for_tx_ticks(port, burst.off_ticks);
    }
    port.symbol_timer_stop();
}

pub struct TxFsm<P: TxPort + 'static> {
    fsm: Fsm<TxState, TxData, P>,
    data: TxData,
}

impl<P: TxPort + 'static> TxFsm<P> {
    const TRANSITIONS: &'static [Transition<TxState, TxData, P>] = &[Transition {
        from: TxState::WaitTx,
        guard: check_tx_start::<P>,
        to: TxState::WaitTx,
        action: Some(do_tx_start::<P>),
    }];

    /// Bring up `tx_id` with the carrier off.
    pub fn new(port: &mut P, tx_id: u8) -> Result<Self> {
        port.init(tx_id, false)?;
        let fsm = Fsm::new("tx", Self::TRANSITIONS)?;
        info!("tx {}: ready", tx_id);
        Ok(Self {
            fsm,
            data: TxData { code: 0, tx_id },
        })
    }

    /// Queue `code` for the next fire.  0 is ignored.
    pub fn set_code(&mut self, code: u32) {
        if code != 0 {
            self.data.code = code;
        }
    }

    pub fn code(&self) -> u32 {
        self.data.code
    }

    pub fn tx_id(&self) -> u8 {
        self.data.tx_id
    }
}

impl<P: TxPort + 'static> StateMachine for TxFsm<P> {
    type State = TxState;

    fn state(&self) -> TxState {
        self.fsm.state()
    }

    /// Sending completes inside a single fire, so there is never anything
    /// left in flight between passes.
    fn check_activity(&self) -> bool {
        false
    }
}

impl<P: TxPort + 'static> Fire<P> for TxFsm<P> {
    fn fire(&mut self, port: &mut P) -> bool {
        self.fsm.fire(&mut self.data, port)
    }
}
