//! Top-level orchestrator.
//!
//! Watches the button for completed short presses and, for each one, hands
//! the transmitter the next code of a fixed three-entry rotation.  Presses at
//! or above `long_button_press_ms` match no row and are left untouched.
//!
//! The engine only ever sees a [`RetinaLink`]: the press duration sampled
//! before the fire, plus the requests the action wants applied to the peer
//! machines.  [`RetinaFsm`]'s `fire` applies those requests to the borrowed
//! [`ButtonFsm`] and [`TxFsm`] once the engine returns.

use log::{info, warn};

use super::button::ButtonFsm;
use super::tx::TxFsm;
use super::{Fire, Fsm, StateMachine, Transition};
use crate::app::ports::TxPort;
use crate::error::Result;

/// Number of codes in the rotation.
pub const ROTATION_CAPACITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetinaState {
    WaitTx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetinaData {
    pub long_button_press_ms: u32,
    pub codes: [u32; ROTATION_CAPACITY],
    /// Next rotation slot, always `< ROTATION_CAPACITY`.
    pub index: usize,
}

/// Per-fire exchange between the engine and the peer machines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetinaLink {
    /// Button press duration at the start of the fire.
    pub duration: u32,
    /// Code the action wants queued on the transmitter.
    pub queue_code: Option<u32>,
    /// The action consumed the press; the button duration must be reset.
    pub press_consumed: bool,
}

impl RetinaLink {
    fn sample(button: &ButtonFsm) -> Self {
        Self {
            duration: button.get_duration(),
            ..Self::default()
        }
    }

    fn apply<P: TxPort + 'static>(&self, button: &mut ButtonFsm, tx: &mut TxFsm<P>) {
        if let Some(code) = self.queue_code {
            tx.set_code(code);
        }
        if self.press_consumed {
            button.reset_duration();
        }
    }
}

/// The machines the orchestrator drives, borrowed for one fire.
pub struct RetinaPeers<'a, P: TxPort + 'static> {
    pub button: &'a mut ButtonFsm,
    pub tx: &'a mut TxFsm<P>,
}

fn check_short_press(d: &RetinaData, link: &RetinaLink) -> bool {
    link.duration != 0 && link.duration < d.long_button_press_ms
}

fn do_advance_rotation(d: &mut RetinaData, link: &mut RetinaLink) {
    let code = d.codes[d.index];
    info!(
        "retina: {} ms press, queue code[{}] = 0x{:08X}",
        link.duration, d.index, code
    );
    link.queue_code = Some(code);
    link.press_consumed = true;
    d.index = (d.index + 1) % ROTATION_CAPACITY;
}

static RETINA_TRANSITIONS: [Transition<RetinaState, RetinaData, RetinaLink>; 1] = [Transition {
    from: RetinaState::WaitTx,
    guard: check_short_press,
    to: RetinaState::WaitTx,
    action: Some(do_advance_rotation),
}];

pub struct RetinaFsm {
    fsm: Fsm<RetinaState, RetinaData, RetinaLink>,
    data: RetinaData,
    /// Last long press already reported, so it is warned about only once.
    ignored_press: u32,
}

impl RetinaFsm {
    pub fn new(long_button_press_ms: u32, codes: [u32; ROTATION_CAPACITY]) -> Result<Self> {
        let fsm = Fsm::new("retina", &RETINA_TRANSITIONS)?;
        info!(
            "retina: long press {} ms, rotation {:08X?}",
            long_button_press_ms, codes
        );
        Ok(Self {
            fsm,
            data: RetinaData {
                long_button_press_ms,
                codes,
                index: 0,
            },
            ignored_press: 0,
        })
    }

    /// Rotation slot the next short press will use.
    pub fn index(&self) -> usize {
        self.data.index
    }

    pub fn codes(&self) -> &[u32; ROTATION_CAPACITY] {
        &self.data.codes
    }

    pub fn long_button_press_ms(&self) -> u32 {
        self.data.long_button_press_ms
    }
}

impl StateMachine for RetinaFsm {
    type State = RetinaState;

    fn state(&self) -> RetinaState {
        self.fsm.state()
    }

    fn check_activity(&self) -> bool {
        false
    }
}

impl<'a, P: TxPort + 'static> Fire<RetinaPeers<'a, P>> for RetinaFsm {
    fn fire(&mut self, peers: &mut RetinaPeers<'a, P>) -> bool {
        let mut link = RetinaLink::sample(peers.button);
        let fired = self.fsm.fire(&mut self.data, &mut link);
        link.apply(&mut *peers.button, &mut *peers.tx);

        if !fired
            && link.duration >= self.data.long_button_press_ms
            && link.duration != self.ignored_press
        {
            warn!("retina: {} ms press ignored (long press)", link.duration);
            self.ignored_press = link.duration;
        }
        fired
    }
}
