//! Debounced push-button machine.
//!
//! ```text
//!  RELEASED ──[pressed]──▶ PRESSED_WAIT ──[now > next_timeout]──▶ PRESSED
//!     ▲                                                              │
//!     │                                                         [released]
//!     │                                                              ▼
//!     └────────────[now > next_timeout]──────────────────── RELEASED_WAIT
//! ```
//!
//! The two wait states never look at the raw signal, only at the clock,
//! so any bounce shorter than `debounce_time` is swallowed.  Releasing the
//! button publishes the press length in `duration`; it stays there until
//! a consumer calls [`ButtonFsm::reset_duration`].
//!
//! The port is sampled once per fire into a [`ButtonInputs`] snapshot that
//! the guards and actions read.

use log::{debug, info};

use super::{Fire, Fsm, StateMachine, Transition};
use crate::app::ports::ButtonPort;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Released,
    PressedWait,
    Pressed,
    ReleasedWait,
}

/// Port readings taken at the start of a fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonInputs {
    pub pressed: bool,
    pub now_ms: u32,
}

/// Private data of the button machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonData {
    pub debounce_time: u32,
    pub next_timeout: u32,
    pub tick_pressed: u32,
    pub duration: u32,
    pub button_id: u32,
}

// ═══════════════════════════════════════════════════════════════════════════
//  Guards
// ═══════════════════════════════════════════════════════════════════════════

fn check_button_pressed(_b: &ButtonData, io: &ButtonInputs) -> bool {
    io.pressed
}

fn check_button_released(_b: &ButtonData, io: &ButtonInputs) -> bool {
    !io.pressed
}

/// Strictly past `next_timeout`, tolerant of the millisecond counter wrapping.
fn check_timeout(b: &ButtonData, io: &ButtonInputs) -> bool {
    (io.now_ms.wrapping_sub(b.next_timeout) as i32) > 0
}

// ═══════════════════════════════════════════════════════════════════════════
//  Actions
// ═══════════════════════════════════════════════════════════════════════════

fn do_store_tick_pressed(b: &mut ButtonData, io: &mut ButtonInputs) {
    b.tick_pressed = io.now_ms;
    b.next_timeout = io.now_ms.wrapping_add(b.debounce_time);
}

fn do_set_duration(b: &mut ButtonData, io: &mut ButtonInputs) {
    b.duration = io.now_ms.wrapping_sub(b.tick_pressed);
    b.next_timeout = io.now_ms.wrapping_add(b.debounce_time);
    debug!("button {}: released after {} ms", b.button_id, b.duration);
}

static BUTTON_TRANSITIONS: [Transition<ButtonState, ButtonData, ButtonInputs>; 4] = [
    Transition {
        from: ButtonState::Released,
        guard: check_button_pressed,
        to: ButtonState::PressedWait,
        action: Some(do_store_tick_pressed),
    },
    Transition {
        from: ButtonState::PressedWait,
        guard: check_timeout,
        to: ButtonState::Pressed,
        action: None,
    },
    Transition {
        from: ButtonState::Pressed,
        guard: check_button_released,
        to: ButtonState::ReleasedWait,
        action: Some(do_set_duration),
    },
    Transition {
        from: ButtonState::ReleasedWait,
        guard: check_timeout,
        to: ButtonState::Released,
        action: None,
    },
];

// ═══════════════════════════════════════════════════════════════════════════
//  Machine
// ═══════════════════════════════════════════════════════════════════════════

pub struct ButtonFsm {
    fsm: Fsm<ButtonState, ButtonData, ButtonInputs>,
    data: ButtonData,
}

impl ButtonFsm {
    /// Bring up `button_id` through the port and start in `Released`.
    pub fn new(port: &mut impl ButtonPort, debounce_time: u32, button_id: u32) -> Result<Self> {
        port.init(button_id)?;
        let fsm = Fsm::new("button", &BUTTON_TRANSITIONS)?;
        info!("button {}: debounce {} ms", button_id, debounce_time);
        Ok(Self {
            fsm,
            data: ButtonData {
                debounce_time,
                next_timeout: 0,
                tick_pressed: 0,
                duration: 0,
                button_id,
            },
        })
    }

    /// Length of the last completed press in ms; 0 when none is pending.
    pub fn get_duration(&self) -> u32 {
        self.data.duration
    }

    /// Mark the last press as consumed.
    pub fn reset_duration(&mut self) {
        self.data.duration = 0;
    }

    pub fn button_id(&self) -> u32 {
        self.data.button_id
    }

    pub fn debounce_time_ms(&self) -> u32 {
        self.data.debounce_time
    }

    /// Snapshot of the private fields, for diagnostics.
    pub fn data(&self) -> &ButtonData {
        &self.data
    }
}

impl StateMachine for ButtonFsm {
    type State = ButtonState;

    fn state(&self) -> ButtonState {
        self.fsm.state()
    }

    fn check_activity(&self) -> bool {
        self.fsm.state() != ButtonState::Released
    }
}

impl<P: ButtonPort> Fire<P> for ButtonFsm {
    fn fire(&mut self, port: &mut P) -> bool {
        let mut inputs = ButtonInputs {
            pressed: port.is_pressed(self.data.button_id),
            now_ms: port.tick(),
        };
        self.fsm.fire(&mut self.data, &mut inputs)
    }
}
