//! Outbound application events.
//!
//! The [`RetinaService`](super::service::RetinaService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, blink a LED, count them
//! in a test.

use crate::fsm::button::ButtonState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has been built and is about to run.
    Started { button_id: u32, tx_id: u8 },

    /// The debounced button moved between states.
    ButtonChanged { from: ButtonState, to: ButtonState },

    /// A short press queued the rotation code at `index`.
    CodeQueued { index: usize, code: u32 },

    /// A complete NEC frame left the transmitter.
    FrameSent { tx_id: u8, code: u32 },
}
