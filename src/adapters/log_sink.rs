//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { button_id, tx_id } => {
                info!("START | button={} tx={}", button_id, tx_id);
            }
            AppEvent::ButtonChanged { from, to } => {
                debug!("BUTTON | {:?} -> {:?}", from, to);
            }
            AppEvent::CodeQueued { index, code } => {
                info!("QUEUE | slot={} code=0x{:08X}", index, code);
            }
            AppEvent::FrameSent { tx_id, code } => {
                info!("TX | tx={} code=0x{:08X}", tx_id, code);
            }
        }
    }
}
