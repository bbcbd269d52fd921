//! Fuzz target: `ButtonFsm` + `RetinaFsm` over arbitrary input timelines
//!
//! Each 5-byte chunk is one loop pass: a little-endian clock step and a
//! button level.  Asserts that nothing panics, the rotation index stays
//! in range, and a released button always settles back to `Released`.
//!
//! cargo fuzz run fuzz_button_fsm

#![no_main]

use libfuzzer_sys::fuzz_target;
use retina::app::ports::{ButtonPort, TxPort};
use retina::error::Result;
use retina::fsm::button::{ButtonFsm, ButtonState};
use retina::fsm::retina::{ROTATION_CAPACITY, RetinaFsm, RetinaPeers};
use retina::fsm::tx::TxFsm;
use retina::fsm::{Fire, StateMachine};

#[derive(Default)]
struct Rig {
    pressed: bool,
    now_ms: u32,
    ticks: u32,
}

impl ButtonPort for Rig {
    fn init(&mut self, _button_id: u32) -> Result<()> {
        Ok(())
    }
    fn is_pressed(&mut self, _button_id: u32) -> bool {
        self.pressed
    }
    fn tick(&self) -> u32 {
        self.now_ms
    }
}

impl TxPort for Rig {
    fn init(&mut self, _tx_id: u8, _carrier_on: bool) -> Result<()> {
        Ok(())
    }
    fn carrier_set(&mut self, _tx_id: u8, _on: bool) {}
    fn symbol_timer_start(&mut self) {}
    fn symbol_timer_stop(&mut self) {}
    fn symbol_timer_ticks(&mut self) -> u32 {
        // Jump far enough that every wait finishes on the second read.
        self.ticks = self.ticks.wrapping_add(4_000);
        self.ticks
    }
}

fuzz_target!(|data: &[u8]| {
    let mut rig = Rig::default();
    let Ok(mut button) = ButtonFsm::new(&mut rig, 150, 0) else {
        return;
    };
    let Ok(mut tx) = TxFsm::new(&mut rig, 0) else {
        return;
    };
    let Ok(mut retina) = RetinaFsm::new(3_000, [1, 2, 3]) else {
        return;
    };

    for chunk in data.chunks_exact(5) {
        let step = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        rig.now_ms = rig.now_ms.wrapping_add(step % 10_000);
        rig.pressed = chunk[4] & 1 == 1;

        button.fire(&mut rig);
        tx.fire(&mut rig);
        retina.fire(&mut RetinaPeers {
            button: &mut button,
            tx: &mut tx,
        });
        assert!(retina.index() < ROTATION_CAPACITY);
    }

    // Released and left alone past the debounce window, three passes are
    // enough to settle any in-flight press.
    for _ in 0..3 {
        rig.pressed = false;
        rig.now_ms = rig.now_ms.wrapping_add(151);
        button.fire(&mut rig);
    }
    assert_eq!(button.state(), ButtonState::Released);
});
