//! Fuzz target: NEC frame encoder
//!
//! Encodes arbitrary 32-bit codes and checks the frame shape: fixed burst
//! count, prologue and epilogue in place, symbols matching the bits MSB
//! first, and `frame_ticks` agreeing with the bursts.
//!
//! cargo fuzz run fuzz_nec_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use retina::nec::{self, Burst, NEC_FRAME_BURSTS, NecCode};

fuzz_target!(|code: u32| {
    let bursts: Vec<Burst> = nec::frame(code).collect();
    assert_eq!(bursts.len(), NEC_FRAME_BURSTS);
    assert_eq!(bursts[0], Burst::PROLOGUE);
    assert_eq!(bursts[NEC_FRAME_BURSTS - 1], Burst::EPILOGUE);

    for (i, b) in bursts[1..NEC_FRAME_BURSTS - 1].iter().enumerate() {
        let bit = code & (1 << (31 - i)) != 0;
        assert_eq!(*b, Burst::symbol(bit));
    }

    let total: u32 = bursts.iter().map(Burst::ticks).sum();
    assert_eq!(nec::frame_ticks(code), total);

    if let Some(nec) = NecCode::from_code(code) {
        assert_eq!(nec.to_code(), code);
    }
});
