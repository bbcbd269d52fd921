//! NEC infrared wire format.
//!
//! A frame is a sequence of carrier bursts, each an ON phase followed by an
//! OFF phase, measured in symbol ticks of 56.25 µs:
//!
//! ```text
//!  ┌──────────────┐        ┌─┐  ┌─┐    ┌─┐                ┌─┐
//!  │   prologue   │        │ │  │ │    │ │     · · ·      │ │
//! ─┘  160 ON      └─80 OFF─┘ └──┘ └────┘ └────────────────┘ └── 3560 OFF ──
//!                          bit "0"  bit "1"    32 bits       epilogue
//!                          10/10    10/30     MSB first       10/3560
//! ```
//!
//! This module only describes the frame; [`send_nec_code`](crate::fsm::tx::send_nec_code)
//! drives it onto a [`TxPort`](crate::app::ports::TxPort).

/// Duration of one symbol tick in microseconds.
pub const NEC_TX_TIMER_TICK_BASE_US: f32 = 56.25;

/// Symbol timer input clock; 900 counts per tick give exactly 56.25 µs.
pub const NEC_SYMBOL_TIMER_RESOLUTION_HZ: u32 = 16_000_000;
/// Timer counts per symbol tick at [`NEC_SYMBOL_TIMER_RESOLUTION_HZ`].
pub const NEC_SYMBOL_TIMER_PERIOD_COUNTS: u64 = 900;

pub const NEC_TX_PROLOGUE_TICKS_ON: u32 = 160;
pub const NEC_TX_PROLOGUE_TICKS_OFF: u32 = 80;
pub const NEC_TX_SYM_0_TICKS_ON: u32 = 10;
pub const NEC_TX_SYM_0_TICKS_OFF: u32 = 10;
pub const NEC_TX_SYM_1_TICKS_ON: u32 = 10;
pub const NEC_TX_SYM_1_TICKS_OFF: u32 = 30;
pub const NEC_TX_EPILOGUE_TICKS_ON: u32 = 10;
/// Long trailing gap (~200 ms) so back-to-back frames stay separable.
pub const NEC_TX_EPILOGUE_TICKS_OFF: u32 = 3560;

/// Carrier frequency gated during ON phases.
pub const NEC_PWM_FREQ_HZ: u32 = 38_000;
/// Carrier duty cycle while gated on.
pub const NEC_PWM_DUTY_PERCENT: u8 = 50;

/// Payload bits per frame.
pub const NEC_CODE_BITS: u32 = 32;
/// Bursts per frame: prologue + one per bit + epilogue.
pub const NEC_FRAME_BURSTS: usize = NEC_CODE_BITS as usize + 2;

// ---------------------------------------------------------------------------
// Bursts
// ---------------------------------------------------------------------------

/// One carrier-on / carrier-off pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burst {
    pub on_ticks: u32,
    pub off_ticks: u32,
}

impl Burst {
    pub const PROLOGUE: Self = Self::new(NEC_TX_PROLOGUE_TICKS_ON, NEC_TX_PROLOGUE_TICKS_OFF);
    pub const SYMBOL_0: Self = Self::new(NEC_TX_SYM_0_TICKS_ON, NEC_TX_SYM_0_TICKS_OFF);
    pub const SYMBOL_1: Self = Self::new(NEC_TX_SYM_1_TICKS_ON, NEC_TX_SYM_1_TICKS_OFF);
    pub const EPILOGUE: Self = Self::new(NEC_TX_EPILOGUE_TICKS_ON, NEC_TX_EPILOGUE_TICKS_OFF);

    pub const fn new(on_ticks: u32, off_ticks: u32) -> Self {
        Self { on_ticks, off_ticks }
    }

    /// The data symbol for a single bit.
    pub const fn symbol(bit: bool) -> Self {
        if bit { Self::SYMBOL_1 } else { Self::SYMBOL_0 }
    }

    /// Total length of the burst in symbol ticks.
    pub const fn ticks(&self) -> u32 {
        self.on_ticks + self.off_ticks
    }
}

// ---------------------------------------------------------------------------
// Frame iterator
// ---------------------------------------------------------------------------

/// Iterator over the bursts of one frame, in transmission order.
#[derive(Debug, Clone)]
pub struct Frame {
    code: u32,
    /// Next burst to yield: 0 = prologue, 1..=32 = bits, 33 = epilogue.
    pos: usize,
}

/// Build the burst sequence for `code`: prologue, 32 bits MSB→LSB, epilogue.
pub fn frame(code: u32) -> Frame {
    Frame { code, pos: 0 }
}

impl Iterator for Frame {
    type Item = Burst;

    fn next(&mut self) -> Option<Burst> {
        let burst = match self.pos {
            0 => Burst::PROLOGUE,
            p if p <= NEC_CODE_BITS as usize => {
                let mask = 0x8000_0000u32 >> (p - 1);
                Burst::symbol(self.code & mask != 0)
            }
            p if p == NEC_FRAME_BURSTS - 1 => Burst::EPILOGUE,
            _ => return None,
        };
        self.pos += 1;
        Some(burst)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = NEC_FRAME_BURSTS.saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frame {}

/// Total frame length in symbol ticks.
pub fn frame_ticks(code: u32) -> u32 {
    frame(code).map(|b| b.ticks()).sum()
}

/// Total frame length in microseconds.
pub fn frame_duration_us(code: u32) -> u32 {
    (frame_ticks(code) as f32 * NEC_TX_TIMER_TICK_BASE_US) as u32
}

// ---------------------------------------------------------------------------
// Code composition
// ---------------------------------------------------------------------------

/// A 32-bit NEC word split into its extended address and command.
///
/// Layout as transmitted (MSB first): `address[15:0] | command | !command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NecCode {
    pub address: u16,
    pub command: u8,
}

impl NecCode {
    pub const fn new(address: u16, command: u8) -> Self {
        Self { address, command }
    }

    /// Pack into the 32-bit word handed to the transmitter.
    pub const fn to_code(self) -> u32 {
        ((self.address as u32) << 16) | ((self.command as u32) << 8) | ((!self.command) as u32)
    }

    /// Split a 32-bit word; `None` when the command check byte is not the
    /// bitwise inverse of the command.
    pub const fn from_code(code: u32) -> Option<Self> {
        let command = (code >> 8) as u8;
        let check = code as u8;
        if command ^ check != 0xFF {
            return None;
        }
        Some(Self {
            address: (code >> 16) as u16,
            command,
        })
    }
}

impl From<NecCode> for u32 {
    fn from(c: NecCode) -> Self {
        c.to_code()
    }
}
