//! GPIO / peripheral pin assignments for the Retina board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// User button (active-low with pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button (BOOT button on the dev board).
pub const BUTTON_GPIO: i32 = 0;
/// The button pulls the line to ground when held.
pub const BUTTON_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// IR transmitter (LED driven through an NPN stage)
// ---------------------------------------------------------------------------

/// LEDC output feeding the IR LED transistor.
pub const IR_TX_GPIO: i32 = 4;
/// LEDC channel reserved for the carrier.
pub const IR_LEDC_CHANNEL: u32 = 0;
/// LEDC timer reserved for the carrier.
pub const IR_LEDC_TIMER: u32 = 0;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  10-bit gives 0 – 1023 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 10;
/// Largest duty value at [`PWM_RESOLUTION_BITS`].
pub const PWM_MAX_DUTY: u16 = (1 << PWM_RESOLUTION_BITS) - 1;
