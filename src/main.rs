//! Retina firmware entry point.
//!
//! Hexagonal architecture with a cooperative single-task loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  LatchedButtons      HalTransmitters          LogEventSink     │
//! │  (ButtonPort, ISR)   (TxPort: LEDC + gptimer) (EventSink)      │
//! │        └──────── HardwareAdapter ────────┘                     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            RetinaService (pure logic)                  │    │
//! │  │  ButtonFsm · TxFsm · RetinaFsm                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use log::info;

use retina::adapters::hal::HalTransmitters;
use retina::adapters::hardware::HardwareAdapter;
use retina::adapters::log_sink::LogEventSink;
use retina::adapters::time::SystemClock;
use retina::app::service::RetinaService;
use retina::config::RetinaConfig;
use retina::drivers::button::LatchedButtons;
use retina::drivers::ir_led::LedcCarrier;
use retina::drivers::symbol_timer::IsrSymbolTimer;
use retina::drivers::watchdog::Watchdog;
use retina::drivers::hw_init;

/// Loop yield while a press is being debounced or measured.
const ACTIVE_POLL_MS: u32 = 1;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Retina v{}                          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = RetinaConfig::default();
    config.validate().context("invalid configuration")?;

    // ── 3. Initialise hardware peripherals ────────────────────
    hw_init::init_peripherals().context("peripheral init")?;
    hw_init::init_isr_service(config.button_id as usize).context("ISR service")?;
    let watchdog = Watchdog::default();

    // ── 4. Construct adapters ─────────────────────────────────
    let buttons = LatchedButtons::board(SystemClock::new());
    let mut transmitters: HalTransmitters<LedcCarrier, IsrSymbolTimer, 1> =
        HalTransmitters::new(IsrSymbolTimer::board());
    transmitters.register(config.tx_id, LedcCarrier::board())?;

    let mut hw = HardwareAdapter::new(buttons, transmitters);
    let mut log_sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = RetinaService::new(&config, &mut hw)?;
    app.start(&mut log_sink);

    info!("System ready. Entering main loop.");

    // ── 6. Main loop ──────────────────────────────────────────
    loop {
        app.fire_all(&mut hw, &mut log_sink);
        watchdog.feed();

        // Yield so the idle task runs; poll faster while a press is live.
        let wait_ms = if app.is_idle() {
            config.idle_poll_ms
        } else {
            ACTIVE_POLL_MS
        };
        FreeRtos::delay_ms(wait_ms);
    }
}
