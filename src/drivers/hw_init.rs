//! One-shot hardware peripheral initialization.
//!
//! Configures the button GPIO, the LEDC carrier and the symbol timer using
//! raw ESP-IDF sys calls.  Called once from `main()` before the loop
//! starts.  Host builds get logging stubs with the same signatures.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    IsrInstallFailed(i32),
    TimerInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::TimerInitFailed(rc)  => write!(f, "symbol timer init failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::nec::{NEC_PWM_FREQ_HZ, NEC_SYMBOL_TIMER_PERIOD_COUNTS, NEC_SYMBOL_TIMER_RESOLUTION_HZ};
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    if ret == ESP_OK as esp_err_t { Ok(()) } else { Err(err(ret)) }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_ledc()?;
        init_symbol_timer()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    check(unsafe { gpio_config(&btn_cfg) }, HwInitError::GpioConfigFailed)?;

    info!("hw_init: button GPIO{} configured", pins::BUTTON_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe from task or ISR context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Idle level of an active-low input with pull-up.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── LEDC carrier ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // 38 kHz, 10-bit: the 80 MHz APB clock leaves plenty of headroom.
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: pins::IR_LEDC_TIMER,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_10_BIT,
        freq_hz: NEC_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&timer) }, HwInitError::LedcInitFailed)?;

    // Carrier starts gated off.
    let channel = ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: pins::IR_LEDC_CHANNEL,
        timer_sel: pins::IR_LEDC_TIMER,
        gpio_num: pins::IR_TX_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    check(unsafe { ledc_channel_config(&channel) }, HwInitError::LedcInitFailed)?;

    info!("hw_init: LEDC CH{} @ {} Hz on GPIO{}", pins::IR_LEDC_CHANNEL, NEC_PWM_FREQ_HZ, pins::IR_TX_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) {
    // SAFETY: the channel was configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u32) {}

// ── Symbol timer (gptimer) ────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut SYMBOL_TIMER: gptimer_handle_t = core::ptr::null_mut();

/// SAFETY: SYMBOL_TIMER is written once in `init_symbol_timer()` before the
/// loop starts.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn symbol_timer() -> gptimer_handle_t {
    unsafe { SYMBOL_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn symbol_timer_alarm_cb(
    _timer: gptimer_handle_t,
    _edata: *const gptimer_alarm_event_data_t,
    _ctx: *mut core::ffi::c_void,
) -> bool {
    crate::drivers::symbol_timer::on_symbol_tick();
    false
}

#[cfg(target_os = "espidf")]
unsafe fn init_symbol_timer() -> Result<(), HwInitError> {
    let cfg = gptimer_config_t {
        clk_src: soc_periph_gptimer_clk_src_t_GPTIMER_CLK_SRC_DEFAULT,
        direction: gptimer_count_direction_t_GPTIMER_COUNT_UP,
        resolution_hz: NEC_SYMBOL_TIMER_RESOLUTION_HZ,
        ..Default::default()
    };
    // SAFETY: SYMBOL_TIMER is only written here, once at boot.
    check(unsafe { gptimer_new_timer(&cfg, &raw mut SYMBOL_TIMER) }, HwInitError::TimerInitFailed)?;

    let cbs = gptimer_event_callbacks_t {
        on_alarm: Some(symbol_timer_alarm_cb),
    };
    check(
        unsafe { gptimer_register_event_callbacks(symbol_timer(), &cbs, core::ptr::null_mut()) },
        HwInitError::TimerInitFailed,
    )?;

    // One alarm per 56.25 µs symbol tick, reloading to zero.
    let mut alarm = gptimer_alarm_config_t {
        alarm_count: NEC_SYMBOL_TIMER_PERIOD_COUNTS,
        reload_count: 0,
        ..Default::default()
    };
    alarm.flags.set_auto_reload_on_alarm(1);
    check(unsafe { gptimer_set_alarm_action(symbol_timer(), &alarm) }, HwInitError::TimerInitFailed)?;
    check(unsafe { gptimer_enable(symbol_timer()) }, HwInitError::TimerInitFailed)?;

    info!("hw_init: symbol timer {} Hz / {} counts", NEC_SYMBOL_TIMER_RESOLUTION_HZ, NEC_SYMBOL_TIMER_PERIOD_COUNTS);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn symbol_timer_start() {
    // SAFETY: symbol_timer() contract, main task only.  A start on a running
    // timer returns ESP_ERR_INVALID_STATE, which is harmless here.
    unsafe {
        let t = symbol_timer();
        if t.is_null() { return; }
        gptimer_set_raw_count(t, 0);
        gptimer_start(t);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn symbol_timer_start() {}

#[cfg(target_os = "espidf")]
pub fn symbol_timer_stop() {
    // SAFETY: symbol_timer() contract, main task only.
    unsafe {
        let t = symbol_timer();
        if !t.is_null() { gptimer_stop(t); }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn symbol_timer_stop() {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(arg: *mut core::ffi::c_void) {
    // The registration argument carries the latch slot.
    let slot = arg as usize;
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let high = unsafe { gpio_get_level(pins::BUTTON_GPIO) } != 0;
    crate::drivers::button::button_isr_handler(slot, high != pins::BUTTON_ACTIVE_LOW);
}

/// Install the per-pin GPIO ISR service and hook the button handler to
/// `slot` of the latch table.  Call after [`init_peripherals`].
#[cfg(target_os = "espidf")]
pub fn init_isr_service(slot: usize) -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.  The handler only stores an atomic.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as esp_err_t && ret != ESP_ERR_INVALID_STATE as esp_err_t {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Button: any edge, so both press and release are latched.
        gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        check(
            gpio_isr_handler_add(pins::BUTTON_GPIO, Some(button_gpio_isr), slot as *mut core::ffi::c_void),
            HwInitError::IsrInstallFailed,
        )?;
        gpio_intr_enable(pins::BUTTON_GPIO);
    }
    info!("hw_init: ISR service installed (button -> latch {})", slot);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service(_slot: usize) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
