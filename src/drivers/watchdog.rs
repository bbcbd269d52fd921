//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the main loop stops passing.  A frame send blocks
//! the loop for up to ~290 ms, so the timeout must stay well above one
//! frame.  The loop calls [`Watchdog::feed`] once per pass.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::{info, warn};

use crate::nec::frame_duration_us;

/// Default TWDT timeout.
pub const WATCHDOG_TIMEOUT_MS: u32 = 2_000;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new(WATCHDOG_TIMEOUT_MS)
    }
}

impl Watchdog {
    /// Configure the TWDT and subscribe the current task.  Timeouts shorter
    /// than twice the longest frame are raised to that floor.
    pub fn new(timeout_ms: u32) -> Self {
        let timeout_ms = timeout_ms.max(Self::min_timeout_ms());

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: TWDT calls from the main task during bring-up.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK as esp_err_t {
                    warn!("TWDT reconfigure returned {} (may already be configured)", ret);
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK as esp_err_t;
                if subscribed {
                    info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
                } else {
                    warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self { timeout_ms, subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op ({} ms)", timeout_ms);
            Self { timeout_ms }
        }
    }

    /// Two all-ones frames back to back.
    pub fn min_timeout_ms() -> u32 {
        2 * frame_duration_us(u32::MAX).div_ceil(1_000)
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Feed the watchdog.  Must be called at least once per timeout.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the TWDT entry of the calling task.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
