//! IR LED carrier on an LEDC channel.
//!
//! The LEDC timer runs permanently at 38 kHz; gating the carrier is a
//! duty change between 0 and 50 %.  Exposed as an
//! [`embedded_hal::pwm::SetDutyCycle`] so the transmitter adapter does not
//! care which peripheral sits behind it.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::drivers::hw_init;
use crate::pins;

pub struct LedcCarrier {
    channel: u32,
    duty: u16,
}

impl LedcCarrier {
    /// The board IR channel.
    pub fn board() -> Self {
        Self::new(pins::IR_LEDC_CHANNEL)
    }

    pub fn new(channel: u32) -> Self {
        Self { channel, duty: 0 }
    }

    /// Last duty written.
    pub fn duty(&self) -> u16 {
        self.duty
    }

    pub fn is_on(&self) -> bool {
        self.duty > 0
    }
}

impl ErrorType for LedcCarrier {
    type Error = Infallible;
}

impl SetDutyCycle for LedcCarrier {
    fn max_duty_cycle(&self) -> u16 {
        pins::PWM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        let duty = duty.min(pins::PWM_MAX_DUTY);
        hw_init::ledc_set(self.channel, u32::from(duty));
        self.duty = duty;
        Ok(())
    }
}
