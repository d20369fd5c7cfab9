//! SG90-style hobby servo on an LEDC channel.
//!
//! 50 Hz frame, 0.5ms pulse for 0 degrees, 2.5ms pulse for 180 degrees.

use crate::mapper::POSITION_MAX;

pub const PWM_FREQ_HZ: u32 = 50;
const PERIOD_US: u32 = 20_000;
const MIN_PULSE_US: u32 = 500;
const MAX_PULSE_US: u32 = 2500;

/// LEDC duty for `degrees`, given the channel's maximum duty.
pub fn angle_to_duty(degrees: u8, max_duty: u32) -> u32 {
    let degrees = degrees.min(POSITION_MAX) as u64;
    let pulse_us =
        MIN_PULSE_US as u64 + degrees * (MAX_PULSE_US - MIN_PULSE_US) as u64 / POSITION_MAX as u64;
    (pulse_us * max_duty as u64 / PERIOD_US as u64) as u32
}

#[cfg(target_os = "espidf")]
pub use ledc::Servo;

#[cfg(target_os = "espidf")]
mod ledc {
    use esp_idf_svc::hal::ledc::LedcDriver;

    use super::angle_to_duty;
    use crate::actuator::ServoOutput;

    pub struct Servo<'a> {
        pub channel_driver: LedcDriver<'a>,
    }

    impl ServoOutput for Servo<'_> {
        fn set_position(&mut self, degrees: u8) -> anyhow::Result<()> {
            let max_duty = self.channel_driver.get_max_duty();
            self.channel_driver
                .set_duty(angle_to_duty(degrees, max_duty))?;
            Ok(())
        }
    }
}
