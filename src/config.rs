//! Board wiring and control loop timing.

use std::time::Duration;

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::mapper::{INTERVAL_MAX_MS, INTERVAL_MIN_MS, POSITION_MAX};

/// BH1750 `ADDR` pin tied low -> 0x23.
pub const BH1750_ADDR_PIN_HIGH: bool = false;
pub const SENSOR_I2C_BAUDRATE_HZ: u32 = 100_000;

pub const DISPLAY_I2C_ADDR: u8 = 0x3C;
pub const DISPLAY_I2C_BAUDRATE_HZ: u32 = 400_000;

/// Control loop timing and start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Angle the servo is parked at before the first reading.
    pub neutral_position: u8,
    /// Step interval used until the first reading arrives.
    pub initial_step_interval_ms: u32,
    /// Pause at the end of every cycle, bounds how hard the sensor bus is polled.
    pub idle_wait_ms: u32,
    /// How long the ready notice stays up before the loop starts.
    pub ready_notice_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            neutral_position: 90,
            initial_step_interval_ms: 100,
            idle_wait_ms: 50,
            ready_notice_ms: 2000,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.neutral_position <= POSITION_MAX,
            "neutral position {} is past the servo's {} degree travel",
            self.neutral_position,
            POSITION_MAX
        );
        ensure!(
            (INTERVAL_MIN_MS..=INTERVAL_MAX_MS).contains(&self.initial_step_interval_ms),
            "initial step interval {}ms outside {}..={}ms",
            self.initial_step_interval_ms,
            INTERVAL_MIN_MS,
            INTERVAL_MAX_MS
        );
        Ok(())
    }

    pub fn initial_step_interval(&self) -> Duration {
        Duration::from_millis(self.initial_step_interval_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ControlConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ControlConfig = serde_json::from_str(r#"{ "idle_wait_ms": 10 }"#).unwrap();
        assert_eq!(config.idle_wait_ms, 10);
        assert_eq!(config.neutral_position, 90);
        assert_eq!(config.initial_step_interval(), Duration::from_millis(100));
    }

    #[test]
    fn logs_as_json() {
        let json = serde_json::to_string(&ControlConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"neutral_position":90,"initial_step_interval_ms":100,"idle_wait_ms":50,"ready_notice_ms":2000}"#
        );
    }

    #[test]
    fn rejects_bad_values() {
        let config = ControlConfig {
            neutral_position: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ControlConfig {
            initial_step_interval_ms: 5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "initial step interval 5ms outside 20..=200ms");
    }
}
