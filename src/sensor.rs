use thiserror::Error;

/// A light reading that could not be taken this cycle.
///
/// Always transient: the loop reports it and tries again on the next cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    #[error("light sensor bus error: {0}")]
    Bus(String),
    #[error("light sensor returned an unusable value ({0} lx)")]
    Invalid(f32),
}

pub trait LightSensor {
    /// Take one illuminance sample in lux.
    fn read_lux(&mut self) -> Result<f32, SensorError>;
}

/// Reject values no real sensor produces. Anything else, however bright, is passed on
/// and clamped by the mapper.
pub fn check_reading(lux: f32) -> Result<f32, SensorError> {
    if lux.is_finite() && lux >= 0.0 {
        Ok(lux)
    } else {
        Err(SensorError::Invalid(lux))
    }
}

#[cfg(target_os = "espidf")]
pub use bh1750_sensor::Bh1750Sensor;

#[cfg(target_os = "espidf")]
mod bh1750_sensor {
    use bh1750::{Resolution, BH1750};
    use esp_idf_hal::delay::Delay;
    use esp_idf_hal::i2c::I2cDriver;

    use super::{check_reading, LightSensor, SensorError};
    use crate::config::BH1750_ADDR_PIN_HIGH;

    /// BH1750 ambient light sensor on its own I2C bus.
    pub struct Bh1750Sensor<'d> {
        sensor: BH1750<I2cDriver<'d>, Delay>,
    }

    impl<'d> Bh1750Sensor<'d> {
        pub fn new(i2c: I2cDriver<'d>) -> Self {
            let sensor = BH1750::new(i2c, Delay::new_default(), BH1750_ADDR_PIN_HIGH);
            Self { sensor }
        }
    }

    impl LightSensor for Bh1750Sensor<'_> {
        fn read_lux(&mut self) -> Result<f32, SensorError> {
            let lux = self
                .sensor
                .get_one_time_measurement(Resolution::High2)
                .map_err(|e| SensorError::Bus(format!("{e:?}")))?;
            check_reading(lux)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plausible_readings() {
        assert_eq!(check_reading(0.0), Ok(0.0));
        assert_eq!(check_reading(312.5), Ok(312.5));
        assert_eq!(check_reading(65_535.0), Ok(65_535.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(check_reading(-3.0), Err(SensorError::Invalid(-3.0)));
        assert!(matches!(
            check_reading(f32::INFINITY),
            Err(SensorError::Invalid(_))
        ));
        assert!(matches!(check_reading(f32::NAN), Err(SensorError::Invalid(_))));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SensorError::Bus("nack".into()).to_string(),
            "light sensor bus error: nack"
        );
        assert_eq!(
            SensorError::Invalid(-1.0).to_string(),
            "light sensor returned an unusable value (-1 lx)"
        );
    }
}
