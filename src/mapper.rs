//! Lux to servo angle / step interval mapping.
//!
//! Both mappings clamp the reading to `0..=LUX_MAX` first, so anything the sensor
//! reports ends up inside the servo's travel and the allowed step rates.

use std::time::Duration;

/// Brightest reading that still changes the output. Anything above saturates.
pub const LUX_MAX: f32 = 1000.0;

/// Servo travel in degrees (0 = dark, 180 = bright).
pub const POSITION_MAX: u8 = 180;

/// Step interval used when it is brightest (fastest movement).
pub const INTERVAL_MIN_MS: u32 = 20;
/// Step interval used when it is dark (slowest movement).
pub const INTERVAL_MAX_MS: u32 = 200;

/// Clamp a raw reading into `0..=LUX_MAX`. NaN counts as darkness.
pub fn clamp_reading(lux: f32) -> f32 {
    if lux.is_nan() {
        return 0.0;
    }
    lux.clamp(0.0, LUX_MAX)
}

/// Fraction of full scale covered by the reading, in `0.0..=1.0`.
pub fn reading_ratio(lux: f32) -> f32 {
    clamp_reading(lux) / LUX_MAX
}

/// Target angle for a reading: `round(lux * 180 / 1000)`.
pub fn map_reading_to_position(lux: f32) -> u8 {
    let span = POSITION_MAX as f32;
    (reading_ratio(lux) * span).round() as u8
}

/// Wait between two one-degree steps: `200 - lux * 180 / 1000` milliseconds.
///
/// Inverse to the reading, so brighter light makes the servo travel faster. Kept to the
/// microsecond, so the rate still follows the light between two whole-degree targets.
pub fn map_reading_to_interval(lux: f32) -> Duration {
    let span = (INTERVAL_MAX_MS - INTERVAL_MIN_MS) as f32;
    let ms = INTERVAL_MAX_MS as f32 - reading_ratio(lux) * span;
    Duration::from_micros((ms * 1000.0).round() as u64)
}
