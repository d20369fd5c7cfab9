//! Status output: the serial console dashboard and the OLED.
//!
//! Both consume the same [`ReportSnapshot`] and quantize it through the helpers here, so
//! a 40 character console bar and a 120 pixel OLED bar always agree on how full they are.

use std::time::Duration;

use crate::mapper::{clamp_reading, INTERVAL_MAX_MS, INTERVAL_MIN_MS, LUX_MAX};
use crate::sensor::SensorError;

pub mod console;
pub mod oled;

pub use console::ConsoleDashboard;
pub use oled::{OledDashboard, Panel};

/// What the sinks get to see whenever the target angle changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportSnapshot {
    /// Raw reading in lux, before clamping.
    pub reading: f32,
    /// Angle the servo is at right now (not the target).
    pub position: u8,
    pub step_interval: Duration,
}

impl ReportSnapshot {
    /// Step interval in whole milliseconds, rounded down like the driver's step wait.
    pub fn interval_ms(&self) -> u32 {
        self.step_interval.as_millis() as u32
    }

    /// Brightness on a `0..=scale` gauge, rounded down.
    pub fn light_fill(&self, scale: u32) -> u32 {
        (clamp_reading(self.reading) * scale as f32 / LUX_MAX).floor() as u32
    }

    /// Stepping speed on a `0..=scale` gauge, rounded down. Full when stepping every 20ms.
    pub fn speed_fill(&self, scale: u32) -> u32 {
        let ms = self.interval_ms().clamp(INTERVAL_MIN_MS, INTERVAL_MAX_MS);
        (INTERVAL_MAX_MS - ms) * scale / (INTERVAL_MAX_MS - INTERVAL_MIN_MS)
    }
}

/// Consumer of control loop status. Sinks never fail the loop; they log and carry on.
pub trait ReportSink {
    /// Shown once before the loop starts.
    fn ready(&mut self);
    fn snapshot(&mut self, snapshot: &ReportSnapshot);
    fn sensor_error(&mut self, error: &SensorError);
}

impl<A: ReportSink, B: ReportSink> ReportSink for (A, B) {
    fn ready(&mut self) {
        self.0.ready();
        self.1.ready();
    }

    fn snapshot(&mut self, snapshot: &ReportSnapshot) {
        self.0.snapshot(snapshot);
        self.1.snapshot(snapshot);
    }

    fn sensor_error(&mut self, error: &SensorError) {
        self.0.sensor_error(error);
        self.1.sensor_error(error);
    }
}
