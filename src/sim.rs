//! Stand-ins for the board so the control loop can run on a desktop.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::actuator::ServoOutput;
use crate::sensor::{LightSensor, SensorError};

/// Install the desktop log backend. `RUST_LOG` overrides the default `luxservo=info` filter.
///
/// `log` records from the crate are forwarded into the subscriber. Fails if a logger is
/// already installed.
#[cfg(not(target_os = "espidf"))]
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luxservo=info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

/// Blocking delay on top of `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}

/// Light level that ramps between darkness and `peak` lux and back.
///
/// Every `dropout_every`-th read fails, to exercise the fault path.
pub struct RampSensor {
    peak: f32,
    step: f32,
    level: f32,
    rising: bool,
    reads: u32,
    dropout_every: Option<u32>,
}

impl RampSensor {
    pub fn new(peak: f32, step: f32) -> Self {
        Self {
            peak,
            step,
            level: 0.0,
            rising: true,
            reads: 0,
            dropout_every: None,
        }
    }

    pub fn with_dropouts(mut self, every: u32) -> Self {
        self.dropout_every = Some(every.max(1));
        self
    }
}

impl LightSensor for RampSensor {
    fn read_lux(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        if let Some(every) = self.dropout_every {
            if self.reads % every == 0 {
                return Err(SensorError::Bus("simulated dropout".into()));
            }
        }

        let lux = self.level;
        if self.rising {
            self.level = (self.level + self.step).min(self.peak);
            self.rising = self.level < self.peak;
        } else {
            self.level = (self.level - self.step).max(0.0);
            self.rising = self.level <= 0.0;
        }
        Ok(lux)
    }
}

/// Servo that only remembers and traces what it was told.
#[derive(Debug, Default)]
pub struct TraceServo {
    pub position: Option<u8>,
}

impl ServoOutput for TraceServo {
    fn set_position(&mut self, degrees: u8) -> anyhow::Result<()> {
        trace!("servo -> {degrees} deg");
        self.position = Some(degrees);
        Ok(())
    }
}
