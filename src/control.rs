//! The light -> servo control loop.
//!
//! Sampling, reporting and moving run at three different rates: the sensor is read every
//! cycle, the sinks only hear about target changes, and the servo moves one degree per
//! cycle at whatever step interval the latest reading asks for. That keeps the glide
//! smooth while the target is re-evaluated far more often than it moves.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::actuator::{ServoOutput, Step, StepDriver};
use crate::config::ControlConfig;
use crate::mapper::{map_reading_to_interval, map_reading_to_position};
use crate::report::{ReportSink, ReportSnapshot};
use crate::sensor::LightSensor;

/// What one pass through the loop did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cycle {
    /// No reading this time. Nothing moved, the sinks were told.
    SensorFault,
    Ran {
        /// Set when the target changed, or on the first reading after start or a fault.
        snapshot: Option<ReportSnapshot>,
        step: Step,
    },
}

pub struct ControlLoop<S, O, D, R> {
    sensor: S,
    driver: StepDriver<O, D>,
    idle: D,
    sink: R,
    config: ControlConfig,
    /// Report the next reading even if its target is unchanged. Set for the first reading
    /// and again after a sensor fault, so the error screen does not outlive the fault.
    report_pending: bool,
}

impl<S, O, D, R> ControlLoop<S, O, D, R>
where
    S: LightSensor,
    O: ServoOutput,
    D: DelayNs,
    R: ReportSink,
{
    pub fn new(sensor: S, driver: StepDriver<O, D>, idle: D, sink: R, config: ControlConfig) -> Self {
        Self {
            sensor,
            driver,
            idle,
            sink,
            config,
            report_pending: true,
        }
    }

    /// Park the servo at the neutral angle and put up the ready notice.
    pub fn init(&mut self) {
        let neutral = self.config.neutral_position;
        if let Err(e) = self.driver.home(neutral) {
            warn!("could not park servo at {neutral} deg: {e:?}");
        }
        self.driver
            .set_step_interval(self.config.initial_step_interval());
        self.report_pending = true;

        self.sink.ready();
        self.idle.delay_ms(self.config.ready_notice_ms);
        info!("servo parked at {neutral} deg, control loop running");
    }

    /// One sample / decide / step / idle pass.
    pub fn cycle(&mut self) -> Cycle {
        let reading = match self.sensor.read_lux() {
            Ok(lux) => lux,
            Err(e) => {
                warn!("{e}");
                self.sink.sensor_error(&e);
                self.report_pending = true;
                self.idle.delay_ms(self.config.idle_wait_ms);
                return Cycle::SensorFault;
            }
        };

        let target = map_reading_to_position(reading);
        let interval = map_reading_to_interval(reading);
        self.driver.set_step_interval(interval);

        let mut snapshot = None;
        if target != self.driver.state().target_position || self.report_pending {
            debug!("{reading:.1} lx -> target {target} deg, {interval:?}/step");
            self.driver.set_target(target);
            let report = ReportSnapshot {
                reading,
                position: self.driver.state().current_position,
                step_interval: interval,
            };
            self.sink.snapshot(&report);
            self.report_pending = false;
            snapshot = Some(report);
        }

        let step = self.driver.advance_one_step();
        self.idle.delay_ms(self.config.idle_wait_ms);
        Cycle::Ran { snapshot, step }
    }

    /// Run until power off.
    pub fn run(mut self) -> ! {
        self.init();
        loop {
            self.cycle();
        }
    }

    #[cfg(test)]
    fn driver(&self) -> &StepDriver<O, D> {
        &self.driver
    }

    #[cfg(test)]
    fn sink(&self) -> &R {
        &self.sink
    }
}
