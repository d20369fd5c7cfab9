//! One-degree-at-a-time servo driver.
//!
//! The servo is open loop: we only ever command positions and assume the horn gets
//! there within one step interval. The driver keeps track of where it last commanded
//! the servo and walks that position toward the target, one degree per call.

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::mapper::POSITION_MAX;

/// Something that can hold a servo at an angle.
pub trait ServoOutput {
    /// Command the servo to `degrees` (`0..=180`). Fire and forget, there is no feedback.
    fn set_position(&mut self, degrees: u8) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub current_position: u8,
    pub target_position: u8,
    pub step_interval: Duration,
}

/// Outcome of [`StepDriver::advance_one_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Already at the target, nothing was commanded.
    Holding,
    /// Moved one degree to the contained position.
    Moved(u8),
}

pub struct StepDriver<O, D> {
    output: O,
    delay: D,
    state: ActuatorState,
}

impl<O: ServoOutput, D: DelayNs> StepDriver<O, D> {
    pub fn new(output: O, delay: D, neutral: u8, step_interval: Duration) -> Self {
        debug_assert!(neutral <= POSITION_MAX, "neutral position {neutral} out of range");
        Self {
            output,
            delay,
            state: ActuatorState {
                current_position: neutral,
                target_position: neutral,
                step_interval,
            },
        }
    }

    /// Park the servo at `position` right away, without stepping.
    ///
    /// Used once at startup so the bookkeeping matches the horn.
    pub fn home(&mut self, position: u8) -> anyhow::Result<()> {
        debug_assert!(position <= POSITION_MAX, "home position {position} out of range");
        self.state.current_position = position;
        self.state.target_position = position;
        self.output.set_position(position)
    }

    /// Record a new target. Does not move the servo.
    pub fn set_target(&mut self, position: u8) {
        debug_assert!(position <= POSITION_MAX, "target {position} out of range");
        self.state.target_position = position;
    }

    pub fn set_step_interval(&mut self, interval: Duration) {
        self.state.step_interval = interval;
    }

    /// Move one degree toward the target and wait out the step interval.
    ///
    /// Returns immediately, without commanding anything, once the target is reached.
    pub fn advance_one_step(&mut self) -> Step {
        let ActuatorState {
            current_position,
            target_position,
            step_interval,
        } = self.state;

        if current_position == target_position {
            return Step::Holding;
        }

        let next = if current_position < target_position {
            current_position + 1
        } else {
            current_position - 1
        };
        debug_assert!(next <= POSITION_MAX);
        self.state.current_position = next;

        if let Err(e) = self.output.set_position(next) {
            warn!("servo command to {next} deg failed: {e:?}");
        }

        // whole milliseconds, rounded down
        self.delay.delay_ms(step_interval.as_millis() as u32);
        Step::Moved(next)
    }

    pub fn state(&self) -> ActuatorState {
        self.state
    }

    #[cfg(test)]
    fn is_settled(&self) -> bool {
        self.state.current_position == self.state.target_position
    }

    #[cfg(test)]
    fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
