//! Builder pattern for StepGenerator.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{DriverTiming, MachineConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{Axis, AXIS_COUNT};

use super::step_generator::{AxisPins, StepGenerator};

/// Builder for creating StepGenerator instances.
pub struct StepGeneratorBuilder<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    axes: [Option<AxisPins<STEP, DIR>>; AXIS_COUNT],
    delay: Option<DELAY>,
    timing: DriverTiming,
}

impl<STEP, DIR, DELAY> Default for StepGeneratorBuilder<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, DELAY> StepGeneratorBuilder<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder with default driver timing.
    pub fn new() -> Self {
        Self {
            axes: [None, None, None, None],
            delay: None,
            timing: DriverTiming::DEFAULT,
        }
    }

    /// Set the STEP and DIR pins of one axis.
    pub fn axis(mut self, axis: Axis, step: STEP, dir: DIR) -> Self {
        self.axes[axis.index()] = Some(AxisPins::new(step, dir));
        self
    }

    /// Set the delay provider used for the driver holds.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set driver timing.
    pub fn timing(mut self, timing: DriverTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Take driver timing from a machine configuration.
    pub fn from_config(self, config: &MachineConfig) -> Self {
        self.timing(config.driver)
    }

    /// Build the StepGenerator.
    ///
    /// # Errors
    ///
    /// Returns an error if any axis has no pins or no delay was given.
    pub fn build(self) -> Result<StepGenerator<STEP, DIR, DELAY>> {
        let delay = self.delay.ok_or(Error::Config(ConfigError::MissingDelay))?;

        let [x, y, a, z] = self.axes;
        let require = |pins: Option<AxisPins<STEP, DIR>>, axis: Axis| {
            pins.ok_or(Error::Config(ConfigError::MissingAxisPins(axis)))
        };
        let axes = [
            require(x, Axis::X)?,
            require(y, Axis::Y)?,
            require(a, Axis::A)?,
            require(z, Axis::Z)?,
        ];

        Ok(StepGenerator::new(axes, delay, self.timing))
    }
}
