//! Step resolution per axis class.

use serde::Deserialize;

use crate::motion::{Axis, AxisClass};

use super::units::MmPerStep;

/// Carriage travel per step for the horizontal (X, A) and vertical (Y, Z)
/// axis pairs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StepResolution {
    /// Travel per step of X and A.
    #[serde(rename = "horizontal_mm_per_step")]
    pub horizontal: MmPerStep,

    /// Travel per step of Y and Z.
    #[serde(rename = "vertical_mm_per_step")]
    pub vertical: MmPerStep,
}

impl StepResolution {
    /// Both classes at 0.0015625 mm/step (1/640 mm).
    pub const DEFAULT: Self = Self::uniform(MmPerStep::new(0.0015625));

    /// Create a resolution pair.
    pub const fn new(horizontal: MmPerStep, vertical: MmPerStep) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same resolution for every axis.
    pub const fn uniform(mm_per_step: MmPerStep) -> Self {
        Self::new(mm_per_step, mm_per_step)
    }

    /// Resolution of a class.
    #[inline]
    pub const fn for_class(&self, class: AxisClass) -> MmPerStep {
        match class {
            AxisClass::Horizontal => self.horizontal,
            AxisClass::Vertical => self.vertical,
        }
    }

    /// Resolution of an axis.
    #[inline]
    pub const fn for_axis(&self, axis: Axis) -> MmPerStep {
        self.for_class(axis.class())
    }
}

impl Default for StepResolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}
