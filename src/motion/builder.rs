//! Motion job builder: move targets to signed per-axis displacements.
//!
//! Runs in command context. Nothing here touches pins or positions; the
//! resulting [`MotionJob`](super::MotionJob) is armed by
//! [`SharedMachine`](crate::machine::SharedMachine).

use crate::config::units::Millimeters;

use super::axis::{Axis, AXIS_COUNT};
use super::position::AxisPositions;

/// How move targets are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
    /// Targets are machine positions (`G90`).
    #[default]
    Absolute,
    /// Targets are offsets from the current position (`G91`).
    Relative,
}

impl CoordinateMode {
    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            CoordinateMode::Absolute => "absolute",
            CoordinateMode::Relative => "relative",
        }
    }
}

/// Requested targets of a linear move; `None` leaves the axis where it is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveRequest {
    targets: [Option<Millimeters>; AXIS_COUNT],
}

impl MoveRequest {
    /// A request naming no axis.
    pub const fn new() -> Self {
        Self {
            targets: [None; AXIS_COUNT],
        }
    }

    /// Set the target of `axis`.
    pub fn with(mut self, axis: Axis, value: Millimeters) -> Self {
        self.targets[axis.index()] = Some(value);
        self
    }

    /// Set or clear the target of `axis`.
    pub fn set(&mut self, axis: Axis, value: Option<Millimeters>) {
        self.targets[axis.index()] = value;
    }

    /// Target of `axis`, if given.
    #[inline]
    pub fn target(&self, axis: Axis) -> Option<Millimeters> {
        self.targets[axis.index()]
    }

    /// Whether no axis was named.
    pub fn is_empty(&self) -> bool {
        self.targets.iter().all(Option::is_none)
    }

    /// Resolve targets to signed displacements.
    ///
    /// Absolute mode subtracts the current position; relative mode uses the
    /// target as-is. Unnamed axes resolve to zero in both modes.
    pub fn displacement(&self, mode: CoordinateMode, positions: &AxisPositions) -> Displacement {
        let mut mm = [Millimeters::ZERO; AXIS_COUNT];
        for axis in Axis::ALL {
            if let Some(target) = self.target(axis) {
                mm[axis.index()] = match mode {
                    CoordinateMode::Absolute => target - positions.get(axis),
                    CoordinateMode::Relative => target,
                };
            }
        }
        Displacement(mm)
    }
}

/// Signed travel per axis for one job.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement(pub [Millimeters; AXIS_COUNT]);

impl Displacement {
    /// Displacement of one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> Millimeters {
        self.0[axis.index()]
    }

    /// Direction bit: set only for strictly positive travel.
    #[inline]
    pub fn is_forward(&self, axis: Axis) -> bool {
        self.get(axis).0 > 0.0
    }
}
