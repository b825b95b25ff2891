//! Live carriage positions.

use crate::config::units::{Millimeters, MmPerStep};

use super::axis::{Axis, AXIS_COUNT};

/// Position of every axis in millimeters from power-on.
///
/// Moved exclusively one step at a time by the step generator; read by the
/// move builder to resolve absolute targets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisPositions {
    mm: [f32; AXIS_COUNT],
}

impl AxisPositions {
    /// All axes at zero.
    pub const ORIGIN: Self = Self {
        mm: [0.0; AXIS_COUNT],
    };

    /// Positions from raw millimeter values in X, Y, A, Z order.
    #[inline]
    pub const fn from_mm(mm: [f32; AXIS_COUNT]) -> Self {
        Self { mm }
    }

    /// Position of one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> Millimeters {
        Millimeters(self.mm[axis.index()])
    }

    /// Overwrite the position of one axis.
    #[inline]
    pub fn set(&mut self, axis: Axis, position: Millimeters) {
        self.mm[axis.index()] = position.0;
    }

    /// Move one axis by one step of `resolution`.
    #[inline]
    pub fn step(&mut self, axis: Axis, forward: bool, resolution: MmPerStep) {
        let slot = &mut self.mm[axis.index()];
        if forward {
            *slot += resolution.0;
        } else {
            *slot -= resolution.0;
        }
    }

    /// Raw millimeter values in X, Y, A, Z order.
    #[inline]
    pub fn as_mm(&self) -> [f32; AXIS_COUNT] {
        self.mm
    }
}
