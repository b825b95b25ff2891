//! Unit types for physical quantities.
//!
//! Type-safe representations of lengths and step resolutions so millimeter
//! values never get mixed up with step counts.

use core::ops::Sub;

use libm::{fabsf, truncf};
use serde::Deserialize;

/// Linear distance or position in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Zero distance.
    pub const ZERO: Self = Self(0.0);
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Carriage travel per motor step, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct MmPerStep(pub f32);

impl MmPerStep {
    /// Create a new MmPerStep value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Whether this is usable as a divisor (finite and strictly positive).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Whole steps covered by `distance`, sign ignored, truncated toward zero.
    ///
    /// Returns `None` if the result does not fit in a `u32`.
    pub fn steps_in(self, distance: Millimeters) -> Option<u32> {
        let steps = truncf(fabsf(distance.0) / self.0);
        if steps.is_finite() && steps < u32::MAX as f32 {
            Some(steps as u32)
        } else {
            None
        }
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Millimeters.
    fn mm(self) -> Millimeters;
    /// Convert to MmPerStep.
    fn mm_per_step(self) -> MmPerStep;
}

impl UnitExt for f32 {
    #[inline]
    fn mm(self) -> Millimeters {
        Millimeters(self)
    }

    #[inline]
    fn mm_per_step(self) -> MmPerStep {
        MmPerStep(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_truncate_toward_zero() {
        let res = MmPerStep::new(0.5);
        assert_eq!(res.steps_in(Millimeters(1.9)), Some(3));
        assert_eq!(res.steps_in(Millimeters(-1.9)), Some(3));
        assert_eq!(res.steps_in(Millimeters(0.49)), Some(0));
    }

    #[test]
    fn test_foam_cutter_resolution() {
        let res = 0.0015625_f32.mm_per_step();
        assert_eq!(res.steps_in(5.75_f32.mm()), Some(3680));
        assert_eq!(res.steps_in((-2.875_f32).mm()), Some(1840));
    }

    #[test]
    fn test_steps_overflow() {
        let res = MmPerStep::new(0.0015625);
        assert_eq!(res.steps_in(Millimeters(1.0e9)), None);
        assert_eq!(res.steps_in(Millimeters(f32::INFINITY)), None);
    }

    #[test]
    fn test_resolution_validity() {
        assert!(MmPerStep::new(0.01).is_valid());
        assert!(!MmPerStep::new(0.0).is_valid());
        assert!(!MmPerStep::new(-0.01).is_valid());
        assert!(!MmPerStep::new(f32::NAN).is_valid());
    }
}
