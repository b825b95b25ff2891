//! Bresenham line descriptor for one four-axis move.

use crate::config::StepResolution;
use crate::error::{MotionError, Result};

use super::axis::{Axis, AxisMask, AXIS_COUNT};
use super::builder::Displacement;

/// Four-dimensional Bresenham line being stepped by the tick handler.
///
/// Each tick the dominant axis (largest `delta`) pulses and every other axis
/// pulses whenever its error accumulator crosses half of `longest_delta`.
/// Over `longest_delta` ticks axis `i` pulses exactly `delta[i]` times.
///
/// A job with `remaining_steps == 0` is idle; ticks on it do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MotionJob {
    delta: [u32; AXIS_COUNT],
    longest_delta: u32,
    // Signed: correction pulls it below zero. After each correction
    // -longest_delta <= 2 * epsilon < longest_delta.
    epsilon: [i64; AXIS_COUNT],
    remaining_steps: u32,
    direction: AxisMask,
}

impl MotionJob {
    /// The idle job.
    pub const IDLE: Self = Self {
        delta: [0; AXIS_COUNT],
        longest_delta: 0,
        epsilon: [0; AXIS_COUNT],
        remaining_steps: 0,
        direction: AxisMask::EMPTY,
    };

    /// Build a job from signed displacements.
    ///
    /// Step counts truncate toward zero. The direction bit of an axis is set
    /// only if its displacement is strictly positive, even when it rounds to
    /// zero steps.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::StepCountOverflow` if a displacement needs more
    /// steps than fit in a `u32`.
    pub fn from_displacement(displacement: &Displacement, resolution: &StepResolution) -> Result<Self> {
        let mut delta = [0; AXIS_COUNT];
        let mut direction = AxisMask::EMPTY;

        for axis in Axis::ALL {
            let mm = displacement.get(axis);
            delta[axis.index()] = resolution.for_axis(axis).steps_in(mm).ok_or(
                MotionError::StepCountOverflow {
                    axis,
                    displacement: mm.0,
                },
            )?;
            if displacement.is_forward(axis) {
                direction.insert(axis);
            }
        }

        Ok(Self::from_steps(delta, direction))
    }

    /// Build a job from raw step counts and direction bits.
    pub fn from_steps(delta: [u32; AXIS_COUNT], direction: AxisMask) -> Self {
        let longest_delta = delta.iter().copied().max().unwrap_or(0);
        Self {
            delta,
            longest_delta,
            epsilon: [0; AXIS_COUNT],
            remaining_steps: longest_delta,
            direction,
        }
    }

    /// Steps axis `axis` takes over the whole job.
    #[inline]
    pub fn delta(&self, axis: Axis) -> u32 {
        self.delta[axis.index()]
    }

    /// Step counts in X, Y, A, Z order.
    #[inline]
    pub fn deltas(&self) -> [u32; AXIS_COUNT] {
        self.delta
    }

    /// Step count of the dominant axis; also the job length in ticks.
    #[inline]
    pub fn longest_delta(&self) -> u32 {
        self.longest_delta
    }

    /// Ticks left before completion.
    #[inline]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining_steps
    }

    /// Current error accumulator of `axis`.
    #[inline]
    pub fn epsilon(&self, axis: Axis) -> i64 {
        self.epsilon[axis.index()]
    }

    /// Direction bits; set means forward.
    #[inline]
    pub fn direction_mask(&self) -> AxisMask {
        self.direction
    }

    /// Whether `axis` moves forward.
    #[inline]
    pub fn is_forward(&self, axis: Axis) -> bool {
        self.direction.contains(axis)
    }

    /// Whether ticks are still owed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_steps != 0
    }

    /// Whether the job moves no axis at all.
    #[inline]
    pub fn is_zero_length(&self) -> bool {
        self.longest_delta == 0
    }

    /// Run this tick's error correction and return the axes to pulse.
    ///
    /// Returns an empty mask without touching the accumulators if the job is
    /// idle. Afterwards `-longest_delta <= 2 * epsilon[i] < longest_delta`
    /// for every axis.
    pub fn correct(&mut self) -> AxisMask {
        let mut pulse = AxisMask::EMPTY;
        if !self.is_active() {
            return pulse;
        }

        let longest = i64::from(self.longest_delta);
        for axis in Axis::ALL {
            let i = axis.index();
            self.epsilon[i] += i64::from(self.delta[i]);
            if 2 * self.epsilon[i] >= longest {
                self.epsilon[i] -= longest;
                pulse.insert(axis);
            }
        }
        pulse
    }

    /// Account for one finished tick.
    ///
    /// Returns `true` exactly once, on the tick that completes the job.
    pub fn finish_tick(&mut self) -> bool {
        if self.remaining_steps == 0 {
            return false;
        }
        self.remaining_steps -= 1;
        self.remaining_steps == 0
    }
}
