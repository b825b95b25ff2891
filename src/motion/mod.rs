//! Motion module for foam-cutter.
//!
//! Axis identities, the Bresenham job descriptor, and the builder that turns
//! move targets into jobs.

mod axis;
mod builder;
mod job;
mod position;

pub use axis::{Axis, AxisClass, AxisMask, AXIS_COUNT};
pub use builder::{CoordinateMode, Displacement, MoveRequest};
pub use job::MotionJob;
pub use position::AxisPositions;
