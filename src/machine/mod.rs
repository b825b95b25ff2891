//! Machine module for foam-cutter.
//!
//! Shared machine state, its critical-section wrapper, and the step generator
//! run from the timer interrupt.

mod builder;
mod shared;
mod state;
mod step_generator;

pub use builder::StepGeneratorBuilder;
pub use shared::SharedMachine;
pub use state::{ArmOutcome, MachineState};
pub use step_generator::{AxisPins, StepGenerator, Tick};
