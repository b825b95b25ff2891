//! # foam-cutter
//!
//! Firmware core for a 4-axis hot-wire foam cutter: G-code lines in,
//! synchronized stepper pulses out.
//!
//! ## Features
//!
//! - **4-axis Bresenham stepping**: integer line interpolation run one tick per
//!   timer interrupt, exact pulse counts on every axis
//! - **embedded-hal 1.0**: Uses `OutputPin` for STEP/DIR, `DelayNs` for driver holds
//! - **Interrupt-safe state**: machine state behind a `critical-section` mutex
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: resolutions, driver timing and protocol from TOML
//!
//! ## Wiring it up
//!
//! ```rust,ignore
//! use foam_cutter::{Axis, CommandProcessor, SharedMachine, StepGenerator, StepResolution};
//!
//! static MACHINE: SharedMachine = SharedMachine::new(StepResolution::DEFAULT);
//!
//! // Timer compare interrupt
//! fn on_timer(generator: &mut StepGenerator<Step, Dir, Delay>) {
//!     let _ = generator.on_interrupt(&MACHINE);
//! }
//!
//! // Main loop
//! let processor = CommandProcessor::new(&MACHINE, config.protocol.clone());
//! loop {
//!     if let Some(line) = serial.read_line() {
//!         if let Ok(Some(ack)) = processor.handle_line(line) {
//!             processor.respond(&mut serial, ack)?;
//!         }
//!     }
//!     if let Some(ack) = processor.poll() {
//!         processor.respond(&mut serial, ack)?;
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing, and the host
//!   critical-section implementation
//! - `defmt`: Routes logging to defmt instead of the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Must come first: logging macros are textually scoped
mod fmt;

// Core modules
pub mod command;
pub mod config;
pub mod error;
pub mod machine;
pub mod motion;

// Re-exports for ergonomic API
pub use command::{parameter_value, Ack, Command, CommandProcessor};
pub use config::{validate_config, MachineConfig, StepResolution};
pub use error::{Error, Result};
pub use machine::{ArmOutcome, MachineState, SharedMachine, StepGenerator, StepGeneratorBuilder, Tick};
pub use motion::{Axis, AxisMask, AxisPositions, CoordinateMode, MotionJob, MoveRequest};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Millimeters, MmPerStep};
