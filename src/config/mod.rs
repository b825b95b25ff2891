//! Configuration module for foam-cutter.
//!
//! Provides types for loading and validating machine configuration from TOML
//! files (with `std` feature) or building it in code.

mod driver;
mod machine;
mod protocol;
mod resolution;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use driver::{DriverTiming, PinLevel, TimerConfig};
pub use machine::MachineConfig;
pub use protocol::{ProtocolConfig, ZeroLengthMove};
pub use resolution::StepResolution;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, MmPerStep};
