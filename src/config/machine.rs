//! Machine configuration - root configuration structure.

use serde::Deserialize;

use super::driver::{DriverTiming, TimerConfig};
use super::protocol::ProtocolConfig;
use super::resolution::StepResolution;

/// Root configuration structure from TOML.
///
/// Every table is optional; omitted tables take the stock foam-cutter values.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MachineConfig {
    /// Step resolution per axis class.
    #[serde(default)]
    pub resolution: StepResolution,

    /// Stepper driver hold times and DIR polarity.
    #[serde(default)]
    pub driver: DriverTiming,

    /// Step timer.
    #[serde(default)]
    pub timer: TimerConfig,

    /// Serial protocol.
    #[serde(default)]
    pub protocol: ProtocolConfig,
}
