//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::MachineConfig;

/// Validate a machine configuration.
///
/// Checks:
/// - Both step resolutions are finite and positive
/// - Driver hold times fit inside one tick period
/// - Baud rate is non-zero
/// - Acknowledgment token is non-empty
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for res in [config.resolution.horizontal, config.resolution.vertical] {
        if !res.is_valid() {
            return Err(Error::Config(ConfigError::InvalidResolution(res.value())));
        }
    }

    // The tick handler busy-waits for both holds; it must return before the
    // next compare match or steps are lost.
    let hold_ns = config.driver.hold_ns();
    let period_ns = config.timer.tick_period_ns();
    if period_ns == 0 || hold_ns >= period_ns {
        return Err(Error::Config(ConfigError::InvalidTiming { hold_ns, period_ns }));
    }

    if config.protocol.baud_rate == 0 {
        return Err(Error::Config(ConfigError::InvalidBaudRate(0)));
    }

    if config.protocol.ack.is_empty() {
        return Err(Error::Config(ConfigError::EmptyAckToken));
    }

    Ok(())
}
