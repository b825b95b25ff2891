//! Stepper driver and step timer settings.

use embedded_hal::digital::PinState;
use serde::Deserialize;

/// Logic level on a DIR pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinLevel {
    /// Driven low.
    #[default]
    Low,
    /// Driven high.
    High,
}

impl PinLevel {
    /// The opposite level.
    #[inline]
    pub const fn inverted(self) -> Self {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

impl From<PinLevel> for PinState {
    fn from(level: PinLevel) -> Self {
        match level {
            PinLevel::Low => PinState::Low,
            PinLevel::High => PinState::High,
        }
    }
}

/// Hold times required by the stepper driver around a step edge.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DriverTiming {
    /// DIR level meaning "forward"; "backward" is its complement.
    #[serde(default)]
    pub forward_level: PinLevel,

    /// Delay between writing DIR and raising STEP.
    #[serde(default = "default_hold_ns")]
    pub direction_setup_ns: u32,

    /// Time STEP is held high.
    #[serde(default = "default_hold_ns")]
    pub pulse_width_ns: u32,
}

fn default_hold_ns() -> u32 {
    1_000
}

impl DriverTiming {
    /// A4988-compatible defaults: forward is low, 1 µs setup and pulse.
    pub const DEFAULT: Self = Self {
        forward_level: PinLevel::Low,
        direction_setup_ns: 1_000,
        pulse_width_ns: 1_000,
    };

    /// DIR level for a direction bit.
    #[inline]
    pub const fn dir_level(&self, forward: bool) -> PinLevel {
        if forward {
            self.forward_level
        } else {
            self.forward_level.inverted()
        }
    }

    /// Total busy-wait per active tick.
    #[inline]
    pub const fn hold_ns(&self) -> u32 {
        self.direction_setup_ns.saturating_add(self.pulse_width_ns)
    }
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Periodic step timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimerConfig {
    /// Interval between step-generator invocations.
    pub tick_period_us: u32,
}

impl TimerConfig {
    /// 500 µs ticks (2 kHz step rate on the dominant axis).
    pub const DEFAULT: Self = Self { tick_period_us: 500 };

    /// Tick period in nanoseconds.
    #[inline]
    pub const fn tick_period_ns(&self) -> u32 {
        self.tick_period_us.saturating_mul(1_000)
    }

    /// Dominant-axis step rate in steps per second.
    #[inline]
    pub fn step_rate_hz(&self) -> f32 {
        1_000_000.0 / self.tick_period_us as f32
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
