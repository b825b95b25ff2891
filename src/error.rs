//! Error types for foam-cutter.
//!
//! Provides unified error handling across configuration, job arming, pin I/O
//! and command dispatch.

use core::fmt;

use crate::motion::Axis;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all foam-cutter operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion job construction or arming error
    Motion(MotionError),
    /// Axis output error
    Axis(AxisError),
    /// Command line error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Step resolution must be finite and > 0
    InvalidResolution(f32),
    /// Driver hold times do not fit inside the tick period
    InvalidTiming {
        /// Direction setup plus pulse width, in nanoseconds
        hold_ns: u32,
        /// Timer period, in nanoseconds
        period_ns: u32,
    },
    /// Baud rate must be > 0
    InvalidBaudRate(u32),
    /// Acknowledgment token must not be empty
    EmptyAckToken,
    /// No STEP/DIR pins were given for an axis
    MissingAxisPins(Axis),
    /// No delay provider was given
    MissingDelay,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motion job errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A job is still running; it must complete before another is armed
    JobInProgress {
        /// Ticks left on the running job
        remaining_steps: u32,
    },
    /// Requested displacement does not fit in a step counter
    StepCountOverflow {
        /// Axis whose displacement overflowed
        axis: Axis,
        /// Requested displacement in millimeters
        displacement: f32,
    },
}

/// Axis output errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisError {
    /// Direction or step pin write failed
    PinError(Axis),
}

/// Command line errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Line contained nothing but whitespace
    Empty,
    /// Command word is not G0, G90 or G91
    Unsupported(heapless::String<16>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidResolution(v) => {
                write!(f, "Invalid step resolution: {} mm/step. Must be > 0", v)
            }
            ConfigError::InvalidTiming { hold_ns, period_ns } => write!(
                f,
                "Driver hold time {} ns does not fit in tick period {} ns",
                hold_ns, period_ns
            ),
            ConfigError::InvalidBaudRate(v) => write!(f, "Invalid baud rate: {}", v),
            ConfigError::EmptyAckToken => write!(f, "Acknowledgment token is empty"),
            ConfigError::MissingAxisPins(axis) => write!(f, "No pins given for axis {}", axis),
            ConfigError::MissingDelay => write!(f, "No delay provider given"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::JobInProgress { remaining_steps } => {
                write!(f, "Job in progress ({} steps remaining)", remaining_steps)
            }
            MotionError::StepCountOverflow { axis, displacement } => write!(
                f,
                "Displacement {} mm on axis {} overflows the step counter",
                displacement,
                axis.letter()
            ),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::PinError(axis) => write!(f, "GPIO write failed on axis {}", axis.letter()),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Empty command line"),
            CommandError::Unsupported(word) => write!(f, "Unsupported command '{}'", word),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
