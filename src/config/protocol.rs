//! Command protocol settings.

use heapless::String;
use serde::Deserialize;

/// Reply policy for a `G0` whose effective displacement is under one step on
/// every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroLengthMove {
    /// Reply immediately; nothing is armed.
    #[default]
    Acknowledge,
    /// Send no reply at all.
    Silent,
}

/// Serial protocol configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProtocolConfig {
    /// Serial line rate.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Acknowledgment token written after each completed command.
    #[serde(default = "default_ack")]
    pub ack: String<8>,

    /// Reply policy for zero-length moves.
    #[serde(default)]
    pub zero_length_move: ZeroLengthMove,
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_ack() -> String<8> {
    let mut ack = String::new();
    let _ = ack.push_str("ok");
    ack
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            baud_rate: default_baud_rate(),
            ack: default_ack(),
            zero_length_move: ZeroLengthMove::default(),
        }
    }
}
