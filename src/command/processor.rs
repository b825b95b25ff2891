//! Command-context dispatcher.
//!
//! Applies decoded commands to the shared machine and decides when the
//! acknowledgment token goes out. The transport is the caller's: feed it
//! complete lines, write a token for every [`Ack`] returned, and call
//! [`CommandProcessor::poll`] from the main loop to pick up move completions
//! signaled by the step interrupt.

use core::fmt;

use crate::config::{ProtocolConfig, ZeroLengthMove};
use crate::error::{Error, MotionError, Result};
use crate::machine::{ArmOutcome, SharedMachine};
use crate::motion::{CoordinateMode, MoveRequest};

use super::parser::Command;

/// One acknowledgment owed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack;

/// Dispatches commands against a [`SharedMachine`].
pub struct CommandProcessor<'m> {
    machine: &'m SharedMachine,
    protocol: ProtocolConfig,
}

impl<'m> CommandProcessor<'m> {
    /// Create a processor for `machine`.
    pub fn new(machine: &'m SharedMachine, protocol: ProtocolConfig) -> Self {
        Self { machine, protocol }
    }

    /// The machine being driven.
    #[inline]
    pub fn machine(&self) -> &'m SharedMachine {
        self.machine
    }

    /// Token written for each [`Ack`].
    #[inline]
    pub fn ack_token(&self) -> &str {
        self.protocol.ack.as_str()
    }

    /// Write the acknowledgment token to `out`.
    pub fn respond<W: fmt::Write>(&self, out: &mut W, _ack: Ack) -> fmt::Result {
        out.write_str(self.ack_token())
    }

    /// Parse and execute one line.
    ///
    /// # Errors
    ///
    /// Parse errors from [`Command::parse`] and arming errors from
    /// [`execute`](Self::execute). None of them produce a reply.
    pub fn handle_line(&self, line: &str) -> Result<Option<Ack>> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    /// Execute one command.
    ///
    /// Mode changes are acknowledged at once. A move is acknowledged later by
    /// [`poll`](Self::poll), once the step interrupt finishes it; a move
    /// shorter than one step on every axis follows the configured
    /// [`ZeroLengthMove`] policy.
    ///
    /// # Errors
    ///
    /// `MotionError::JobInProgress` if the previous move has not finished,
    /// `MotionError::StepCountOverflow` for an oversized move.
    pub fn execute(&self, command: Command) -> Result<Option<Ack>> {
        match command {
            Command::Absolute => Ok(Some(self.set_mode(CoordinateMode::Absolute))),
            Command::Relative => Ok(Some(self.set_mode(CoordinateMode::Relative))),
            Command::Move(request) => self.start_move(&request),
        }
    }

    /// Take one move completion signaled by the step interrupt.
    pub fn poll(&self) -> Option<Ack> {
        if self.machine.take_completion() {
            debug!("move complete");
            Some(Ack)
        } else {
            None
        }
    }

    fn set_mode(&self, mode: CoordinateMode) -> Ack {
        self.machine.set_mode(mode);
        info!("coordinate mode: {}", mode.name());
        Ack
    }

    fn start_move(&self, request: &MoveRequest) -> Result<Option<Ack>> {
        match self.machine.arm(request) {
            Ok(ArmOutcome::Started { ticks }) => {
                debug!("move armed: {} ticks", ticks);
                Ok(None)
            }
            Ok(ArmOutcome::ZeroLength) => {
                trace!("zero-length move");
                match self.protocol.zero_length_move {
                    ZeroLengthMove::Acknowledge => Ok(Some(Ack)),
                    ZeroLengthMove::Silent => Ok(None),
                }
            }
            Err(e) => {
                match &e {
                    Error::Motion(MotionError::JobInProgress { remaining_steps }) => {
                        warn!("move rejected: job in progress, {} steps left", *remaining_steps);
                    }
                    Error::Motion(MotionError::StepCountOverflow { axis, .. }) => {
                        warn!("move rejected: axis {} out of range", axis.letter());
                    }
                    _ => {}
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::motion::Axis;

    #[test]
    fn test_mode_commands_ack_immediately() {
        let machine = SharedMachine::default();
        let processor = CommandProcessor::new(&machine, ProtocolConfig::default());

        assert_eq!(processor.handle_line("G91"), Ok(Some(Ack)));
        assert_eq!(machine.mode(), CoordinateMode::Relative);
        assert_eq!(processor.handle_line("G90"), Ok(Some(Ack)));
        assert_eq!(machine.mode(), CoordinateMode::Absolute);
    }

    #[test]
    fn test_move_acks_only_on_completion() {
        let machine = SharedMachine::default();
        let processor = CommandProcessor::new(&machine, ProtocolConfig::default());

        assert_eq!(processor.handle_line("G0 X1"), Ok(None));
        assert!(machine.is_busy());
        assert_eq!(processor.poll(), None);

        // Stand in for the interrupt finishing the job
        machine.with(|state| {
            state.job = crate::motion::MotionJob::IDLE;
            state.completions += 1;
        });
        assert_eq!(processor.poll(), Some(Ack));
        assert_eq!(processor.poll(), None);
    }

    #[test]
    fn test_move_while_busy() {
        let machine = SharedMachine::default();
        let processor = CommandProcessor::new(&machine, ProtocolConfig::default());

        processor.handle_line("G0 Y1").unwrap();
        assert_eq!(
            processor.handle_line("G0 Y2"),
            Err(Error::Motion(MotionError::JobInProgress {
                remaining_steps: 640
            }))
        );
    }

    #[test]
    fn test_zero_length_policy() {
        let machine = SharedMachine::default();
        let ack = CommandProcessor::new(&machine, ProtocolConfig::default());
        assert_eq!(ack.handle_line("G0 X0 Z0.001"), Ok(Some(Ack)));
        assert!(!machine.is_busy());

        let silent = CommandProcessor::new(
            &machine,
            ProtocolConfig {
                zero_length_move: ZeroLengthMove::Silent,
                ..ProtocolConfig::default()
            },
        );
        assert_eq!(silent.handle_line("G0"), Ok(None));
        assert_eq!(silent.poll(), None);
    }

    #[test]
    fn test_unsupported_has_no_reply() {
        let machine = SharedMachine::default();
        let processor = CommandProcessor::new(&machine, ProtocolConfig::default());

        assert!(matches!(
            processor.handle_line("M5"),
            Err(Error::Command(CommandError::Unsupported(_)))
        ));
        assert!(!machine.is_busy());
    }

    #[test]
    fn test_respond_writes_token() {
        let machine = SharedMachine::default();
        let processor = CommandProcessor::new(&machine, ProtocolConfig::default());

        let mut out: heapless::String<8> = heapless::String::new();
        processor.respond(&mut out, Ack).unwrap();
        assert_eq!(out.as_str(), "ok");
    }

    #[test]
    fn test_jog_sets_relative_mode() {
        let machine = SharedMachine::default();
        let processor = CommandProcessor::new(&machine, ProtocolConfig::default());

        let [mode, step] = Command::jog(Axis::Z, crate::config::Millimeters(-0.5));
        assert_eq!(processor.execute(mode), Ok(Some(Ack)));
        assert_eq!(processor.execute(step), Ok(None));
        assert_eq!(machine.mode(), CoordinateMode::Relative);
        assert_eq!(machine.remaining_steps(), 320);
    }
}
