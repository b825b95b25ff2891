//! Interrupt-safe handle to the machine state.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::StepResolution;
use crate::error::Result;
use crate::motion::{AxisPositions, CoordinateMode, MoveRequest};

use super::state::{ArmOutcome, MachineState};

/// [`MachineState`] behind a critical-section mutex.
///
/// Every access masks interrupts for its whole duration, so the step
/// interrupt never sees a half-written job and the command loop never reads
/// positions mid-tick. `new` is `const`, so this can live in a `static`
/// shared with the timer interrupt:
///
/// ```rust,ignore
/// static MACHINE: SharedMachine = SharedMachine::new(StepResolution::DEFAULT);
/// ```
pub struct SharedMachine {
    inner: Mutex<RefCell<MachineState>>,
}

impl SharedMachine {
    /// Idle machine at the origin, in absolute mode.
    pub const fn new(resolution: StepResolution) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(MachineState::new(resolution))),
        }
    }

    /// Run `f` on the state with interrupts masked.
    ///
    /// `f` must not call back into this `SharedMachine`.
    pub fn with<R>(&self, f: impl FnOnce(&mut MachineState) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Build and install a job in one critical section.
    ///
    /// # Errors
    ///
    /// See [`MachineState::arm`].
    pub fn arm(&self, request: &MoveRequest) -> Result<ArmOutcome> {
        self.with(|state| state.arm(request))
    }

    /// Change the coordinate mode.
    pub fn set_mode(&self, mode: CoordinateMode) {
        self.with(|state| state.set_mode(mode));
    }

    /// Coordinate mode used for the next move.
    pub fn mode(&self) -> CoordinateMode {
        self.with(|state| state.mode())
    }

    /// Snapshot of the live positions.
    pub fn positions(&self) -> AxisPositions {
        self.with(|state| *state.positions())
    }

    /// Whether a job still owes ticks.
    pub fn is_busy(&self) -> bool {
        self.with(|state| state.is_busy())
    }

    /// Ticks left on the current job.
    pub fn remaining_steps(&self) -> u32 {
        self.with(|state| state.job().remaining_steps())
    }

    /// Consume one completion signaled by the step interrupt.
    pub fn take_completion(&self) -> bool {
        self.with(|state| state.take_completion())
    }
}

impl Default for SharedMachine {
    fn default() -> Self {
        Self::new(StepResolution::DEFAULT)
    }
}
