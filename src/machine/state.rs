//! Machine state shared by the command loop and the step interrupt.

use crate::config::StepResolution;
use crate::error::{MotionError, Result};
use crate::motion::{AxisPositions, CoordinateMode, Displacement, MotionJob, MoveRequest};

/// What arming a move produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOutcome {
    /// A job was installed and will run for `ticks` timer periods.
    Started {
        /// Job length in ticks.
        ticks: u32,
    },
    /// Every axis moves less than one step; nothing will run.
    ZeroLength,
}

/// Everything the step generator and the command loop share.
///
/// Holds the active job, the live positions, the coordinate mode and the
/// completion counter. The tick handler is the only writer of the job and the
/// positions while a job is active; the command loop only installs a job when
/// the previous one has finished.
#[derive(Debug, Clone)]
pub struct MachineState {
    pub(crate) job: MotionJob,
    pub(crate) positions: AxisPositions,
    mode: CoordinateMode,
    pub(crate) resolution: StepResolution,
    pub(crate) completions: u32,
}

impl MachineState {
    /// Idle machine at the origin, in absolute mode.
    pub const fn new(resolution: StepResolution) -> Self {
        Self {
            job: MotionJob::IDLE,
            positions: AxisPositions::ORIGIN,
            mode: CoordinateMode::Absolute,
            resolution,
            completions: 0,
        }
    }

    /// The current (possibly finished) job.
    #[inline]
    pub fn job(&self) -> &MotionJob {
        &self.job
    }

    /// Live positions.
    #[inline]
    pub fn positions(&self) -> &AxisPositions {
        &self.positions
    }

    /// Coordinate mode used for the next move.
    #[inline]
    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    /// Change the coordinate mode.
    #[inline]
    pub fn set_mode(&mut self, mode: CoordinateMode) {
        self.mode = mode;
    }

    /// Step resolution in use.
    #[inline]
    pub fn resolution(&self) -> &StepResolution {
        &self.resolution
    }

    /// Whether a job still owes ticks.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.job.is_active()
    }

    /// Resolve `request` against the current mode and positions.
    pub fn displacement(&self, request: &MoveRequest) -> Displacement {
        request.displacement(self.mode, &self.positions)
    }

    /// Build a job for `request` and install it.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::JobInProgress` without touching any state if the
    /// previous job has not finished, or `MotionError::StepCountOverflow` if a
    /// displacement is too large.
    pub fn arm(&mut self, request: &MoveRequest) -> Result<ArmOutcome> {
        if self.job.is_active() {
            return Err(MotionError::JobInProgress {
                remaining_steps: self.job.remaining_steps(),
            }
            .into());
        }

        let job = MotionJob::from_displacement(&self.displacement(request), &self.resolution)?;
        let outcome = if job.is_zero_length() {
            ArmOutcome::ZeroLength
        } else {
            ArmOutcome::Started {
                ticks: job.longest_delta(),
            }
        };
        self.job = job;
        Ok(outcome)
    }

    /// Consume one pending completion, if any.
    pub fn take_completion(&mut self) -> bool {
        if self.completions == 0 {
            return false;
        }
        self.completions -= 1;
        true
    }

    /// Completions signaled by the tick handler and not yet taken.
    #[inline]
    pub fn pending_completions(&self) -> u32 {
        self.completions
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new(StepResolution::DEFAULT)
    }
}
