//! Timer-interrupt step generator.
//!
//! Generic over embedded-hal 1.0 pin and delay types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::DriverTiming;
use crate::error::{AxisError, Result};
use crate::motion::{Axis, AxisMask, AXIS_COUNT};

use super::shared::SharedMachine;
use super::state::MachineState;

/// STEP/DIR pin pair of one axis.
pub struct AxisPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (one rising edge per step).
    pub step: STEP,
    /// DIR pin (level per [`DriverTiming::forward_level`]).
    pub dir: DIR,
}

impl<STEP, DIR> AxisPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Pair up a STEP and a DIR pin.
    pub fn new(step: STEP, dir: DIR) -> Self {
        Self { step, dir }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No job was active; no pin was touched.
    Idle,
    /// The job advanced and is still running.
    Stepped(AxisMask),
    /// The job advanced and finished on this tick.
    Completed(AxisMask),
}

impl Tick {
    /// Axes pulsed on this tick.
    pub fn pulsed(self) -> AxisMask {
        match self {
            Tick::Idle => AxisMask::EMPTY,
            Tick::Stepped(mask) | Tick::Completed(mask) => mask,
        }
    }

    /// Whether the job finished on this tick.
    pub fn is_completed(self) -> bool {
        matches!(self, Tick::Completed(_))
    }
}

/// Drives the four axes one Bresenham tick at a time.
///
/// Call [`on_interrupt`](Self::on_interrupt) from the periodic timer
/// interrupt. Each active tick:
///
/// 1. writes every DIR pin from the job's direction bits,
/// 2. waits the direction setup time,
/// 3. raises STEP on each axis the line algorithm picks and moves its
///    position one step,
/// 4. waits the pulse width,
/// 5. lowers every STEP pin,
/// 6. counts the tick down and signals completion through the machine state.
///
/// Nothing here blocks beyond the two fixed driver holds.
pub struct StepGenerator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    axes: [AxisPins<STEP, DIR>; AXIS_COUNT],
    delay: DELAY,
    timing: DriverTiming,
}

impl<STEP, DIR, DELAY> StepGenerator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create a generator from pins in X, Y, A, Z order.
    pub fn new(axes: [AxisPins<STEP, DIR>; AXIS_COUNT], delay: DELAY, timing: DriverTiming) -> Self {
        Self {
            axes,
            delay,
            timing,
        }
    }

    /// Driver timing in use.
    #[inline]
    pub fn timing(&self) -> &DriverTiming {
        &self.timing
    }

    /// Tear down into pins and delay.
    pub fn release(self) -> ([AxisPins<STEP, DIR>; AXIS_COUNT], DELAY) {
        (self.axes, self.delay)
    }

    /// Timer interrupt entry point.
    pub fn on_interrupt(&mut self, machine: &SharedMachine) -> Result<Tick> {
        machine.with(|state| self.tick(state))
    }

    /// Advance the active job by one tick.
    ///
    /// # Errors
    ///
    /// Returns `AxisError::PinError` for the first pin write that fails.
    ///
    /// A failed DIR write abandons the tick before the line algorithm runs
    /// and before any STEP pin is touched, so the next tick retries it
    /// unchanged. A failed STEP write still completes the tick: axes raised
    /// before the failure keep their position update, the failed axis and
    /// any after it lose this tick's step, every STEP pin is lowered, and
    /// the tick is counted down (signaling completion if it was the last).
    pub fn tick(&mut self, state: &mut MachineState) -> Result<Tick> {
        if !state.job.is_active() {
            return Ok(Tick::Idle);
        }

        // DIR is rewritten every tick so it is settled before any STEP edge.
        let direction = state.job.direction_mask();
        for axis in Axis::ALL {
            let level = self.timing.dir_level(direction.contains(axis));
            self.axes[axis.index()]
                .dir
                .set_state(level.into())
                .map_err(|_| AxisError::PinError(axis))?;
        }
        self.delay.delay_ns(self.timing.direction_setup_ns);

        let mut fault = None;
        let mut pulsed = AxisMask::EMPTY;
        for axis in state.job.correct().iter() {
            if self.axes[axis.index()].step.set_high().is_err() {
                fault = Some(axis);
                break;
            }
            pulsed.insert(axis);
            let resolution = state.resolution.for_axis(axis);
            state.positions.step(axis, direction.contains(axis), resolution);
        }
        self.delay.delay_ns(self.timing.pulse_width_ns);

        for axis in Axis::ALL {
            if self.axes[axis.index()].step.set_low().is_err() {
                fault.get_or_insert(axis);
            }
        }

        let completed = state.job.finish_tick();
        if completed {
            state.completions = state.completions.wrapping_add(1);
        }

        match fault {
            Some(axis) => Err(AxisError::PinError(axis).into()),
            None if completed => Ok(Tick::Completed(pulsed)),
            None => Ok(Tick::Stepped(pulsed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Millimeters, MmPerStep};
    use crate::config::{PinLevel, StepResolution};
    use crate::error::Error;
    use crate::motion::{MotionJob, MoveRequest};
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    const NO_TRANSACTIONS: &[Transaction] = &[];

    /// Pins for one tick: DIR written once, STEP pulsed or just lowered.
    fn tick_pins(dir: State, stepped: bool) -> AxisPins<PinMock, PinMock> {
        let step = if stepped {
            vec![Transaction::set(State::High), Transaction::set(State::Low)]
        } else {
            vec![Transaction::set(State::Low)]
        };
        AxisPins::new(PinMock::new(&step), PinMock::new(&[Transaction::set(dir)]))
    }

    fn verify(generator: StepGenerator<PinMock, PinMock, NoopDelay>) {
        let (pins, _) = generator.release();
        for mut axis in pins {
            axis.step.done();
            axis.dir.done();
        }
    }

    #[test]
    fn test_idle_tick_touches_nothing() {
        let pins = core::array::from_fn(|_| {
            AxisPins::new(PinMock::new(NO_TRANSACTIONS), PinMock::new(NO_TRANSACTIONS))
        });
        let mut generator = StepGenerator::new(pins, NoopDelay::new(), DriverTiming::DEFAULT);
        let mut state = MachineState::default();

        assert_eq!(generator.tick(&mut state).unwrap(), Tick::Idle);
        assert_eq!(state.positions().as_mm(), [0.0; AXIS_COUNT]);
        assert_eq!(state.pending_completions(), 0);

        verify(generator);
    }

    #[test]
    fn test_single_tick_pin_sequence() {
        // X forward, Z backward, Y and A idle with their direction bits clear.
        // Forward is LOW with the default driver timing.
        let pins = [
            tick_pins(State::Low, true),
            tick_pins(State::High, false),
            tick_pins(State::High, false),
            tick_pins(State::High, true),
        ];

        let mut generator = StepGenerator::new(pins, NoopDelay::new(), DriverTiming::DEFAULT);
        let mut state = MachineState::new(StepResolution::DEFAULT);
        state.job = MotionJob::from_steps([1, 0, 0, 1], Axis::X.mask());

        let tick = generator.tick(&mut state).unwrap();
        assert_eq!(tick, Tick::Completed([Axis::X, Axis::Z].into_iter().collect()));
        assert_eq!(state.pending_completions(), 1);
        assert!((state.positions().get(Axis::X).0 - 0.0015625).abs() < 1e-7);
        assert!((state.positions().get(Axis::Z).0 + 0.0015625).abs() < 1e-7);
        assert_eq!(state.positions().get(Axis::Y), Millimeters::ZERO);

        verify(generator);
    }

    #[test]
    fn test_forward_level_high() {
        let pins = [
            tick_pins(State::High, true),
            tick_pins(State::Low, false),
            tick_pins(State::Low, false),
            tick_pins(State::Low, false),
        ];
        let timing = DriverTiming {
            forward_level: PinLevel::High,
            ..DriverTiming::DEFAULT
        };

        let mut generator = StepGenerator::new(pins, NoopDelay::new(), timing);
        let mut state = MachineState::default();
        state
            .arm(&MoveRequest::new().with(Axis::X, Millimeters(0.0015625)))
            .unwrap();

        assert!(generator.tick(&mut state).unwrap().is_completed());

        verify(generator);
    }

    #[test]
    fn test_stepped_tick_keeps_job_running() {
        // Two-tick job: first tick pulses X only and must not signal completion.
        let pins = [
            tick_pins(State::High, true),
            tick_pins(State::High, false),
            tick_pins(State::High, false),
            tick_pins(State::High, false),
        ];

        let mut generator = StepGenerator::new(pins, NoopDelay::new(), DriverTiming::DEFAULT);
        let mut state = MachineState::default();
        state.job = MotionJob::from_steps([2, 0, 0, 0], AxisMask::EMPTY);

        assert_eq!(generator.tick(&mut state).unwrap(), Tick::Stepped(Axis::X.mask()));
        assert_eq!(state.job().remaining_steps(), 1);
        assert_eq!(state.pending_completions(), 0);

        verify(generator);
    }

    /// Pin that counts edges and can be told to fail its next write.
    #[derive(Debug, Default)]
    struct FlakyPin {
        high: bool,
        rising_edges: u32,
        fail_next: bool,
    }

    impl FlakyPin {
        fn failing() -> Self {
            Self {
                fail_next: true,
                ..Self::default()
            }
        }

        fn write(&mut self, high: bool) -> core::result::Result<(), ErrorKind> {
            if core::mem::take(&mut self.fail_next) {
                return Err(ErrorKind::Other);
            }
            if high && !self.high {
                self.rising_edges += 1;
            }
            self.high = high;
            Ok(())
        }
    }

    impl ErrorType for FlakyPin {
        type Error = ErrorKind;
    }

    impl OutputPin for FlakyPin {
        fn set_low(&mut self) -> core::result::Result<(), ErrorKind> {
            self.write(false)
        }

        fn set_high(&mut self) -> core::result::Result<(), ErrorKind> {
            self.write(true)
        }
    }

    fn flaky_generator(
        step: [FlakyPin; AXIS_COUNT],
        dir: [FlakyPin; AXIS_COUNT],
    ) -> StepGenerator<FlakyPin, FlakyPin, NoopDelay> {
        let mut dir = dir.into_iter();
        let pins = step.map(|step| AxisPins::new(step, dir.next().unwrap_or_default()));
        StepGenerator::new(pins, NoopDelay::new(), DriverTiming::DEFAULT)
    }

    fn unit_state(delta: [u32; AXIS_COUNT]) -> MachineState {
        let mut state = MachineState::new(StepResolution::uniform(MmPerStep::new(1.0)));
        state.job = MotionJob::from_steps(delta, AxisMask::ALL);
        state
    }

    #[test]
    fn test_step_pin_failure_keeps_positions_in_sync() {
        let step = [
            FlakyPin::default(),
            FlakyPin::failing(),
            FlakyPin::default(),
            FlakyPin::default(),
        ];
        let mut generator = flaky_generator(step, Default::default());
        let mut state = unit_state([10, 10, 0, 0]);

        assert_eq!(
            generator.tick(&mut state),
            Err(Error::Axis(AxisError::PinError(Axis::Y)))
        );
        // X was raised before Y failed: it keeps its step, and is lowered again
        assert_eq!(state.positions().as_mm(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(state.job().remaining_steps(), 9);

        let mut ticks = 0;
        while state.is_busy() {
            generator.tick(&mut state).unwrap();
            ticks += 1;
        }
        assert_eq!(ticks, 9);
        assert_eq!(state.pending_completions(), 1);

        let (pins, _) = generator.release();
        assert!(pins.iter().all(|axis| !axis.step.high));
        assert_eq!(pins[Axis::X.index()].step.rising_edges, 10);
        assert_eq!(pins[Axis::Y.index()].step.rising_edges, 9);
        assert_eq!(state.positions().as_mm(), [10.0, 9.0, 0.0, 0.0]);
    }

    #[test]
    fn test_failed_last_tick_still_signals_completion() {
        let step = [
            FlakyPin::failing(),
            FlakyPin::default(),
            FlakyPin::default(),
            FlakyPin::default(),
        ];
        let mut generator = flaky_generator(step, Default::default());
        let mut state = unit_state([1, 0, 0, 0]);

        assert!(generator.tick(&mut state).is_err());
        assert!(!state.is_busy());
        assert_eq!(state.pending_completions(), 1);
        assert_eq!(generator.tick(&mut state), Ok(Tick::Idle));
    }

    #[test]
    fn test_dir_pin_failure_leaves_job_untouched() {
        let dir = [
            FlakyPin::default(),
            FlakyPin::default(),
            FlakyPin::default(),
            FlakyPin::failing(),
        ];
        let mut generator = flaky_generator(Default::default(), dir);
        let mut state = unit_state([4, 2, 0, 3]);
        let before = state.job().clone();

        assert_eq!(
            generator.tick(&mut state),
            Err(Error::Axis(AxisError::PinError(Axis::Z)))
        );
        assert_eq!(state.job(), &before);
        assert_eq!(state.positions().as_mm(), [0.0; AXIS_COUNT]);

        while state.is_busy() {
            generator.tick(&mut state).unwrap();
        }
        let (pins, _) = generator.release();
        let edges: Vec<u32> = pins.iter().map(|axis| axis.step.rising_edges).collect();
        assert_eq!(edges, [4, 2, 0, 3]);
        assert_eq!(state.positions().as_mm(), [4.0, 2.0, 0.0, 3.0]);
    }
}
