//! Shared test rig: recording pins and a ready-made step generator.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use foam_cutter::config::DriverTiming;
use foam_cutter::machine::AxisPins;
use foam_cutter::{Axis, SharedMachine, StepGenerator, Tick};

/// What happened on one pin.
#[derive(Debug, Default)]
pub struct PinLog {
    pub high: bool,
    pub rising_edges: u32,
    pub writes: u32,
}

/// Output pin that records its history; clones share the log.
#[derive(Clone, Default)]
pub struct Probe(Rc<RefCell<PinLog>>);

impl Probe {
    pub fn is_high(&self) -> bool {
        self.0.borrow().high
    }

    pub fn rising_edges(&self) -> u32 {
        self.0.borrow().rising_edges
    }

    pub fn writes(&self) -> u32 {
        self.0.borrow().writes
    }
}

impl ErrorType for Probe {
    type Error = Infallible;
}

impl OutputPin for Probe {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut log = self.0.borrow_mut();
        log.high = false;
        log.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut log = self.0.borrow_mut();
        if !log.high {
            log.rising_edges += 1;
        }
        log.high = true;
        log.writes += 1;
        Ok(())
    }
}

/// Step generator on probe pins, plus handles to those pins.
pub struct Rig {
    pub generator: StepGenerator<Probe, Probe, NoopDelay>,
    pub step: [Probe; 4],
    pub dir: [Probe; 4],
}

impl Rig {
    pub fn new() -> Self {
        Self::with_timing(DriverTiming::DEFAULT)
    }

    pub fn with_timing(timing: DriverTiming) -> Self {
        let step: [Probe; 4] = Default::default();
        let dir: [Probe; 4] = Default::default();
        let pins = core::array::from_fn(|i| AxisPins::new(step[i].clone(), dir[i].clone()));
        Self {
            generator: StepGenerator::new(pins, NoopDelay::new(), timing),
            step,
            dir,
        }
    }

    pub fn tick(&mut self, machine: &SharedMachine) -> Tick {
        self.generator.on_interrupt(machine).unwrap()
    }

    /// Tick until the job completes; returns the number of ticks taken.
    pub fn run_to_completion(&mut self, machine: &SharedMachine) -> u32 {
        let mut ticks = 0;
        while machine.is_busy() {
            self.tick(machine);
            ticks += 1;
        }
        ticks
    }

    pub fn pulses(&self, axis: Axis) -> u32 {
        self.step[axis.index()].rising_edges()
    }

    pub fn pulse_counts(&self) -> [u32; 4] {
        core::array::from_fn(|i| self.step[i].rising_edges())
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {} mm, got {} mm",
        expected,
        actual
    );
}
