//! Step observers for live inspection.
//!
//! Observers are called at defined points of every step and can capture
//! metrics or forward them to telemetry without touching the solver.
//!
//! # Lifecycle
//!
//! ```text
//! for each step:
//!   observer.on_step_begin(...)
//!   for each relaxation pass:
//!     observer.on_pass(...)
//!   observer.on_pins_resolved(...)
//!   observer.on_step_end(...)
//! ```

use crate::pins::PinReport;
use crate::relax::PassReport;
use crate::strategy::StepResult;

/// Trait for step inspection hooks. Every method defaults to a no-op.
pub trait StepObserver: Send {
    /// Called before any state is modified.
    fn on_step_begin(&mut self, timestep: u32, sim_time: f64) {
        let _ = (timestep, sim_time);
    }

    /// Called after each relaxation pass.
    fn on_pass(&mut self, timestep: u32, pass: u32, report: &PassReport) {
        let _ = (timestep, pass, report);
    }

    /// Called after pinned vertices were moved onto their targets.
    fn on_pins_resolved(&mut self, timestep: u32, report: &PinReport) {
        let _ = (timestep, report);
    }

    /// Called once the step is complete and positions are published.
    fn on_step_end(&mut self, timestep: u32, result: &StepResult) {
        let _ = (timestep, result);
    }

    /// Returns the observer's name for logging.
    fn name(&self) -> &str;
}

/// Fans every callback out to a list of observers.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn StepObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Removes and returns all observers.
    pub fn take(&mut self) -> Vec<Box<dyn StepObserver>> {
        std::mem::take(&mut self.observers)
    }
}

impl StepObserver for ObserverSet {
    fn on_step_begin(&mut self, timestep: u32, sim_time: f64) {
        for o in &mut self.observers {
            o.on_step_begin(timestep, sim_time);
        }
    }

    fn on_pass(&mut self, timestep: u32, pass: u32, report: &PassReport) {
        for o in &mut self.observers {
            o.on_pass(timestep, pass, report);
        }
    }

    fn on_pins_resolved(&mut self, timestep: u32, report: &PinReport) {
        for o in &mut self.observers {
            o.on_pins_resolved(timestep, report);
        }
    }

    fn on_step_end(&mut self, timestep: u32, result: &StepResult) {
        for o in &mut self.observers {
            o.on_step_end(timestep, result);
        }
    }

    fn name(&self) -> &str {
        "observer_set"
    }
}
