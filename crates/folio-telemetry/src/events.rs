//! Simulation event types.
//!
//! Structured events emitted at fixed points of every step. Events are
//! plain values carrying just enough data for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event, tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Timestep number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulated time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Step completed and positions were published.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
        /// Largest single-vertex correction of the step.
        max_correction: f32,
    },

    /// One constraint relaxation pass completed.
    RelaxationPass {
        /// Pass number within the step.
        pass: u32,
        /// Free vertices that received a correction.
        corrected_vertices: usize,
        /// Largest correction applied in this pass.
        max_correction: f32,
    },

    /// Pinned vertices were moved onto their targets.
    PinsResolved {
        /// Number of pins.
        count: usize,
        /// Largest implied pin speed (units/s).
        max_speed: f32,
    },

    /// Energy snapshot after the step.
    Energy {
        /// Kinetic energy with unit vertex mass.
        kinetic: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }

    /// Short name of the event kind, used as a log label.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::RelaxationPass { .. } => "relaxation_pass",
            EventKind::PinsResolved { .. } => "pins_resolved",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { label, .. } => label,
        }
    }
}
