//! Solver strategy trait: the step algorithm behind the simulator.
//!
//! The orchestrator owns state, topology, and pins; a strategy only decides
//! how one step transforms the state.

use folio_mesh::ConnectionGraph;
use folio_types::FolioResult;
use glam::Affine3A;

use crate::config::SheetConfig;
use crate::observer::StepObserver;
use crate::pins::{PinBinding, PinTarget};
use crate::state::SimulationState;

/// Result of a solver step.
#[derive(Debug, Clone, Default)]
pub struct StepResult {
    /// Number of relaxation passes performed.
    pub iterations: u32,
    /// Largest single-vertex correction of the step.
    pub max_correction: f32,
    /// Largest implied pin speed of the step.
    pub max_pin_speed: f32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Everything a strategy reads but does not own during one step.
pub struct StepContext<'a> {
    pub connections: &'a ConnectionGraph,
    pub pins: &'a PinBinding,
    /// One target per pin, in world space.
    pub targets: &'a [PinTarget],
    /// Converts target positions into the simulator's local space.
    pub local_from_world: &'a Affine3A,
    /// Index of the step being computed.
    pub timestep: u32,
    pub dt: f32,
}

/// Trait for step algorithms.
///
/// ```text
/// strategy.init(connections, config)?;
/// loop {
///     strategy.step(&ctx, state, observer)?;
/// }
/// ```
///
/// # Implementations
///
/// - [`PositionBasedSolver`](crate::pbd::PositionBasedSolver): integrate, relax, pin
/// - [`MassSpringSolver`](crate::spring::MassSpringSolver): explicit structural springs
pub trait SolverStrategy: Send {
    /// Captures configuration and any rest-state data. Called once.
    fn init(&mut self, connections: &ConnectionGraph, config: &SheetConfig) -> FolioResult<()>;

    /// Advances the state by one timestep in place.
    fn step(
        &mut self,
        ctx: &StepContext<'_>,
        state: &mut SimulationState,
        observer: &mut dyn StepObserver,
    ) -> FolioResult<StepResult>;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}
