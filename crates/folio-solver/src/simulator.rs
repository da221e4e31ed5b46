//! Step orchestrator: owns one simulated sheet.
//!
//! Built once from a mesh, a config, and a pin binding. The connection
//! graph and rest pose are fixed at construction; positions and velocities
//! are rewritten in place by every [`SheetSimulator::step`]. The host only
//! sees positions after a step has fully completed.

use folio_mesh::{ConnectionGraph, TriangleMesh};
use folio_types::{FolioError, FolioResult};
use glam::{Affine3A, Vec3};

use crate::config::{SheetConfig, SolverKind};
use crate::observer::{ObserverSet, StepObserver};
use crate::pbd::PositionBasedSolver;
use crate::pins::{create_default_targets, PinBinding, PinTarget};
use crate::spring::MassSpringSolver;
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepContext, StepResult};

/// A simulated sheet driven one fixed step at a time.
pub struct SheetSimulator {
    config: SheetConfig,
    connections: ConnectionGraph,
    pins: PinBinding,
    state: SimulationState,
    strategy: Box<dyn SolverStrategy>,
    observers: ObserverSet,
    local_from_world: Affine3A,
    timestep: u32,
    sim_time: f64,
}

impl SheetSimulator {
    /// Builds a simulator for `mesh` with an explicit pin binding.
    ///
    /// Validates the config, indexes the mesh topology, and starts the
    /// sheet at its rest pose with zero velocity. Pin targets are taken to
    /// be in the simulator's local space until [`set_transform`] says
    /// otherwise.
    ///
    /// [`set_transform`]: SheetSimulator::set_transform
    pub fn new(mesh: &TriangleMesh, config: SheetConfig, pins: PinBinding) -> FolioResult<Self> {
        mesh.validate()?;
        Self::from_rest(&mesh.indices, &mesh.positions_vec3(), config, pins)
    }

    /// Builds a simulator from a raw triangle list and rest positions.
    pub fn from_rest(
        indices: &[u32],
        rest: &[Vec3],
        config: SheetConfig,
        pins: PinBinding,
    ) -> FolioResult<Self> {
        config.validate()?;

        if pins.vertex_count() != rest.len() {
            return Err(FolioError::InvalidConfig(format!(
                "Pin binding covers {} vertices, mesh has {}",
                pins.vertex_count(),
                rest.len()
            )));
        }

        let connections = ConnectionGraph::build(indices, rest)?;
        let state = SimulationState::from_rest(rest);

        let mut strategy: Box<dyn SolverStrategy> = match config.solver {
            SolverKind::PositionBased => Box::new(PositionBasedSolver::new()),
            SolverKind::MassSpring => Box::new(MassSpringSolver::new()),
        };
        strategy.init(&connections, &config)?;

        tracing::info!(
            vertices = rest.len(),
            structural_edges = connections.structural_edge_count(),
            shear = connections.shear_count(),
            bending = connections.bending_count(),
            pins = pins.len(),
            solver = strategy.name(),
            "sheet simulator ready"
        );

        Ok(Self {
            config,
            connections,
            pins,
            state,
            strategy,
            observers: ObserverSet::new(),
            local_from_world: Affine3A::IDENTITY,
            timestep: 0,
            sim_time: 0.0,
        })
    }

    /// Builds a simulator pinned at its four corners and center, and
    /// creates the owned targets that drive those pins.
    ///
    /// `world_from_local` places the sheet in host space; targets are
    /// returned in that space, sitting exactly on the pinned rest vertices.
    pub fn with_default_pins(
        mesh: &TriangleMesh,
        config: SheetConfig,
        world_from_local: Affine3A,
    ) -> FolioResult<(Self, Vec<PinTarget>)> {
        config.validate()?;
        mesh.validate()?;
        let rest = mesh.positions_vec3();

        let pins = PinBinding::default_for(&rest, &config)?;
        let targets = create_default_targets(&rest, &pins, &world_from_local);

        let mut simulator = Self::from_rest(&mesh.indices, &rest, config, pins)?;
        simulator.local_from_world = world_from_local.inverse();
        Ok((simulator, targets))
    }

    /// Replaces the step algorithm. The new strategy is initialized against
    /// this simulator's topology and config.
    pub fn set_strategy(&mut self, mut strategy: Box<dyn SolverStrategy>) -> FolioResult<()> {
        strategy.init(&self.connections, &self.config)?;
        self.strategy = strategy;
        Ok(())
    }

    /// Sets the transform from target (world) space into local space.
    pub fn set_transform(&mut self, local_from_world: Affine3A) {
        self.local_from_world = local_from_world;
    }

    /// Registers an observer called during every step.
    pub fn add_observer(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    /// Removes and returns all registered observers.
    pub fn take_observers(&mut self) -> Vec<Box<dyn StepObserver>> {
        self.observers.take()
    }

    /// Advances the sheet by one fixed timestep.
    ///
    /// `targets` must hold one target per pin, in binding order.
    pub fn step(&mut self, dt: f32, targets: &[PinTarget]) -> FolioResult<StepResult> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FolioError::InvalidInput(format!(
                "Timestep must be positive and finite, got {dt}"
            )));
        }
        if targets.len() != self.pins.len() {
            return Err(FolioError::InvalidInput(format!(
                "Expected {} pin targets, got {}",
                self.pins.len(),
                targets.len()
            )));
        }

        let timestep = self.timestep;
        self.observers.on_step_begin(timestep, self.sim_time);

        let ctx = StepContext {
            connections: &self.connections,
            pins: &self.pins,
            targets,
            local_from_world: &self.local_from_world,
            timestep,
            dt,
        };
        let result = self.strategy.step(&ctx, &mut self.state, &mut self.observers)?;

        self.timestep += 1;
        self.sim_time += dt as f64;
        self.observers.on_step_end(timestep, &result);

        tracing::debug!(
            timestep,
            passes = result.iterations,
            max_correction = result.max_correction,
            max_pin_speed = result.max_pin_speed,
            "step complete"
        );
        Ok(result)
    }

    /// Current vertex positions: the surface geometry to hand to the host.
    pub fn positions(&self) -> Vec<Vec3> {
        self.state.positions()
    }

    /// Copies current positions into a host mesh.
    pub fn write_positions(&self, mesh: &mut TriangleMesh) -> FolioResult<()> {
        self.state.write_positions(mesh)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    pub fn pins(&self) -> &PinBinding {
        &self.pins
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Name of the active step algorithm.
    pub fn solver_name(&self) -> &str {
        self.strategy.name()
    }

    /// Number of completed steps.
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// Simulated time elapsed (seconds).
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}
