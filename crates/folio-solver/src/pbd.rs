//! Position-based sheet solver.
//!
//! One step is always, in this order:
//! 1. **Integrate**: gravity and damping on free vertices
//! 2. **Relax**: `solver_iterations` constraint passes over free vertices
//! 3. **Pin**: pinned vertices snap to their targets with implied velocity
//!
//! Pins go last so neither integration nor relaxation can displace them.
//! Relaxation moves positions only; velocities change solely through
//! integration and pinning.

use std::time::Instant;

use folio_mesh::ConnectionGraph;
use folio_types::{FolioError, FolioResult};
use glam::Vec3;

use crate::config::SheetConfig;
use crate::integrator::integrate;
use crate::observer::StepObserver;
use crate::pins;
use crate::relax::{relax, RelaxParams};
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepContext, StepResult};

/// Gauss–Seidel position-based solver with stretch limiting.
pub struct PositionBasedSolver {
    params: RelaxParams,
    gravity: Vec3,
    damping: f32,
    iterations: u32,
    initialized: bool,
}

impl PositionBasedSolver {
    /// Creates a new solver (uninitialized).
    pub fn new() -> Self {
        let config = SheetConfig::default();
        Self {
            params: RelaxParams::from_config(&config),
            gravity: Vec3::from(config.gravity),
            damping: config.damping,
            iterations: config.solver_iterations,
            initialized: false,
        }
    }
}

impl Default for PositionBasedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStrategy for PositionBasedSolver {
    fn init(&mut self, _connections: &ConnectionGraph, config: &SheetConfig) -> FolioResult<()> {
        self.params = RelaxParams::from_config(config);
        self.gravity = Vec3::from(config.gravity);
        self.damping = config.damping;
        self.iterations = config.solver_iterations;
        self.initialized = true;
        Ok(())
    }

    fn step(
        &mut self,
        ctx: &StepContext<'_>,
        state: &mut SimulationState,
        observer: &mut dyn StepObserver,
    ) -> FolioResult<StepResult> {
        if !self.initialized {
            return Err(FolioError::InvalidConfig(
                "Solver not initialized. Call init() first.".into(),
            ));
        }

        let start = Instant::now();
        let pinned = ctx.pins.mask();

        integrate(state, pinned, self.gravity, self.damping, ctx.dt);

        let mut max_correction = 0.0f32;
        for pass in 0..self.iterations {
            let report = relax(state, ctx.connections, pinned, &self.params, self.iterations);
            max_correction = max_correction.max(report.max_correction);
            observer.on_pass(ctx.timestep, pass, &report);
        }

        let pin_report = pins::resolve(ctx.pins, ctx.targets, ctx.local_from_world, state, ctx.dt)?;
        observer.on_pins_resolved(ctx.timestep, &pin_report);

        Ok(StepResult {
            iterations: self.iterations,
            max_correction,
            max_pin_speed: pin_report.max_speed,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "position_based"
    }
}
