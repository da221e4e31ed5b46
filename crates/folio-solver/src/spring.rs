//! Explicit mass-spring sheet.
//!
//! The simpler of the two step algorithms: pins are applied first and held
//! at zero velocity, then each free vertex is pushed by Hooke springs along
//! its structural edges and integrated explicitly. Shear and bending braces
//! are ignored. Vertices are updated in index order and see neighbors that
//! already moved this step.

use std::time::Instant;

use folio_mesh::ConnectionGraph;
use folio_types::constants::MIN_SPRING_LENGTH;
use folio_types::{FolioError, FolioResult};
use glam::Vec3;

use crate::config::{SheetConfig, SpringConfig};
use crate::observer::StepObserver;
use crate::pins::PinReport;
use crate::state::SimulationState;
use crate::strategy::{SolverStrategy, StepContext, StepResult};

/// Explicit structural-spring solver.
pub struct MassSpringSolver {
    spring: SpringConfig,
    gravity: Vec3,
    initialized: bool,
}

impl MassSpringSolver {
    /// Creates a new solver (uninitialized).
    pub fn new() -> Self {
        Self {
            spring: SpringConfig::default(),
            gravity: Vec3::ZERO,
            initialized: false,
        }
    }

    /// Spring force on vertex `i` from its structural neighbors.
    fn spring_force(
        &self,
        state: &SimulationState,
        connections: &ConnectionGraph,
        i: usize,
    ) -> Vec3 {
        let p = state.position(i);
        let mut force = Vec3::ZERO;
        for neighbor in &connections.get(i.into()).structural {
            let delta = state.position(neighbor.vertex.index()) - p;
            let length = delta.length();
            if length > MIN_SPRING_LENGTH {
                force += delta / length * (length - neighbor.rest_length) * self.spring.stiffness;
            }
        }
        force
    }
}

impl Default for MassSpringSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStrategy for MassSpringSolver {
    fn init(&mut self, _connections: &ConnectionGraph, config: &SheetConfig) -> FolioResult<()> {
        config.spring.validate()?;
        self.spring = config.spring.clone();
        self.gravity = Vec3::from(config.gravity);
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
        if ctx.targets.len() != ctx.pins.len() {
            return Err(FolioError::InvalidInput(format!(
                "Expected {} pin targets, got {}",
                ctx.pins.len(),
                ctx.targets.len()
            )));
        }

        let start = Instant::now();

        for (v, target) in ctx.pins.vertices().iter().zip(ctx.targets) {
            let i = v.index();
            state.set_position(i, ctx.local_from_world.transform_point3(target.position));
            state.set_velocity(i, Vec3::ZERO);
        }
        observer.on_pins_resolved(
            ctx.timestep,
            &PinReport {
                count: ctx.pins.len(),
                max_speed: 0.0,
            },
        );

        let pinned = ctx.pins.mask();
        let inv_mass = 1.0 / self.spring.mass;
        for i in 0..state.vertex_count {
            if pinned[i] {
                continue;
            }
            let acceleration =
                self.spring_force(state, ctx.connections, i) * inv_mass + self.gravity;
            let velocity = (state.velocity(i) + acceleration * ctx.dt) * self.spring.damping;
            state.set_velocity(i, velocity);
            state.set_position(i, state.position(i) + velocity * ctx.dt);
        }

        Ok(StepResult {
            iterations: 0,
            max_correction: 0.0,
            max_pin_speed: 0.0,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "mass_spring"
    }
}
