//! Iterative constraint relaxation.
//!
//! Each pass visits every free vertex in index order and moves it by the
//! average of the corrections requested by all of its constraints. The
//! update is applied in place, so later vertices in the same pass already
//! see earlier vertices' new positions (Gauss–Seidel ordering).
//!
//! Each correction is divided by the configured iteration count, spreading
//! one step's worth of correction across all passes of that step.

use folio_mesh::{ConnectionGraph, NeighborClass};
use folio_types::constants::MIN_EDGE_LENGTH;
use glam::Vec3;

use crate::config::SheetConfig;
use crate::state::SimulationState;

/// Stiffness and stretch parameters of the relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxParams {
    pub structural_stiffness: f32,
    pub shear_stiffness: f32,
    pub bending_stiffness: f32,
    /// Stretch ceiling of structural edges, as a multiple of rest length.
    pub max_stretch: f32,
}

impl RelaxParams {
    pub fn from_config(config: &SheetConfig) -> Self {
        Self {
            structural_stiffness: config.structural_stiffness,
            shear_stiffness: config.shear_stiffness,
            bending_stiffness: config.bending_stiffness,
            max_stretch: config.max_stretch,
        }
    }

    #[inline]
    fn stiffness(&self, class: NeighborClass) -> f32 {
        match class {
            NeighborClass::Structural => self.structural_stiffness,
            NeighborClass::Shear => self.shear_stiffness,
            NeighborClass::Bending => self.bending_stiffness,
        }
    }
}

/// What a relaxation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassReport {
    /// Free vertices that received a correction.
    pub corrected_vertices: usize,
    /// Length of the largest single-vertex correction.
    pub max_correction: f32,
}

/// Runs one relaxation pass over all free vertices.
///
/// `iteration_count` is the number of passes the caller makes this step;
/// it must be nonzero.
pub fn relax(
    state: &mut SimulationState,
    connections: &ConnectionGraph,
    pinned: &[bool],
    params: &RelaxParams,
    iteration_count: u32,
) -> PassReport {
    debug_assert!(iteration_count > 0, "iteration_count must be at least 1");
    let divisor = iteration_count as f32;
    let mut report = PassReport::default();

    for (vertex, conns) in connections.iter() {
        let i = vertex.index();
        if pinned[i] {
            continue;
        }

        let p = state.position(i);
        let mut correction = Vec3::ZERO;
        let mut count = 0u32;

        for class in NeighborClass::ALL {
            let stiffness = params.stiffness(class);
            for neighbor in conns.class(class) {
                let delta = state.position(neighbor.vertex.index()) - p;
                let length = delta.length();
                if length <= MIN_EDGE_LENGTH {
                    continue;
                }

                let rest = neighbor.rest_length;
                let mut error = (length - rest) / length;
                if class == NeighborClass::Structural {
                    let ceiling = rest * params.max_stretch;
                    if length > ceiling {
                        error = (length - ceiling) / length;
                    }
                }

                correction += delta * error * stiffness * 0.5;
                count += 1;
            }
        }

        if count > 0 {
            let step = correction / count as f32 / divisor;
            state.set_position(i, p + step);
            report.corrected_vertices += 1;
            report.max_correction = report.max_correction.max(step.length());
        }
    }

    report
}

/// Runs `passes` relaxation passes, each divided by `iteration_count`.
///
/// Returns a report whose `max_correction` is the largest over all passes
/// and whose `corrected_vertices` is that of the last pass. Zero passes
/// leave the state untouched.
pub fn relax_passes(
    state: &mut SimulationState,
    connections: &ConnectionGraph,
    pinned: &[bool],
    params: &RelaxParams,
    passes: u32,
    iteration_count: u32,
) -> PassReport {
    let mut summary = PassReport::default();
    for _ in 0..passes {
        let report = relax(state, connections, pinned, params, iteration_count);
        summary.corrected_vertices = report.corrected_vertices;
        summary.max_correction = summary.max_correction.max(report.max_correction);
    }
    summary
}
