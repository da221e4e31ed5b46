//! State snapshot serialization for replay and debugging.
//!
//! Snapshots capture the full mutable simulation state at a point in time.
//! Rest positions and topology are not included; they are rebuilt from the
//! mesh the run started from.

use folio_solver::SimulationState;
use folio_types::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};

/// A complete simulation state snapshot, serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Timestep index when this snapshot was taken.
    pub timestep: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Vertex positions (flat: [x0, y0, z0, x1, y1, z1, ...]).
    pub positions: Vec<f32>,
    /// Vertex velocities (flat: [vx0, vy0, vz0, ...]).
    pub velocities: Vec<f32>,
    /// Number of vertices.
    pub vertex_count: usize,
}

impl StateSnapshot {
    /// Captures a simulation state.
    pub fn from_state(timestep: u32, sim_time: f64, state: &SimulationState) -> Self {
        Self {
            timestep,
            sim_time,
            positions: state.positions_interleaved(),
            velocities: state.velocities_interleaved(),
            vertex_count: state.vertex_count,
        }
    }

    /// Writes positions and velocities back into a state of the same size.
    pub fn restore(&self, state: &mut SimulationState) -> FolioResult<()> {
        self.check()?;
        if state.vertex_count != self.vertex_count {
            return Err(FolioError::InvalidInput(format!(
                "Snapshot has {} vertices, state has {}",
                self.vertex_count, state.vertex_count
            )));
        }
        for i in 0..self.vertex_count {
            let p = &self.positions[i * 3..i * 3 + 3];
            let v = &self.velocities[i * 3..i * 3 + 3];
            state.set_position(i, [p[0], p[1], p[2]].into());
            state.set_velocity(i, [v[0], v[1], v[2]].into());
        }
        Ok(())
    }

    /// Min and max Y over all positions, or `None` for an empty snapshot.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        self.positions
            .iter()
            .skip(1)
            .step_by(3)
            .fold(None, |range, &y| match range {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> FolioResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| FolioError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format and checks buffer sizes.
    pub fn from_bytes(data: &[u8]) -> FolioResult<Self> {
        let snapshot: Self = bincode::deserialize(data).map_err(|e| {
            FolioError::Serialization(format!("Snapshot deserialization failed: {e}"))
        })?;
        snapshot.check()?;
        Ok(snapshot)
    }

    fn check(&self) -> FolioResult<()> {
        let expected = self.vertex_count * 3;
        if self.positions.len() != expected || self.velocities.len() != expected {
            return Err(FolioError::Serialization(format!(
                "Snapshot of {} vertices carries {} position and {} velocity values",
                self.vertex_count,
                self.positions.len(),
                self.velocities.len()
            )));
        }
        Ok(())
    }
}
