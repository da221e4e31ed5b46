//! Simulation state: SoA buffers for all per-vertex mutable data.
//!
//! Positions and velocities are the only data rewritten every step.
//! Rest positions live alongside them but are never modified.

use folio_mesh::TriangleMesh;
use folio_types::{FolioError, FolioResult};
use glam::Vec3;

/// SoA simulation state buffers.
///
/// All arrays have length `vertex_count`. Channels are stored contiguously:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Number of vertices.
    pub vertex_count: usize,

    // ─── Position (current) ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    // ─── Rest pose (immutable) ───
    rest: Vec<Vec3>,
}

impl SimulationState {
    /// Initialize state at the rest pose with zero velocity.
    pub fn from_rest(rest: &[Vec3]) -> Self {
        let n = rest.len();
        Self {
            vertex_count: n,
            pos_x: rest.iter().map(|p| p.x).collect(),
            pos_y: rest.iter().map(|p| p.y).collect(),
            pos_z: rest.iter().map(|p| p.z).collect(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
            rest: rest.to_vec(),
        }
    }

    /// Initialize state from a mesh's positions.
    pub fn from_mesh(mesh: &TriangleMesh) -> FolioResult<Self> {
        mesh.validate()?;
        Ok(Self::from_rest(&mesh.positions_vec3()))
    }

    /// Current position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Current velocity of vertex `i`.
    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.vel_x[i] = v.x;
        self.vel_y[i] = v.y;
        self.vel_z[i] = v.z;
    }

    /// Rest position of vertex `i`.
    #[inline]
    pub fn rest_position(&self, i: usize) -> Vec3 {
        self.rest[i]
    }

    /// The whole rest pose.
    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest
    }

    /// Collects current positions as `Vec3`s.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count).map(|i| self.position(i)).collect()
    }

    /// Current positions interleaved `[x0, y0, z0, x1, ...]`.
    pub fn positions_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count * 3);
        for i in 0..self.vertex_count {
            out.extend_from_slice(&[self.pos_x[i], self.pos_y[i], self.pos_z[i]]);
        }
        out
    }

    /// Velocities interleaved `[vx0, vy0, vz0, vx1, ...]`.
    pub fn velocities_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count * 3);
        for i in 0..self.vertex_count {
            out.extend_from_slice(&[self.vel_x[i], self.vel_y[i], self.vel_z[i]]);
        }
        out
    }

    /// Copies current positions into a host mesh with the same vertex count.
    pub fn write_positions(&self, mesh: &mut TriangleMesh) -> FolioResult<()> {
        if mesh.vertex_count() != self.vertex_count {
            return Err(FolioError::InvalidMesh(format!(
                "Target mesh has {} vertices, state has {}",
                mesh.vertex_count(),
                self.vertex_count
            )));
        }
        mesh.pos_x.copy_from_slice(&self.pos_x);
        mesh.pos_y.copy_from_slice(&self.pos_y);
        mesh.pos_z.copy_from_slice(&self.pos_z);
        Ok(())
    }

    /// Kinetic energy with unit mass per vertex: 0.5 * Σ ||v_i||².
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.vertex_count {
            let vx = self.vel_x[i] as f64;
            let vy = self.vel_y[i] as f64;
            let vz = self.vel_z[i] as f64;
            energy += 0.5 * (vx * vx + vy * vy + vz * vz);
        }
        energy
    }

    /// Largest distance of any vertex from its rest position.
    pub fn max_displacement(&self) -> f32 {
        (0..self.vertex_count)
            .map(|i| self.position(i).distance(self.rest[i]))
            .fold(0.0f32, f32::max)
    }
}
