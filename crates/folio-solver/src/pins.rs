//! Pin resolution: vertices driven by external targets.
//!
//! A pinned vertex is never integrated or relaxed. After the solver runs,
//! it is moved onto its target and given the velocity implied by that
//! move, so downstream readers see a rate consistent with the forced motion.
//!
//! Targets are owned by the host and expressed in its (world) space. The
//! simulator converts them with a single `local_from_world` transform.

use folio_types::{FolioError, FolioResult, VertexId};
use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::SheetConfig;
use crate::state::SimulationState;

/// A host-owned target a pinned vertex follows, in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinTarget {
    pub position: Vec3,
}

impl PinTarget {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Moves the target by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// The set of pinned vertices, in target order.
///
/// `targets[k]` passed to [`resolve`] drives `vertices()[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PinBinding {
    vertices: Vec<VertexId>,
    pinned: Vec<bool>,
}

impl PinBinding {
    /// No pins: every vertex is free.
    pub fn none(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::new(),
            pinned: vec![false; vertex_count],
        }
    }

    /// Pins the given vertices, in order. Repeated vertices are bound once.
    pub fn from_vertices(vertices: &[VertexId], vertex_count: usize) -> FolioResult<Self> {
        let mut binding = Self::none(vertex_count);
        for &v in vertices {
            if v.index() >= vertex_count {
                return Err(FolioError::InvalidConfig(format!(
                    "Pin {} is out of range (vertex count: {})",
                    v, vertex_count
                )));
            }
            binding.push(v);
        }
        Ok(binding)
    }

    /// The default pin set: the four sheet corners followed by the vertex
    /// nearest the rest-pose centroid.
    pub fn default_for(rest: &[Vec3], config: &SheetConfig) -> FolioResult<Self> {
        let corners = find_corner_vertices(rest, config.corner_axes, config.corner_tolerance)?;
        let center = find_center_vertex(rest)?;

        let mut binding = Self::none(rest.len());
        for corner in corners {
            binding.push(corner);
        }
        binding.push(center);
        Ok(binding)
    }

    fn push(&mut self, v: VertexId) {
        if self.pinned[v.index()] {
            tracing::warn!(vertex = %v, "vertex is already pinned, binding it once");
            return;
        }
        self.pinned[v.index()] = true;
        self.vertices.push(v);
    }

    /// Number of pins.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Pinned vertices in target order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// True if vertex `i` is pinned.
    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.pinned[i]
    }

    /// Per-vertex pinned flags.
    pub fn mask(&self) -> &[bool] {
        &self.pinned
    }

    /// Number of vertices the binding was built for.
    pub fn vertex_count(&self) -> usize {
        self.pinned.len()
    }
}

/// Finds the four corners of a sheet spanning two rest-pose axes.
///
/// Corners are returned as `[(min a, min b), (max a, min b), (min a, max b),
/// (max a, max b)]`. Vertices are scanned in index order; a vertex claims at
/// most one corner and a later match replaces an earlier one.
pub fn find_corner_vertices(
    rest: &[Vec3],
    axes: [usize; 2],
    tolerance: f32,
) -> FolioResult<[VertexId; 4]> {
    let [a, b] = axes;
    if a > 2 || b > 2 || a == b {
        return Err(FolioError::InvalidConfig(format!(
            "Corner axes must be two distinct axes in 0..3, got {axes:?}"
        )));
    }
    if rest.is_empty() {
        return Err(FolioError::InvalidConfig(
            "Cannot locate corners of an empty rest pose".into(),
        ));
    }

    let (mut min_a, mut max_a) = (f32::MAX, f32::MIN);
    let (mut min_b, mut max_b) = (f32::MAX, f32::MIN);
    for p in rest {
        min_a = min_a.min(p[a]);
        max_a = max_a.max(p[a]);
        min_b = min_b.min(p[b]);
        max_b = max_b.max(p[b]);
    }

    let near = |value: f32, extent: f32| (value - extent).abs() < tolerance;

    let mut corners: [Option<VertexId>; 4] = [None; 4];
    for (i, p) in rest.iter().enumerate() {
        let id = VertexId(i as u32);
        if near(p[a], min_a) && near(p[b], min_b) {
            corners[0] = Some(id);
        } else if near(p[a], max_a) && near(p[b], min_b) {
            corners[1] = Some(id);
        } else if near(p[a], min_a) && near(p[b], max_b) {
            corners[2] = Some(id);
        } else if near(p[a], max_a) && near(p[b], max_b) {
            corners[3] = Some(id);
        }
    }

    match corners {
        [Some(c0), Some(c1), Some(c2), Some(c3)] => Ok([c0, c1, c2, c3]),
        _ => {
            let found = corners.iter().filter(|c| c.is_some()).count();
            Err(FolioError::InvalidConfig(format!(
                "Rest pose resolves only {found} of 4 corners on axes {axes:?}; \
                 the sheet is degenerate along one of them"
            )))
        }
    }
}

/// Finds the vertex nearest the rest-pose centroid. Ties go to the lowest index.
pub fn find_center_vertex(rest: &[Vec3]) -> FolioResult<VertexId> {
    if rest.is_empty() {
        return Err(FolioError::InvalidConfig(
            "Cannot locate the center of an empty rest pose".into(),
        ));
    }

    let centroid = rest.iter().copied().sum::<Vec3>() / rest.len() as f32;

    let mut closest = 0;
    let mut closest_distance = f32::MAX;
    for (i, p) in rest.iter().enumerate() {
        let distance = p.distance(centroid);
        if distance < closest_distance {
            closest_distance = distance;
            closest = i;
        }
    }
    Ok(VertexId(closest as u32))
}

/// Creates one owned target per pin, placed on the pinned vertex's rest
/// position mapped into world space.
pub fn create_default_targets(
    rest: &[Vec3],
    binding: &PinBinding,
    world_from_local: &Affine3A,
) -> Vec<PinTarget> {
    binding
        .vertices()
        .iter()
        .map(|v| PinTarget::new(world_from_local.transform_point3(rest[v.index()])))
        .collect()
}

/// Summary of one pin resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinReport {
    /// Number of vertices moved onto targets.
    pub count: usize,
    /// Largest implied pin speed this step.
    pub max_speed: f32,
}

/// Moves every pinned vertex onto its target and sets the implied velocity
/// `(new - old) / dt`.
pub fn resolve(
    binding: &PinBinding,
    targets: &[PinTarget],
    local_from_world: &Affine3A,
    state: &mut SimulationState,
    dt: f32,
) -> FolioResult<PinReport> {
    if targets.len() != binding.len() {
        return Err(FolioError::InvalidInput(format!(
            "Expected {} pin targets, got {}",
            binding.len(),
            targets.len()
        )));
    }
    if dt.is_nan() || dt <= 0.0 {
        return Err(FolioError::InvalidInput(format!(
            "Timestep must be positive, got {dt}"
        )));
    }

    let mut report = PinReport::default();
    for (v, target) in binding.vertices().iter().zip(targets) {
        let i = v.index();
        let new_position = local_from_world.transform_point3(target.position);
        let velocity = (new_position - state.position(i)) / dt;

        state.set_velocity(i, velocity);
        state.set_position(i, new_position);

        report.count += 1;
        report.max_speed = report.max_speed.max(velocity.length());
    }
    Ok(report)
}
