//! Constraint graph built from mesh topology.
//!
//! Every vertex gets three neighbor lists, each entry carrying its own
//! rest length measured on the rest pose:
//!
//! - **structural**: vertices sharing a triangle edge,
//! - **shear**: vertices two edges away whose rest distance is close to
//!   `√2 ×` one of the vertex's structural rest lengths (quad diagonals),
//! - **bending**: every other vertex two edges away ("skip one" braces).
//!
//! Shear and bending are classified from each vertex's own point of view,
//! so a pair may be shear from one end and bending from the other. The
//! solver applies each endpoint's stiffness independently.
//!
//! The graph is built once and never mutated.

use std::collections::HashSet;

use folio_types::constants::{SHEAR_RATIO, SHEAR_TOLERANCE};
use folio_types::{FolioError, FolioResult, VertexId};
use glam::Vec3;

use crate::mesh::TriangleMesh;

/// The physical role of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborClass {
    /// Direct mesh edge.
    Structural,
    /// Diagonal brace.
    Shear,
    /// Skip-one brace.
    Bending,
}

impl NeighborClass {
    /// All classes in the order the solver visits them.
    pub const ALL: [NeighborClass; 3] = [
        NeighborClass::Structural,
        NeighborClass::Shear,
        NeighborClass::Bending,
    ];
}

/// A neighbor with the rest length of the constraint to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub vertex: VertexId,
    pub rest_length: f32,
}

/// The three neighbor lists of a single vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexConnections {
    pub structural: Vec<Neighbor>,
    pub shear: Vec<Neighbor>,
    pub bending: Vec<Neighbor>,
}

impl VertexConnections {
    /// Returns the neighbor list for one class.
    #[inline]
    pub fn class(&self, class: NeighborClass) -> &[Neighbor] {
        match class {
            NeighborClass::Structural => &self.structural,
            NeighborClass::Shear => &self.shear,
            NeighborClass::Bending => &self.bending,
        }
    }

    /// Total number of neighbors across all classes.
    pub fn len(&self) -> usize {
        self.structural.len() + self.shear.len() + self.bending.len()
    }

    /// True for a vertex no constraint touches.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `vertex` is a direct structural neighbor.
    pub fn has_structural(&self, vertex: VertexId) -> bool {
        self.structural.iter().any(|n| n.vertex == vertex)
    }

    /// Finds the class `vertex` belongs to from this vertex's point of view.
    pub fn classify(&self, vertex: VertexId) -> Option<NeighborClass> {
        NeighborClass::ALL
            .into_iter()
            .find(|&class| self.class(class).iter().any(|n| n.vertex == vertex))
    }
}

/// Per-vertex constraint graph for the whole sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionGraph {
    vertices: Vec<VertexConnections>,
}

impl ConnectionGraph {
    /// Builds the graph from a mesh's triangles and rest positions.
    pub fn from_mesh(mesh: &TriangleMesh) -> FolioResult<Self> {
        Self::build(&mesh.indices, &mesh.positions_vec3())
    }

    /// Builds the graph from a flat triangle index list and rest positions.
    ///
    /// Fails with [`FolioError::InvalidTopology`] if the index buffer does not
    /// hold whole triangles or references a vertex outside `rest`.
    pub fn build(indices: &[u32], rest: &[Vec3]) -> FolioResult<Self> {
        let n = rest.len();
        if indices.len() % 3 != 0 {
            return Err(FolioError::InvalidTopology(format!(
                "Index count {} is not divisible by 3",
                indices.len()
            )));
        }
        if let Some((pos, &idx)) = indices.iter().enumerate().find(|&(_, &idx)| idx as usize >= n) {
            return Err(FolioError::InvalidTopology(format!(
                "Triangle {} references vertex {} (vertex count: {})",
                pos / 3,
                idx,
                n
            )));
        }

        let mut vertices = vec![VertexConnections::default(); n];

        for tri in indices.chunks_exact(3) {
            let (v0, v1, v2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            add_structural(&mut vertices, rest, v0, v1);
            add_structural(&mut vertices, rest, v1, v2);
            add_structural(&mut vertices, rest, v2, v0);
        }

        for i in 0..n {
            let ring2 = second_ring(&vertices, i);
            let p = rest[i];
            for j in ring2 {
                let dist = p.distance(rest[j]);
                let is_shear = vertices[i]
                    .structural
                    .iter()
                    .any(|s| (dist - s.rest_length * SHEAR_RATIO).abs() < SHEAR_TOLERANCE);

                let neighbor = Neighbor {
                    vertex: VertexId(j as u32),
                    rest_length: dist,
                };
                if is_shear {
                    vertices[i].shear.push(neighbor);
                } else {
                    vertices[i].bending.push(neighbor);
                }
            }
        }

        let graph = Self { vertices };
        tracing::debug!(
            vertices = n,
            structural_edges = graph.structural_edge_count(),
            "built connection graph"
        );
        Ok(graph)
    }

    /// Number of vertices in the graph.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Connections of one vertex.
    #[inline]
    pub fn get(&self, vertex: VertexId) -> &VertexConnections {
        &self.vertices[vertex.index()]
    }

    /// Iterates over all per-vertex records in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &VertexConnections)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, c)| (VertexId(i as u32), c))
    }

    /// Number of unique undirected structural edges.
    pub fn structural_edge_count(&self) -> usize {
        // Each edge is recorded once at each endpoint.
        self.vertices.iter().map(|c| c.structural.len()).sum::<usize>() / 2
    }

    /// Total directed shear entries across all vertices.
    pub fn shear_count(&self) -> usize {
        self.vertices.iter().map(|c| c.shear.len()).sum()
    }

    /// Total directed bending entries across all vertices.
    pub fn bending_count(&self) -> usize {
        self.vertices.iter().map(|c| c.bending.len()).sum()
    }
}

/// Registers a structural edge at both endpoints unless already present.
fn add_structural(vertices: &mut [VertexConnections], rest: &[Vec3], a: usize, b: usize) {
    if a == b {
        return;
    }
    let (va, vb) = (VertexId(a as u32), VertexId(b as u32));
    if !vertices[a].has_structural(vb) {
        vertices[a].structural.push(Neighbor {
            vertex: vb,
            rest_length: rest[a].distance(rest[b]),
        });
    }
    if !vertices[b].has_structural(va) {
        vertices[b].structural.push(Neighbor {
            vertex: va,
            rest_length: rest[b].distance(rest[a]),
        });
    }
}

/// Vertices exactly two structural hops from `i`, in first-visit order.
fn second_ring(vertices: &[VertexConnections], i: usize) -> Vec<usize> {
    let ring1: HashSet<usize> = vertices[i]
        .structural
        .iter()
        .map(|n| n.vertex.index())
        .collect();

    let mut seen = HashSet::new();
    let mut ring2 = Vec::new();
    for n1 in &vertices[i].structural {
        for n2 in &vertices[n1.vertex.index()].structural {
            let j = n2.vertex.index();
            if j != i && !ring1.contains(&j) && seen.insert(j) {
                ring2.push(j);
            }
        }
    }
    ring2
}
