//! # folio-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout
//! and the constraint graph the sheet solver relaxes against.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Rest-pose positions and triangle indices in SoA buffers.
//! - [`ConnectionGraph`]: Per-vertex structural, shear, and bending neighbors
//!   with rest lengths, built once from the mesh topology.
//! - Procedural generators for test and demo sheets.

pub mod connections;
pub mod generators;
pub mod mesh;

pub use connections::{ConnectionGraph, Neighbor, NeighborClass, VertexConnections};
pub use mesh::TriangleMesh;
