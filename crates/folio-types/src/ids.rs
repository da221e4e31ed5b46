//! Strongly-typed vertex identifier.
//!
//! Raw `u32` indices live in triangle buffers; everything that names a
//! single vertex (neighbors, pins) uses `VertexId`.

use serde::{Deserialize, Serialize};

/// Index into the vertex arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<usize> for VertexId {
    fn from(val: usize) -> Self {
        Self(val as u32)
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
