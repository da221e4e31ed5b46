//! # folio-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the Folio sheet simulator.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other Folio crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{FolioError, FolioResult};
pub use ids::VertexId;
