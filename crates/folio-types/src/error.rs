//! Error types for the Folio engine.
//!
//! All crates return `FolioResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Folio engine.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Mesh buffers are inconsistent (e.g. SoA channel lengths differ).
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Triangle index data cannot be turned into a connection graph.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Configuration value is invalid, or the rest pose cannot be pinned.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A per-step call violated its contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, FolioError>`.
pub type FolioResult<T> = Result<T, FolioError>;
