//! # folio-solver
//!
//! Time integration, constraint relaxation, pinning, and the step
//! orchestrator that sequences them.
//!
//! ## Key Types
//!
//! - [`SheetSimulator`]: Owns the state and runs one fixed step at a time
//! - [`SimulationState`]: SoA buffers for positions and velocities
//! - [`SheetConfig`]: Stiffness, damping, gravity, and iteration settings
//! - [`PinBinding`] / [`PinTarget`]: Externally driven vertices and their targets
//! - [`SolverStrategy`]: Pluggable step algorithm (position-based, mass-spring)
//! - [`PresetRegistry`]: Process-wide table of named configurations

pub mod config;
pub mod integrator;
pub mod observer;
pub mod pbd;
pub mod pins;
pub mod presets;
pub mod relax;
pub mod simulator;
pub mod spring;
pub mod state;
pub mod strategy;

pub use config::{SheetConfig, SolverKind, SpringConfig};
pub use observer::StepObserver;
pub use pbd::PositionBasedSolver;
pub use pins::{PinBinding, PinTarget};
pub use presets::PresetRegistry;
pub use simulator::SheetSimulator;
pub use spring::MassSpringSolver;
pub use state::SimulationState;
pub use strategy::{SolverStrategy, StepResult};
