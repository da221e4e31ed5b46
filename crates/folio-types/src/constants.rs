//! Simulation constants and defaults.
//!
//! Defaults reproduce the behavior of the paper sheet the engine was
//! tuned against: a light, heavily damped sheet relaxed in three passes.

/// Default simulation timestep (seconds). 1/50th of a second, a typical
/// fixed physics tick.
pub const DEFAULT_DT: f32 = 1.0 / 50.0;

/// Default gravity (local units/s²). Deliberately weak so paper floats.
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -2.0, 0.0];

/// Default number of relaxation passes per timestep.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 3;

/// Default stretch ceiling for structural edges (1.0 = inextensible).
pub const DEFAULT_MAX_STRETCH: f32 = 1.2;

/// Edges shorter than this are skipped during relaxation.
pub const MIN_EDGE_LENGTH: f32 = 1.0e-4;

/// Springs shorter than this are skipped by the mass-spring strategy.
pub const MIN_SPRING_LENGTH: f32 = 1.0e-3;

/// Absolute tolerance for classifying a distance-2 pair as a shear diagonal.
pub const SHEAR_TOLERANCE: f32 = 0.1;

/// Diagonal-to-edge ratio used for shear detection.
pub const SHEAR_RATIO: f32 = std::f32::consts::SQRT_2;

/// Absolute tolerance used when matching corner vertices to the bounding extents.
pub const CORNER_TOLERANCE: f32 = 0.01;
