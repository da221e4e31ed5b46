//! Solver configuration.
//!
//! Everything here is set once when the simulator is built and stays
//! constant for its lifetime. Configs load from TOML.

use folio_types::constants::{
    CORNER_TOLERANCE, DEFAULT_GRAVITY, DEFAULT_MAX_STRETCH, DEFAULT_SOLVER_ITERATIONS,
};
use folio_types::{FolioError, FolioResult};
use serde::{Deserialize, Serialize};

/// Which step algorithm drives the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Gravity and damping, then iterative constraint relaxation, then pins.
    #[default]
    PositionBased,
    /// Explicit mass-spring integration over structural edges only.
    MassSpring,
}

/// Parameters of the mass-spring strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant applied along every structural edge.
    pub stiffness: f32,
    /// Mass of each vertex.
    pub mass: f32,
    /// Velocity multiplier applied after every force update.
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 50.0,
            mass: 0.4,
            damping: 0.9,
        }
    }
}

impl SpringConfig {
    /// Checks the spring parameters for range errors.
    pub fn validate(&self) -> FolioResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(FolioError::InvalidConfig(format!(
                "spring.mass must be positive, got {}",
                self.mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(FolioError::InvalidConfig(format!(
                "spring.stiffness must be positive, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(FolioError::InvalidConfig(format!(
                "spring.damping must be non-negative, got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

/// Configuration for the sheet simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Stiffness of direct mesh edges.
    pub structural_stiffness: f32,
    /// Stiffness of diagonal braces.
    pub shear_stiffness: f32,
    /// Stiffness of skip-one braces.
    pub bending_stiffness: f32,

    /// Velocity multiplier applied every step (1.0 = undamped).
    pub damping: f32,

    /// Gravity vector [gx, gy, gz] in local units/s².
    pub gravity: [f32; 3],

    /// Relaxation passes per step. Also divides each pass's correction.
    pub solver_iterations: u32,

    /// Stretch ceiling of structural edges as a multiple of rest length.
    pub max_stretch: f32,

    /// Step algorithm.
    pub solver: SolverKind,

    /// The two rest-pose axes (0 = X, 1 = Y, 2 = Z) spanned by the sheet,
    /// used to locate its corners.
    pub corner_axes: [usize; 2],

    /// Absolute tolerance when matching corners to the bounding extents.
    pub corner_tolerance: f32,

    /// Mass-spring parameters, used when `solver = "mass_spring"`.
    pub spring: SpringConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            structural_stiffness: 8.0,
            shear_stiffness: 4.0,
            bending_stiffness: 2.0,
            damping: 0.95,
            gravity: DEFAULT_GRAVITY,
            solver_iterations: DEFAULT_SOLVER_ITERATIONS,
            max_stretch: DEFAULT_MAX_STRETCH,
            solver: SolverKind::PositionBased,
            corner_axes: [0, 2],
            corner_tolerance: CORNER_TOLERANCE,
            spring: SpringConfig::default(),
        }
    }
}

impl SheetConfig {
    /// A config with no forces at all: nothing moves unless pins move it.
    pub fn quiescent() -> Self {
        Self {
            damping: 0.0,
            gravity: [0.0; 3],
            ..Default::default()
        }
    }

    /// Checks every value for range errors.
    ///
    /// Two settings are accepted but logged: a damping factor above 1.0
    /// feeds energy into the sheet every step, and a stiffness above
    /// `4 * solver_iterations` moves a vertex past the mirror image of its
    /// target, so relaxation diverges.
    pub fn validate(&self) -> FolioResult<()> {
        let stiffness = [
            ("structural_stiffness", self.structural_stiffness),
            ("shear_stiffness", self.shear_stiffness),
            ("bending_stiffness", self.bending_stiffness),
        ];
        for (name, value) in stiffness {
            if !(value.is_finite() && value > 0.0) {
                return Err(FolioError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(FolioError::InvalidConfig(format!(
                "damping must be a non-negative number, got {}",
                self.damping
            )));
        }
        if self.damping > 1.0 {
            tracing::warn!(
                damping = self.damping,
                "damping above 1.0 adds energy every step"
            );
        }

        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(FolioError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }

        if self.solver_iterations == 0 {
            return Err(FolioError::InvalidConfig(
                "solver_iterations must be at least 1".into(),
            ));
        }

        let overshoot = 4.0 * self.solver_iterations as f32;
        for (name, value) in stiffness {
            if value > overshoot {
                tracing::warn!(
                    name,
                    value,
                    limit = overshoot,
                    "stiffness overshoots for this iteration count"
                );
            }
        }

        if !(self.max_stretch.is_finite() && self.max_stretch >= 1.0) {
            return Err(FolioError::InvalidConfig(format!(
                "max_stretch must be >= 1.0, got {}",
                self.max_stretch
            )));
        }

        let [a, b] = self.corner_axes;
        if a > 2 || b > 2 || a == b {
            return Err(FolioError::InvalidConfig(format!(
                "corner_axes must name two distinct axes in 0..3, got {:?}",
                self.corner_axes
            )));
        }

        if !(self.corner_tolerance.is_finite() && self.corner_tolerance > 0.0) {
            return Err(FolioError::InvalidConfig(format!(
                "corner_tolerance must be positive, got {}",
                self.corner_tolerance
            )));
        }

        if self.solver == SolverKind::MassSpring {
            self.spring.validate()?;
        }

        Ok(())
    }

    /// Parses and validates a TOML config.
    pub fn from_toml_str(source: &str) -> FolioResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| FolioError::Serialization(format!("TOML parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> FolioResult<String> {
        toml::to_string(self)
            .map_err(|e| FolioError::Serialization(format!("TOML serialization failed: {e}")))
    }
}
