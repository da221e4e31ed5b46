//! Named configuration presets.
//!
//! The registry is process-wide and built once on first access; after
//! that it is read-only and shared by every simulator.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::config::{SheetConfig, SolverKind, SpringConfig};

static REGISTRY: OnceLock<PresetRegistry> = OnceLock::new();

/// A named collection of sheet configurations.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: BTreeMap<String, SheetConfig>,
}

impl PresetRegistry {
    /// The shared registry, initialized on first call.
    pub fn global() -> &'static PresetRegistry {
        REGISTRY.get_or_init(|| {
            let registry = Self::with_defaults();
            tracing::debug!(presets = registry.len(), "initialized preset registry");
            registry
        })
    }

    /// Builds a registry holding the built-in presets.
    pub fn with_defaults() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert("paper".to_string(), paper());
        presets.insert("cloth".to_string(), cloth());
        presets.insert("cardstock".to_string(), cardstock());
        presets.insert("spring_sheet".to_string(), spring_sheet());
        Self { presets }
    }

    /// Looks up a preset by name.
    pub fn get(&self, name: &str) -> Option<&SheetConfig> {
        self.presets.get(name)
    }

    /// All preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Light printer paper: stiff edges, weak gravity, heavy damping.
fn paper() -> SheetConfig {
    SheetConfig::default()
}

/// Loose woven cloth: soft bending, strong gravity, little stretch.
fn cloth() -> SheetConfig {
    SheetConfig {
        structural_stiffness: 6.0,
        shear_stiffness: 2.0,
        bending_stiffness: 0.5,
        damping: 0.98,
        gravity: [0.0, -4.0, 0.0],
        solver_iterations: 5,
        max_stretch: 1.1,
        ..Default::default()
    }
}

/// Thick card: resists bending almost as much as stretching.
fn cardstock() -> SheetConfig {
    SheetConfig {
        structural_stiffness: 10.0,
        shear_stiffness: 6.0,
        bending_stiffness: 6.0,
        damping: 0.9,
        solver_iterations: 4,
        max_stretch: 1.05,
        ..Default::default()
    }
}

/// Corner-pinned spring sheet with no gravity.
fn spring_sheet() -> SheetConfig {
    SheetConfig {
        solver: SolverKind::MassSpring,
        gravity: [0.0; 3],
        spring: SpringConfig::default(),
        ..Default::default()
    }
}
