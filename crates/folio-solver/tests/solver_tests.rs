//! Integration tests for folio-solver.

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use folio_mesh::generators::quad_grid;
use folio_mesh::{ConnectionGraph, TriangleMesh};
use folio_solver::pins::{self, find_center_vertex, find_corner_vertices, PinReport};
use folio_solver::relax::{relax, relax_passes, PassReport, RelaxParams};
use folio_solver::{
    MassSpringSolver, PinBinding, PinTarget, PresetRegistry, SheetConfig, SheetSimulator,
    SimulationState, SolverKind, StepObserver, StepResult,
};
use folio_types::{FolioError, VertexId};
use glam::{Affine3A, Vec3};

const DT: f32 = 0.02;

fn ids(raw: &[u32]) -> Vec<VertexId> {
    raw.iter().map(|&v| VertexId(v)).collect()
}

fn grid_3x3() -> TriangleMesh {
    quad_grid(2, 2, 1.0, 1.0)
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = SheetConfig::default();
    assert_eq!(config.structural_stiffness, 8.0);
    assert_eq!(config.shear_stiffness, 4.0);
    assert_eq!(config.bending_stiffness, 2.0);
    assert_eq!(config.damping, 0.95);
    assert_eq!(config.gravity, [0.0, -2.0, 0.0]);
    assert_eq!(config.solver_iterations, 3);
    assert_eq!(config.max_stretch, 1.2);
    assert_eq!(config.solver, SolverKind::PositionBased);
    assert_eq!(config.corner_axes, [0, 2]);
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_bad_values() {
    let cases: Vec<SheetConfig> = vec![
        SheetConfig {
            structural_stiffness: -1.0,
            ..Default::default()
        },
        SheetConfig {
            shear_stiffness: f32::NAN,
            ..Default::default()
        },
        SheetConfig {
            damping: -0.1,
            ..Default::default()
        },
        SheetConfig {
            gravity: [0.0, f32::INFINITY, 0.0],
            ..Default::default()
        },
        SheetConfig {
            solver_iterations: 0,
            ..Default::default()
        },
        SheetConfig {
            max_stretch: 0.9,
            ..Default::default()
        },
        SheetConfig {
            corner_axes: [2, 2],
            ..Default::default()
        },
        SheetConfig {
            corner_axes: [0, 3],
            ..Default::default()
        },
        SheetConfig {
            corner_tolerance: 0.0,
            ..Default::default()
        },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(FolioError::InvalidConfig(_))),
            "accepted {config:?}"
        );
    }
}

#[test]
fn config_spring_values_checked_only_for_mass_spring() {
    let mut config = SheetConfig::default();
    config.spring.mass = 0.0;
    assert!(config.validate().is_ok());

    config.solver = SolverKind::MassSpring;
    assert!(matches!(config.validate(), Err(FolioError::InvalidConfig(_))));
}

#[test]
fn config_accepts_hazardous_values() {
    let config = SheetConfig {
        damping: 1.5,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    let config = SheetConfig {
        structural_stiffness: 80.0,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    assert!(SheetConfig::quiescent().validate().is_ok());
}

#[test]
fn config_toml_roundtrip() {
    let config = SheetConfig {
        solver_iterations: 6,
        gravity: [0.0, -9.81, 0.0],
        solver: SolverKind::MassSpring,
        ..Default::default()
    };
    let text = config.to_toml_string().unwrap();
    let back = SheetConfig::from_toml_str(&text).unwrap();

    assert_eq!(back.solver_iterations, 6);
    assert_eq!(back.gravity, [0.0, -9.81, 0.0]);
    assert_eq!(back.solver, SolverKind::MassSpring);
    assert_eq!(back.spring.stiffness, config.spring.stiffness);
}

#[test]
fn config_partial_toml_fills_defaults() {
    let config = SheetConfig::from_toml_str(
        "solver_iterations = 7\nsolver = \"mass_spring\"\n\n[spring]\nmass = 1.0\n",
    )
    .unwrap();
    assert_eq!(config.solver_iterations, 7);
    assert_eq!(config.solver, SolverKind::MassSpring);
    assert_eq!(config.spring.mass, 1.0);
    assert_eq!(config.spring.damping, 0.9);
    assert_eq!(config.structural_stiffness, 8.0);
}

#[test]
fn config_toml_errors() {
    assert!(matches!(
        SheetConfig::from_toml_str("solver_iterations = \"many\""),
        Err(FolioError::Serialization(_))
    ));
    assert!(matches!(
        SheetConfig::from_toml_str("max_stretch = 0.5"),
        Err(FolioError::InvalidConfig(_))
    ));
}

// ─── Preset Tests ─────────────────────────────────────────────

#[test]
fn preset_registry_is_shared() {
    assert!(std::ptr::eq(PresetRegistry::global(), PresetRegistry::global()));
}

#[test]
fn preset_names_sorted() {
    let registry = PresetRegistry::with_defaults();
    assert_eq!(registry.names(), vec!["cardstock", "cloth", "paper", "spring_sheet"]);
    assert_eq!(registry.len(), 4);
    assert!(registry.get("vellum").is_none());
}

#[test]
fn presets_are_valid() {
    let registry = PresetRegistry::global();
    for name in registry.names() {
        let config = registry.get(name).unwrap();
        assert!(config.validate().is_ok(), "preset {name} is invalid");
    }

    let paper = registry.get("paper").unwrap();
    assert_eq!(paper.structural_stiffness, SheetConfig::default().structural_stiffness);
    assert_eq!(registry.get("spring_sheet").unwrap().solver, SolverKind::MassSpring);
}

// ─── Pin Tests ────────────────────────────────────────────────

#[test]
fn default_pins_are_corners_then_center() {
    let rest = grid_3x3().positions_vec3();
    let binding = PinBinding::default_for(&rest, &SheetConfig::default()).unwrap();
    assert_eq!(binding.vertices(), ids(&[0, 2, 6, 8, 4]).as_slice());
    assert!(binding.is_pinned(4));
    assert!(!binding.is_pinned(1));
    assert_eq!(binding.vertex_count(), 9);
}

#[test]
fn corners_follow_axis_order() {
    let rest = grid_3x3().positions_vec3();
    let corners = find_corner_vertices(&rest, [2, 0], 0.01).unwrap();
    // Swapping the axes swaps the two mixed corners.
    assert_eq!(corners, [VertexId(0), VertexId(6), VertexId(2), VertexId(8)]);
}

#[test]
fn collinear_rest_pose_has_no_corners() {
    let rest: Vec<Vec3> = (0..4).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
    let result = PinBinding::default_for(&rest, &SheetConfig::default());
    assert!(matches!(result, Err(FolioError::InvalidConfig(_))));
}

#[test]
fn corner_search_rejects_bad_axes() {
    let rest = grid_3x3().positions_vec3();
    for axes in [[0, 3], [5, 1], [1, 1]] {
        assert!(matches!(
            find_corner_vertices(&rest, axes, 0.01),
            Err(FolioError::InvalidConfig(_))
        ));
    }
}

#[test]
fn empty_rest_pose_is_rejected() {
    assert!(find_center_vertex(&[]).is_err());
    assert!(find_corner_vertices(&[], [0, 2], 0.01).is_err());
}

#[test]
fn center_coinciding_with_corner_is_bound_once() {
    // On a single quad every vertex is equidistant from the centroid, so the
    // center resolves to vertex 0, which is already a corner.
    let rest = quad_grid(1, 1, 1.0, 1.0).positions_vec3();
    assert_eq!(find_center_vertex(&rest).unwrap(), VertexId(0));

    let binding = PinBinding::default_for(&rest, &SheetConfig::default()).unwrap();
    assert_eq!(binding.len(), 4);
    assert_eq!(binding.vertices(), ids(&[0, 1, 2, 3]).as_slice());
}

#[test]
fn explicit_pins_validated_and_deduplicated() {
    assert!(matches!(
        PinBinding::from_vertices(&ids(&[0, 9]), 9),
        Err(FolioError::InvalidConfig(_))
    ));

    let binding = PinBinding::from_vertices(&ids(&[3, 1, 3]), 9).unwrap();
    assert_eq!(binding.vertices(), ids(&[3, 1]).as_slice());
}

#[test]
fn resolve_sets_implied_velocity() {
    let rest = [Vec3::ZERO, Vec3::X];
    let mut state = SimulationState::from_rest(&rest);
    let binding = PinBinding::from_vertices(&ids(&[1]), 2).unwrap();
    let targets = [PinTarget::new(Vec3::new(1.0, 0.5, 0.0))];

    let report: PinReport =
        pins::resolve(&binding, &targets, &Affine3A::IDENTITY, &mut state, 0.5).unwrap();

    assert_eq!(report.count, 1);
    assert_eq!(state.position(1), Vec3::new(1.0, 0.5, 0.0));
    assert_relative_eq!(state.vel_y[1], 1.0, epsilon = 1e-6);
    assert_relative_eq!(report.max_speed, 1.0, epsilon = 1e-6);
    assert_eq!(state.position(0), Vec3::ZERO);
}

#[test]
fn resolve_rejects_bad_input() {
    let mut state = SimulationState::from_rest(&[Vec3::ZERO, Vec3::X]);
    let binding = PinBinding::from_vertices(&ids(&[0]), 2).unwrap();

    let no_targets: [PinTarget; 0] = [];
    assert!(matches!(
        pins::resolve(&binding, &no_targets, &Affine3A::IDENTITY, &mut state, DT),
        Err(FolioError::InvalidInput(_))
    ));

    let targets = [PinTarget::new(Vec3::ZERO)];
    for dt in [0.0, -1.0, f32::NAN] {
        assert!(matches!(
            pins::resolve(&binding, &targets, &Affine3A::IDENTITY, &mut state, dt),
            Err(FolioError::InvalidInput(_))
        ));
    }
}

// ─── Relaxation Tests ─────────────────────────────────────────

fn stiffness_params(stiffness: f32) -> RelaxParams {
    RelaxParams {
        structural_stiffness: stiffness,
        shear_stiffness: stiffness,
        bending_stiffness: stiffness,
        max_stretch: 1.2,
    }
}

#[test]
fn zero_passes_leave_state_unchanged() {
    let mesh = grid_3x3();
    let graph = ConnectionGraph::from_mesh(&mesh).unwrap();
    let mut state = SimulationState::from_mesh(&mesh).unwrap();
    state.set_position(4, Vec3::new(0.3, 0.7, -0.2));
    let before = state.positions();

    let report = relax_passes(&mut state, &graph, &[false; 9], &stiffness_params(1.0), 0, 3);

    assert_eq!(report, PassReport::default());
    assert_eq!(state.positions(), before);
}

#[test]
fn stretch_converges_to_ceiling_from_above() {
    let rest = [Vec3::ZERO, Vec3::X, Vec3::X];
    let graph = ConnectionGraph::build(&[0, 1, 2], &rest).unwrap();
    let mut state = SimulationState::from_rest(&rest);
    state.set_position(1, Vec3::X * 2.0);
    state.set_position(2, Vec3::X * 2.0);
    let pinned = [false, true, true];

    for _ in 0..12 {
        relax(&mut state, &graph, &pinned, &stiffness_params(1.0), 1);
        let length = state.position(1).distance(state.position(0));
        assert!(length >= 1.0, "edge compressed below rest: {length}");
    }

    let length = state.position(1).distance(state.position(0));
    assert!(length > 1.2 && length < 1.201, "final length {length}");
}

#[test]
fn relaxation_moves_positions_only() {
    let mesh = grid_3x3();
    let graph = ConnectionGraph::from_mesh(&mesh).unwrap();
    let mut state = SimulationState::from_mesh(&mesh).unwrap();
    state.set_position(4, Vec3::new(0.0, 0.5, 0.0));

    let report = relax(&mut state, &graph, &[false; 9], &stiffness_params(1.0), 1);

    assert!(report.corrected_vertices > 0);
    assert!(report.max_correction > 0.0);
    assert_eq!(state.kinetic_energy(), 0.0);
}

// ─── Simulator Tests ──────────────────────────────────────────

#[test]
fn pinned_rest_sheet_without_gravity_stays_put() {
    let mesh = grid_3x3();
    let config = SheetConfig {
        gravity: [0.0; 3],
        ..Default::default()
    };
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, config, Affine3A::IDENTITY).unwrap();

    for _ in 0..10 {
        sim.step(DT, &targets).unwrap();
    }

    assert_eq!(sim.positions(), mesh.positions_vec3());
    assert_eq!(sim.state().kinetic_energy(), 0.0);
}

#[test]
fn corner_pinned_sheet_keeps_its_center() {
    let mesh = grid_3x3();
    let rest = mesh.positions_vec3();
    let pins = PinBinding::from_vertices(&ids(&[0, 2, 6, 8]), 9).unwrap();
    let targets: Vec<PinTarget> = pins
        .vertices()
        .iter()
        .map(|v| PinTarget::new(rest[v.index()]))
        .collect();
    let config = SheetConfig {
        gravity: [0.0; 3],
        ..Default::default()
    };
    let mut sim = SheetSimulator::new(&mesh, config, pins).unwrap();

    sim.step(DT, &targets).unwrap();
    assert_eq!(sim.state().position(4), rest[4]);
}

#[test]
fn quiescent_free_sheet_is_a_fixed_point() {
    let mesh = quad_grid(3, 3, 2.0, 2.0);
    let mut sim =
        SheetSimulator::new(&mesh, SheetConfig::quiescent(), PinBinding::none(16)).unwrap();

    for _ in 0..5 {
        let result = sim.step(DT, &[]).unwrap();
        assert_eq!(result.iterations, 3);
        assert_eq!(result.max_correction, 0.0);
    }
    assert_eq!(sim.positions(), mesh.positions_vec3());
}

#[test]
fn dragged_corner_lands_on_target() {
    let mesh = grid_3x3();
    let (mut sim, mut targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::quiescent(), Affine3A::IDENTITY)
            .unwrap();

    let delta = Vec3::new(0.0, 0.1, -0.05);
    targets[0].translate(delta);
    let result = sim.step(DT, &targets).unwrap();

    let rest = mesh.position_vec3(0);
    let moved = sim.state().position(0);
    assert_relative_eq!(moved.x, rest.x + delta.x, epsilon = 1e-6);
    assert_relative_eq!(moved.y, rest.y + delta.y, epsilon = 1e-6);
    assert_relative_eq!(moved.z, rest.z + delta.z, epsilon = 1e-6);

    let velocity = sim.state().velocity(0);
    let expected = delta / DT;
    assert_relative_eq!(velocity.x, expected.x, epsilon = 1e-3);
    assert_relative_eq!(velocity.y, expected.y, epsilon = 1e-3);
    assert_relative_eq!(velocity.z, expected.z, epsilon = 1e-3);
    assert!(result.max_pin_speed > 0.0);

    // Relaxation runs before pins move, so neighbors follow one step later.
    assert_eq!(sim.state().pos_y[1], 0.0);
    sim.step(DT, &targets).unwrap();
    assert!(sim.state().pos_y[1] > 0.0);
    assert!(sim.state().pos_y[3] > 0.0);
}

#[test]
fn pins_are_never_displaced_by_gravity() {
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::default(), Affine3A::IDENTITY)
            .unwrap();

    for _ in 0..20 {
        sim.step(DT, &targets).unwrap();
        for (v, target) in sim.pins().vertices().iter().zip(&targets) {
            assert_eq!(sim.state().position(v.index()), target.position);
        }
    }

    // Edge midpoints sag between their pinned ends.
    assert!(sim.state().pos_y[1] < 0.0);
    assert!(sim.state().pos_y[3] < 0.0);
}

#[test]
fn isolated_vertex_falls_freely() {
    let rest = [Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(5.0, 5.0, 5.0)];
    let config = SheetConfig::default();
    let mut sim =
        SheetSimulator::from_rest(&[0, 1, 2], &rest, config.clone(), PinBinding::none(4)).unwrap();

    let gravity = Vec3::from(config.gravity);
    let mut p = rest[3];
    let mut v = Vec3::ZERO;
    for _ in 0..25 {
        sim.step(DT, &[]).unwrap();
        v = (v + gravity * DT) * config.damping;
        p += v * DT;
    }

    let actual = sim.state().position(3);
    assert_relative_eq!(actual.x, p.x, epsilon = 1e-6);
    assert_relative_eq!(actual.y, p.y, epsilon = 1e-5);
    assert_relative_eq!(actual.z, p.z, epsilon = 1e-6);
}

#[test]
fn default_pins_follow_world_transform() {
    let mesh = grid_3x3();
    let offset = Vec3::new(10.0, 0.0, -4.0);
    let (mut sim, targets) = SheetSimulator::with_default_pins(
        &mesh,
        SheetConfig::quiescent(),
        Affine3A::from_translation(offset),
    )
    .unwrap();

    let corner = mesh.position_vec3(0);
    assert_relative_eq!(targets[0].position.x, corner.x + offset.x, epsilon = 1e-6);
    assert_relative_eq!(targets[0].position.z, corner.z + offset.z, epsilon = 1e-6);

    sim.step(DT, &targets).unwrap();

    // Positions stay in local space.
    for (i, rest) in mesh.positions_vec3().iter().enumerate() {
        assert_eq!(sim.state().rest_position(i), *rest);
        assert!(sim.state().position(i).distance(*rest) < 1e-5);
    }
}

#[test]
fn transform_maps_targets_into_local_space() {
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::quiescent(), Affine3A::IDENTITY)
            .unwrap();

    // The host moved the sheet up by one unit; targets move with it.
    let lift = Vec3::Y;
    let lifted: Vec<PinTarget> = targets
        .iter()
        .map(|t| PinTarget::new(t.position + lift))
        .collect();
    sim.set_transform(Affine3A::from_translation(-lift));
    sim.step(DT, &lifted).unwrap();

    for v in sim.pins().vertices() {
        let i = v.index();
        assert!(sim.state().position(i).distance(mesh.position_vec3(i)) < 1e-6);
    }
}

#[test]
fn step_rejects_bad_input() {
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::default(), Affine3A::IDENTITY)
            .unwrap();

    assert!(matches!(sim.step(DT, &targets[..3]), Err(FolioError::InvalidInput(_))));
    assert!(matches!(sim.step(0.0, &targets), Err(FolioError::InvalidInput(_))));
    assert!(matches!(sim.step(f32::INFINITY, &targets), Err(FolioError::InvalidInput(_))));
    assert_eq!(sim.timestep(), 0);
}

#[test]
fn constructor_rejects_mismatched_pins() {
    let mesh = grid_3x3();
    let result = SheetSimulator::new(&mesh, SheetConfig::default(), PinBinding::none(4));
    assert!(matches!(result, Err(FolioError::InvalidConfig(_))));
}

#[test]
fn constructor_rejects_invalid_config() {
    let mesh = grid_3x3();
    let config = SheetConfig {
        solver_iterations: 0,
        ..Default::default()
    };
    let result = SheetSimulator::new(&mesh, config, PinBinding::none(9));
    assert!(matches!(result, Err(FolioError::InvalidConfig(_))));
}

#[test]
fn counters_advance_per_step() {
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::default(), Affine3A::IDENTITY)
            .unwrap();

    for _ in 0..4 {
        sim.step(0.25, &targets).unwrap();
    }
    assert_eq!(sim.timestep(), 4);
    assert_relative_eq!(sim.sim_time(), 1.0, epsilon = 1e-9);
}

#[test]
fn write_positions_copies_into_mesh() {
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::default(), Affine3A::IDENTITY)
            .unwrap();
    sim.step(DT, &targets).unwrap();

    let mut out = mesh.clone();
    sim.write_positions(&mut out).unwrap();
    assert_eq!(out.positions_vec3(), sim.positions());

    let mut wrong = quad_grid(1, 1, 1.0, 1.0);
    assert!(matches!(sim.write_positions(&mut wrong), Err(FolioError::InvalidMesh(_))));
}

// ─── Mass-Spring Tests ────────────────────────────────────────

fn spring_sim() -> (SheetSimulator, Vec<PinTarget>) {
    let config = PresetRegistry::global().get("spring_sheet").unwrap().clone();
    SheetSimulator::with_default_pins(&grid_3x3(), config, Affine3A::IDENTITY).unwrap()
}

#[test]
fn mass_spring_rest_sheet_stays_put() {
    let (mut sim, targets) = spring_sim();
    assert_eq!(sim.solver_name(), "mass_spring");

    for _ in 0..10 {
        let result = sim.step(DT, &targets).unwrap();
        assert_eq!(result.iterations, 0);
    }
    assert_eq!(sim.positions(), grid_3x3().positions_vec3());
}

#[test]
fn mass_spring_pins_hold_zero_velocity() {
    let (mut sim, mut targets) = spring_sim();
    targets[3].translate(Vec3::new(0.0, 0.2, 0.0));

    sim.step(DT, &targets).unwrap();

    assert_eq!(sim.state().position(8), targets[3].position);
    assert_eq!(sim.state().velocity(8), Vec3::ZERO);
    // Vertex 5 sits between pinned 2 and the raised corner 8.
    assert!(sim.state().pos_y[5] > 0.0);
}

#[test]
fn strategy_can_be_replaced() {
    let mesh = grid_3x3();
    let (mut sim, _) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::default(), Affine3A::IDENTITY)
            .unwrap();
    assert_eq!(sim.solver_name(), "position_based");

    sim.set_strategy(Box::new(MassSpringSolver::new())).unwrap();
    assert_eq!(sim.solver_name(), "mass_spring");
}

#[test]
fn strategy_swap_checks_spring_parameters() {
    // The position-based config never looks at the spring block, so it
    // builds fine with a massless spring.
    let mut config = SheetConfig::default();
    config.spring.mass = 0.0;
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, config, Affine3A::IDENTITY).unwrap();

    let result = sim.set_strategy(Box::new(MassSpringSolver::new()));
    assert!(matches!(result, Err(FolioError::InvalidConfig(_))));
    assert_eq!(sim.solver_name(), "position_based");

    sim.step(DT, &targets).unwrap();
    assert!(sim.state().pos_y.iter().all(|y| y.is_finite()));
}

// ─── Observer Tests ───────────────────────────────────────────

#[derive(Debug, Default)]
struct Counts {
    begins: u32,
    passes: u32,
    pins: u32,
    ends: u32,
    last_timestep: u32,
}

struct CountingObserver(Arc<Mutex<Counts>>);

impl StepObserver for CountingObserver {
    fn on_step_begin(&mut self, _timestep: u32, _sim_time: f64) {
        self.0.lock().unwrap().begins += 1;
    }

    fn on_pass(&mut self, _timestep: u32, _pass: u32, _report: &PassReport) {
        self.0.lock().unwrap().passes += 1;
    }

    fn on_pins_resolved(&mut self, _timestep: u32, report: &PinReport) {
        assert_eq!(report.count, 5);
        self.0.lock().unwrap().pins += 1;
    }

    fn on_step_end(&mut self, timestep: u32, _result: &StepResult) {
        let mut counts = self.0.lock().unwrap();
        counts.ends += 1;
        counts.last_timestep = timestep;
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn observers_see_every_phase() {
    let mesh = grid_3x3();
    let (mut sim, targets) =
        SheetSimulator::with_default_pins(&mesh, SheetConfig::default(), Affine3A::IDENTITY)
            .unwrap();
    let counts = Arc::new(Mutex::new(Counts::default()));
    sim.add_observer(Box::new(CountingObserver(counts.clone())));

    sim.step(DT, &targets).unwrap();
    sim.step(DT, &targets).unwrap();

    let counts = counts.lock().unwrap();
    assert_eq!(counts.begins, 2);
    assert_eq!(counts.passes, 6);
    assert_eq!(counts.pins, 2);
    assert_eq!(counts.ends, 2);
    assert_eq!(counts.last_timestep, 1);
}

#[test]
fn observers_can_be_taken_back() {
    let mesh = grid_3x3();
    let mut sim = SheetSimulator::new(&mesh, SheetConfig::default(), PinBinding::none(9)).unwrap();
    sim.add_observer(Box::new(CountingObserver(Arc::default())));

    let taken = sim.take_observers();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].name(), "counting");
    assert!(sim.take_observers().is_empty());
}
