//! CLI command implementations.

use std::path::PathBuf;

use clap::Args;
use glam::{Affine3A, Vec3};

use folio_debug::{JsonFrameRecorder, StateSnapshot, TelemetryHook};
use folio_mesh::generators::quad_grid;
use folio_mesh::{ConnectionGraph, TriangleMesh};
use folio_solver::{PresetRegistry, SheetConfig, SheetSimulator, SolverKind};
use folio_telemetry::events::{EventKind, SimulationEvent};
use folio_telemetry::{EventBus, JsonLinesSink, TracingSink};
use folio_types::constants::DEFAULT_DT;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Options of `folio simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Named preset (see `folio presets`).
    #[arg(short, long, default_value = "paper")]
    pub preset: String,

    /// TOML config file; replaces the preset when given.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quads along X.
    #[arg(long, default_value_t = 16)]
    pub cols: usize,

    /// Quads along Z.
    #[arg(long, default_value_t = 16)]
    pub rows: usize,

    /// Side length of the square sheet.
    #[arg(long, default_value_t = 1.0)]
    pub size: f32,

    /// Number of steps to run.
    #[arg(short = 'n', long, default_value_t = 120)]
    pub steps: u32,

    /// Fixed timestep (seconds).
    #[arg(long, default_value_t = DEFAULT_DT)]
    pub dt: f32,

    /// Total displacement "dx,dy,dz" applied to the first corner pin,
    /// spread evenly over the run.
    #[arg(long, value_parser = crate::parse_vec3)]
    pub drag: Option<Vec3>,

    /// Write the final state snapshot (bincode) here.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Record every step's positions to this JSON file.
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// Write telemetry events as JSON lines to this file.
    #[arg(long)]
    pub events: Option<PathBuf>,
}

fn load_config(args: &SimulateArgs) -> Result<SheetConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)?;
        return Ok(SheetConfig::from_toml_str(&text)?);
    }
    let registry = PresetRegistry::global();
    let config = registry.get(&args.preset).ok_or_else(|| {
        format!(
            "Unknown preset: '{}'. Available: {}",
            args.preset,
            registry.names().join(", ")
        )
    })?;
    Ok(config.clone())
}

/// Run a simulation of a procedural sheet.
pub fn simulate(args: &SimulateArgs) -> CliResult {
    let config = load_config(args)?;
    let mesh = quad_grid(args.cols, args.rows, args.size, args.size);

    println!("Folio Simulation");
    println!("────────────────");
    match &args.config {
        Some(path) => println!("Config:    {}", path.display()),
        None => println!("Preset:    {}", args.preset),
    }
    println!(
        "Sheet:     {} verts, {} tris ({}×{} quads, size {})",
        mesh.vertex_count(),
        mesh.triangle_count(),
        args.cols,
        args.rows,
        args.size
    );
    println!("Steps:     {} × {:.4}s", args.steps, args.dt);
    println!();

    let (mut sim, mut targets) =
        SheetSimulator::with_default_pins(&mesh, config, Affine3A::IDENTITY)?;

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    if let Some(path) = &args.events {
        bus.add_sink(Box::new(JsonLinesSink::create(path)?));
    }
    sim.add_observer(Box::new(TelemetryHook::with_sender(bus.sender())));

    let mut recorder = args
        .frames
        .as_ref()
        .map(|path| JsonFrameRecorder::new(path, &mesh));
    if let Some(recorder) = recorder.as_mut() {
        recorder.record(sim.timestep(), sim.state())?;
    }

    let drag_step = args.drag.map(|d| d / args.steps.max(1) as f32);
    let mut total_wall = 0.0f64;
    let mut max_correction = 0.0f32;

    for _ in 0..args.steps {
        if let (Some(delta), Some(target)) = (drag_step, targets.first_mut()) {
            target.translate(delta);
        }
        let result = sim.step(args.dt, &targets)?;
        total_wall += result.wall_time;
        max_correction = max_correction.max(result.max_correction);

        bus.emit(SimulationEvent::new(
            sim.timestep() - 1,
            EventKind::Energy {
                kinetic: sim.state().kinetic_energy(),
            },
        ));
        bus.flush();

        if let Some(recorder) = recorder.as_mut() {
            recorder.record(sim.timestep(), sim.state())?;
        }
    }
    bus.finish()?;

    let state = sim.state();
    println!("Solver:         {}", sim.solver_name());
    println!("Sim time:       {:.3}s", sim.sim_time());
    println!("Wall time:      {:.3}ms", total_wall * 1000.0);
    if args.steps > 0 {
        println!("Avg step:       {:.4}ms", total_wall * 1000.0 / args.steps as f64);
    }
    println!("Max correction: {:.6}", max_correction);
    println!("Final KE:       {:.6e}", state.kinetic_energy());
    println!("Max displace:   {:.4}", state.max_displacement());

    if !state.positions().iter().all(|p| p.is_finite()) {
        tracing::warn!("positions went non-finite; lower the stiffness or raise solver_iterations");
    }

    if let (Some(recorder), Some(path)) = (recorder.as_mut(), &args.frames) {
        recorder.finalize()?;
        println!("Frames written to: {}", path.display());
    }

    if let Some(path) = &args.snapshot {
        let snapshot = StateSnapshot::from_state(sim.timestep(), sim.sim_time(), state);
        std::fs::write(path, snapshot.to_bytes()?)?;
        println!("Snapshot written to: {}", path.display());
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CliResult {
    println!("Folio Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot = StateSnapshot::from_bytes(&data)?;

    println!("Timestep:     {}", snapshot.timestep);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Vertices:     {}", snapshot.vertex_count);

    if let Some((min_y, max_y)) = snapshot.y_range() {
        println!("Y range:      [{:.4}, {:.4}]", min_y, max_y);
    }

    let max_speed = snapshot
        .velocities
        .chunks_exact(3)
        .map(|v| Vec3::new(v[0], v[1], v[2]).length())
        .fold(0.0f32, f32::max);
    println!("Max speed:    {:.4}", max_speed);

    Ok(())
}

/// Validate a mesh or config.
pub fn validate(path: &str) -> CliResult {
    println!("Folio Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config = SheetConfig::from_toml_str(&content)?;
        println!(
            "✅ Config is valid ({:?}, {} passes).",
            config.solver, config.solver_iterations
        );
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: TriangleMesh = serde_json::from_str(&content)?;
        mesh.validate()?;
        let graph = ConnectionGraph::from_mesh(&mesh)?;
        println!(
            "✅ Mesh is valid ({} verts, {} tris, {} edges, {} shear, {} bending).",
            mesh.vertex_count(),
            mesh.triangle_count(),
            graph.structural_edge_count(),
            graph.shear_count(),
            graph.bending_count()
        );
    } else {
        return Err("Unsupported file format. Use .toml (config) or .json (mesh).".into());
    }

    Ok(())
}

/// List the built-in presets.
pub fn presets() -> CliResult {
    println!("Folio Presets");
    println!("─────────────");
    println!();

    let registry = PresetRegistry::global();
    println!(
        "{:<14} {:>10} {:>8} {:>8} {:>8} {:>7} {:>7}",
        "name", "solver", "struct", "shear", "bend", "passes", "gravity"
    );
    for name in registry.names() {
        let Some(config) = registry.get(name) else {
            continue;
        };
        let solver = match config.solver {
            SolverKind::PositionBased => "pbd",
            SolverKind::MassSpring => "spring",
        };
        println!(
            "{:<14} {:>10} {:>8.1} {:>8.1} {:>8.1} {:>7} {:>7.2}",
            name,
            solver,
            config.structural_stiffness,
            config.shear_stiffness,
            config.bending_stiffness,
            config.solver_iterations,
            config.gravity[1]
        );
    }

    Ok(())
}
