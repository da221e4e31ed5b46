//! Folio CLI: run, inspect, and validate sheet simulations.

use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Folio: real-time paper and cloth sheet simulator")]
struct Cli {
    /// Log verbosity: -v for debug, -vv for trace. `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a corner-and-center pinned sheet.
    Simulate(commands::SimulateArgs),

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a config (.toml) or mesh (.json) file.
    Validate {
        /// Path to config or mesh file.
        path: String,
    },

    /// List the built-in configuration presets.
    Presets,
}

/// Parses `"x,y,z"` into a vector.
pub(crate) fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated numbers, got '{s}'"));
    }
    let mut v = [0.0f32; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("'{part}' is not a number: {e}"))?;
    }
    Ok(Vec3::from(v))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate(&args),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Presets => commands::presets(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
