//! grain - Deterministic procedural noise sampler
//!
//! Evaluates lattice, simplex and cellular noise over regular grids for
//! inspection and export.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use grain_core::{Dimensions, NoiseType};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "grain")]
#[command(author, version, about = "Deterministic procedural noise sampler")]
#[command(long_about = "
Samples deterministic procedural noise over a regular grid of the unit
square (x/z plane) or unit cube.

Examples:
  grain list                                  # Show noise presets
  grain list --template voronoi-worley-f1     # Print a YAML config to start from
  grain sample -n perlin -f 8 --octaves 4     # Print min/max/mean
  grain sample -n simplex-turbulence -r 512 -o out.raw
  grain sample -c cells.yaml --seed 7 --volume -r 64 -o cells.raw
  grain hash -r 8 --scale 4                   # Cell hashes as a hex grid
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List noise presets
    #[command(visible_alias = "l")]
    List(ListArgs),

    /// Evaluate noise over a grid
    #[command(visible_alias = "s")]
    Sample(SampleArgs),

    /// Print raw lattice cell hashes over a grid
    Hash(HashArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Print a full YAML config for this preset instead of the list
    #[arg(short, long)]
    template: Option<NoiseType>,
}

/// Sample grid shared by `sample` and `hash`.
#[derive(Args, Clone, Copy)]
struct GridArgs {
    /// Samples per axis
    #[arg(short, long, default_value = "64", value_parser = clap::value_parser!(u32).range(1..=4096))]
    resolution: u32,

    /// Sample the unit cube instead of the x/z unit square
    #[arg(long)]
    volume: bool,
}

/// Noise selection; flags override the config file.
#[derive(Args, Clone)]
struct NoiseArgs {
    /// YAML config with `noise`, `settings` and `domain` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Noise preset (see `grain list`)
    #[arg(short, long)]
    noise: Option<NoiseType>,

    /// Sampled axes: 1, 2 or 3
    #[arg(short, long)]
    dimensions: Option<Dimensions>,

    /// Periodic lattice addressing
    #[arg(long)]
    tiling: bool,

    /// Fold lattice and simplex output through its absolute value
    #[arg(long)]
    turbulence: bool,

    /// Hash seed
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i32>,

    /// Lattice cells per domain unit
    #[arg(short, long)]
    frequency: Option<i32>,

    /// Octave count
    #[arg(long)]
    octaves: Option<i32>,

    /// Frequency multiplier per octave
    #[arg(long)]
    lacunarity: Option<i32>,

    /// Amplitude multiplier per octave
    #[arg(long)]
    persistence: Option<f32>,

    /// Uniform domain scale, replacing the config's scale
    #[arg(long)]
    scale: Option<f32>,
}

#[derive(Args)]
struct SampleArgs {
    #[command(flatten)]
    noise: NoiseArgs,

    #[command(flatten)]
    grid: GridArgs,

    /// Write little-endian f32 values here instead of printing statistics
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct HashArgs {
    /// YAML config; only its seed and domain are used
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hash seed
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i32>,

    /// Uniform domain scale (default 8 without a config domain)
    #[arg(long)]
    scale: Option<f32>,

    #[command(flatten)]
    grid: GridArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::List(args) => commands::list::run(args, cli.verbose),
        Commands::Sample(args) => commands::sample::run(args, cli.verbose),
        Commands::Hash(args) => commands::hash::run(args, cli.verbose),
    }
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample_flags() {
        let cli = Cli::try_parse_from([
            "grain", "-vv", "sample", "-n", "voronoi-chebyshev-f2", "-d", "2", "--tiling", "-s",
            "-4", "--octaves", "3", "-r", "16",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.noise.seed, Some(-4));
        assert_eq!(args.noise.dimensions, Some(Dimensions::Two));
        assert!(args.noise.tiling);
        assert_eq!(args.grid.resolution, 16);
        assert_eq!(args.noise.noise.map(|t| t.kind_name()).as_deref(), Some("voronoi-chebyshev-f2"));
    }

    #[test]
    fn test_rejects_unknown_preset_and_zero_resolution() {
        assert!(Cli::try_parse_from(["grain", "sample", "-n", "marble"]).is_err());
        assert!(Cli::try_parse_from(["grain", "hash", "-r", "0"]).is_err());
    }
}
