//! CLI command implementations

pub mod hash;
pub mod list;
pub mod sample;

use crate::config::NoiseConfig;
use crate::{GridArgs, NoiseArgs};
use anyhow::Result;
use grain_core::{NoiseType, Settings};
use grain_math::Trs;
use tracing::debug;

/// Noise used when neither flags nor config choose one.
const DEFAULT_NOISE: &str = "perlin";

/// Noise selection after merging config file and flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub noise_type: NoiseType,
    pub settings: Settings,
    pub domain: Trs,
}

/// Merges `--config` with the command line; flags win.
pub fn resolve_noise(args: &NoiseArgs) -> Result<Resolved> {
    let config = NoiseConfig::load_optional(args.config.as_deref())?;

    let mut noise_type = match args.noise {
        Some(noise_type) => noise_type,
        None => match config.noise_type()? {
            Some(noise_type) => noise_type,
            None => DEFAULT_NOISE.parse()?,
        },
    };
    if let Some(dimensions) = args.dimensions {
        noise_type = noise_type.with_dimensions(dimensions);
    }
    if args.tiling {
        noise_type = noise_type.with_tiling(true);
    }
    if args.turbulence {
        noise_type = noise_type.with_turbulence(true);
    }

    let mut settings = config.settings.unwrap_or_default();
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(frequency) = args.frequency {
        settings.frequency = frequency;
    }
    if let Some(octaves) = args.octaves {
        settings.octaves = octaves;
    }
    if let Some(lacunarity) = args.lacunarity {
        settings.lacunarity = lacunarity;
    }
    if let Some(persistence) = args.persistence {
        settings.persistence = persistence;
    }

    let mut domain = config.domain.unwrap_or_default();
    if let Some(scale) = args.scale {
        domain.scale = [scale; 3];
    }

    debug!(noise_type = %noise_type, ?settings, ?domain, "Resolved noise");
    Ok(Resolved {
        noise_type,
        settings,
        domain,
    })
}

/// Cell-centred grid over the x/z unit square, or the unit cube with
/// `--volume`.
///
/// Points run x fastest, then z, then y, so a volume is a stack of
/// horizontal slices.
pub fn grid_points(grid: &GridArgs) -> Vec<[f32; 3]> {
    let n = grid.resolution as usize;
    let step = 1.0 / n as f32;
    let coord = |i: usize| (i as f32 + 0.5) * step;
    let slices: Vec<f32> = if grid.volume {
        (0..n).map(coord).collect()
    } else {
        vec![0.0]
    };

    let mut points = Vec::with_capacity(slices.len() * n * n);
    for &y in &slices {
        for z in 0..n {
            for x in 0..n {
                points.push([coord(x), y, coord(z)]);
            }
        }
    }
    points
}
