//! Sample command

use crate::SampleArgs;
use anyhow::{Context, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use grain_math::DomainTransform;
use grain_noise::NoiseField;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: SampleArgs, verbose: u8) -> Result<()> {
    trace!(resolution = args.grid.resolution, volume = args.grid.volume, "sample::run");

    let resolved = super::resolve_noise(&args.noise)?;
    let points = super::grid_points(&args.grid);
    let field = NoiseField::new(resolved.noise_type)
        .with_settings(resolved.settings)
        .with_transform(DomainTransform::from_trs(&resolved.domain));

    info!(noise_type = %resolved.noise_type, points = points.len(), "Sampling");
    let start = Instant::now();
    let values = field
        .evaluate_points(&points)
        .with_context(|| format!("Failed to evaluate {}", resolved.noise_type))?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Evaluated");

    match &args.output {
        Some(path) => {
            write_raw(path, &values)?;
            info!(path = %path.display(), values = values.len(), "Wrote samples");
            if verbose > 0 {
                println!("Wrote {} samples to {}", values.len(), path.display());
            }
        }
        None => {
            let stats = Stats::compute(&values).context("No samples")?;
            println!("noise: {}", resolved.noise_type);
            println!("samples: {}", values.len());
            println!("min: {:.6}", stats.min);
            println!("max: {:.6}", stats.max);
            println!("mean: {:.6}", stats.mean);
        }
    }
    Ok(())
}

/// Writes values as consecutive little-endian f32.
fn write_raw(path: &Path, values: &[f32]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for &value in values {
        writer.write_f32::<LittleEndian>(value)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write: {}", path.display()))
}

/// Summary of a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stats {
    min: f32,
    max: f32,
    mean: f64,
}

impl Stats {
    fn compute(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let (min, max, sum) = values.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v as f64),
        );
        Some(Self {
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }
}
