//! Hash command
//!
//! Prints the raw hash of the integer cell under each grid point, one
//! row per z line and one block per y slice.

use crate::config::NoiseConfig;
use crate::HashArgs;
use anyhow::Result;
use grain_math::{pack_points, DomainTransform, Trs};
use grain_noise::hash_cells;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Domain scale when neither flags nor config set one.
const DEFAULT_SCALE: f32 = 8.0;

pub fn run(args: HashArgs, verbose: u8) -> Result<()> {
    trace!(resolution = args.grid.resolution, "hash::run");

    let config = NoiseConfig::load_optional(args.config.as_deref())?;
    let seed = args
        .seed
        .or(config.settings.map(|s| s.seed))
        .unwrap_or_default();
    let mut domain = config.domain.unwrap_or(Trs {
        scale: [DEFAULT_SCALE; 3],
        ..Trs::default()
    });
    if let Some(scale) = args.scale {
        domain.scale = [scale; 3];
    }

    let points = super::grid_points(&args.grid);
    let hashes = cell_hashes(&points, seed, &DomainTransform::from_trs(&domain))?;
    info!(seed, cells = hashes.len(), "Hashed cells");

    if verbose > 0 {
        println!("seed: {seed}, scale: {:?}", domain.scale);
    }
    let row_len = args.grid.resolution as usize;
    for (i, row) in hashes.chunks(row_len).enumerate() {
        if i > 0 && i % row_len == 0 {
            println!();
        }
        let line: Vec<String> = row.iter().map(|h| format!("{h:08x}")).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

/// One hash per point, in point order.
fn cell_hashes(points: &[[f32; 3]], seed: i32, transform: &DomainTransform) -> Result<Vec<u32>> {
    let batches = pack_points(points);
    let mut output = vec![[0u32; 4]; batches.len()];
    hash_cells(&batches, seed, transform, &mut output)?;
    Ok(output.into_iter().flatten().take(points.len()).collect())
}
