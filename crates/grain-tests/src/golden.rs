//! Golden digest tests.
//!
//! Outputs are quantised to a fixed number of decimals and hashed with
//! SHA-256, so a whole grid is pinned by one string. Two kinds of check:
//!
//! 1. Exact references: raw cell hashes and value noise sampled on lattice
//!    points, where the result is a hash window with no interpolation.
//! 2. Self consistency: every preset gives the same digest sequentially,
//!    in parallel, repeated, and under different thread counts.

use grain_core::{Dimensions, NoiseType, Settings, PRESET_NAMES};
use grain_math::{pack_points, DomainTransform};
use grain_noise::{hash_cells, NoiseField};
use sha2::{Digest, Sha256};

/// Decimal places kept before hashing floats.
const HASH_PRECISION: i32 = 5;

const GOLDEN_CELLS_SEED_1337: &str =
    "f2258d4fd2aeefa28d82e7bf430b1a345802ac26e8d98d48d40edb6f78c7d2bb";
const GOLDEN_VALUE_1D_SEED_42: &str =
    "e1078f74406a37caad2e690c85ebc78299451d356003bd3b8799278b936e7d50";
const GOLDEN_VALUE_3D_SEED_NEG_7: &str =
    "6fadae8c7ed3a10815f0f9f2c857ca4d44ff46a66cd4d0a71615eef6fc48af3e";

// ---------------------------------------------------------------------------
// Hash utilities
// ---------------------------------------------------------------------------

/// SHA-256 of floats rounded to [`HASH_PRECISION`] decimals.
fn compute_hash_f32(data: &[f32]) -> String {
    let factor = 10f64.powi(HASH_PRECISION);
    let mut hasher = Sha256::new();
    for &v in data {
        let quantized = (v as f64 * factor).round() as i64;
        hasher.update(quantized.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

/// SHA-256 of little-endian `u32`s.
fn compute_hash_u32(data: &[u32]) -> String {
    let mut hasher = Sha256::new();
    for &v in data {
        hasher.update(v.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// `n^3` points at cell centres of the unit cube, x fastest.
fn cube_centres(n: usize) -> Vec<[f32; 3]> {
    let c = |i: usize| (i as f32 + 0.5) / n as f32;
    let mut points = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                points.push([c(x), c(y), c(z)]);
            }
        }
    }
    points
}

/// `n x n` grid on the x/z plane spanning `[-extent, extent)`.
fn plane(n: usize, extent: f32) -> Vec<[f32; 3]> {
    let step = 2.0 * extent / n as f32;
    (0..n * n)
        .map(|i| {
            let (x, z) = (i % n, i / n);
            [-extent + x as f32 * step, 0.37, -extent + z as f32 * step]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Exact references
// ---------------------------------------------------------------------------

#[test]
fn golden_cell_hashes() {
    let points: Vec<[f32; 3]> = {
        // y slices, then z rows, x fastest
        let mut p = Vec::new();
        for y in 0..8 {
            for z in 0..8 {
                for x in 0..8 {
                    p.push([(x as f32 + 0.5) / 8.0, (y as f32 + 0.5) / 8.0, (z as f32 + 0.5) / 8.0]);
                }
            }
        }
        p
    };
    let batches = pack_points(&points);
    let mut output = vec![[0u32; 4]; batches.len()];
    hash_cells(&batches, 1337, &DomainTransform::uniform_scale(8.0), &mut output).unwrap();
    let hashes: Vec<u32> = output.into_iter().flatten().collect();
    assert_eq!(compute_hash_u32(&hashes), GOLDEN_CELLS_SEED_1337);
}

#[test]
fn golden_value_1d_lattice_points() {
    let field = NoiseField::new(NoiseType::preset("value").unwrap().with_dimensions(Dimensions::One))
        .with_settings(Settings::default().with_seed(42).with_frequency(1));
    let points: Vec<[f32; 3]> = (-16..16).map(|x| [x as f32, 0.0, 0.0]).collect();
    let values = field.evaluate_points(&points).unwrap();
    assert_eq!(&values[..4], &[0.8515625, 0.8359375, -0.8203125, -0.3203125]);
    assert_eq!(compute_hash_f32(&values), GOLDEN_VALUE_1D_SEED_42);
}

#[test]
fn golden_value_3d_lattice_points() {
    let field = NoiseField::new(NoiseType::preset("value").unwrap())
        .with_settings(Settings::default().with_seed(-7).with_frequency(1));
    let points: Vec<[f32; 3]> = cube_centres(4)
        .into_iter()
        .map(|p| p.map(|c| (c * 4.0).floor()))
        .collect();
    let values = field.evaluate_points(&points).unwrap();
    assert_eq!(compute_hash_f32(&values), GOLDEN_VALUE_3D_SEED_NEG_7);
}

// ---------------------------------------------------------------------------
// Self consistency
// ---------------------------------------------------------------------------

fn digest(field: &NoiseField, points: &[[f32; 3]], parallel: bool) -> String {
    let batches = pack_points(points);
    let mut output = vec![[0.0f32; 4]; batches.len()];
    if parallel {
        field.evaluate(&batches, &mut output).unwrap();
    } else {
        field.evaluate_sequential(&batches, &mut output).unwrap();
    }
    let flat: Vec<f32> = output.into_iter().flatten().collect();
    compute_hash_f32(&flat)
}

#[test]
fn golden_presets_deterministic() {
    let points = plane(48, 3.0);
    let settings = Settings::default()
        .with_seed(2024)
        .with_frequency(2)
        .with_octaves(3)
        .with_persistence(0.6);

    for name in PRESET_NAMES {
        for dims in [Dimensions::One, Dimensions::Two, Dimensions::Three] {
            let field = NoiseField::new(NoiseType::preset(name).unwrap().with_dimensions(dims))
                .with_settings(settings)
                .with_transform(DomainTransform::uniform_scale(1.5));
            let sequential = digest(&field, &points, false);
            assert_eq!(digest(&field, &points, true), sequential, "{name} {dims}");
            assert_eq!(digest(&field, &points, true), sequential, "{name} {dims} repeat");
        }
    }
}

#[test]
fn golden_thread_count_independent() {
    let points = cube_centres(20);
    let field = NoiseField::new(NoiseType::preset("voronoi-worley-f2-minus-f1").unwrap())
        .with_settings(Settings::default().with_octaves(2))
        .with_transform(DomainTransform::uniform_scale(3.0));

    let digests: Vec<String> = [1, 2, 5]
        .into_iter()
        .map(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| digest(&field, &points, true))
        })
        .collect();
    assert!(digests.windows(2).all(|w| w[0] == w[1]), "{digests:?}");
}

#[test]
fn golden_seed_sensitivity() {
    let points = plane(16, 1.0);
    let base = NoiseField::new(NoiseType::preset("perlin").unwrap());
    let a = digest(&base.with_settings(Settings::default().with_seed(1)), &points, true);
    let b = digest(&base.with_settings(Settings::default().with_seed(2)), &points, true);
    assert_ne!(a, b);
}
