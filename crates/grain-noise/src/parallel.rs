//! Batch evaluation entry points.
//!
//! [`NoiseField`] bundles a noise selector, settings and a domain
//! transform, validates them at the call boundary, and evaluates position
//! batches. With the `parallel` feature (on by default) batches are
//! spread across the rayon thread pool; the output is bit-identical to
//! [`NoiseField::evaluate_sequential`] regardless of thread count.
//!
//! # Example
//!
//! ```rust
//! use grain_core::{NoiseType, Settings};
//! use grain_noise::NoiseField;
//!
//! let field = NoiseField::new(NoiseType::preset("perlin").unwrap())
//!     .with_settings(Settings::default().with_octaves(3));
//!
//! let values = field.evaluate_points(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]).unwrap();
//! assert_eq!(values.len(), 2);
//! ```

use grain_core::{Error, NoiseType, Result, Settings};
use grain_math::simd::floor_to_i32x4;
use grain_math::{pack_points, DomainTransform, Position4, PositionBatch};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dispatch::{resolve, BatchFn};
use crate::HashState;

/// Batches handed to one rayon task.
#[cfg(feature = "parallel")]
const BATCHES_PER_TASK: usize = 256;

/// A configured noise field over 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseField {
    /// Family, strategies, dimensions and tiling
    pub noise_type: NoiseType,
    /// Seed and octave progression
    pub settings: Settings,
    /// Applied to every position before sampling
    pub transform: DomainTransform,
}

impl NoiseField {
    /// Creates a field with default settings and the identity transform.
    pub fn new(noise_type: NoiseType) -> Self {
        Self {
            noise_type,
            settings: Settings::default(),
            transform: DomainTransform::IDENTITY,
        }
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the domain transform.
    pub fn with_transform(mut self, transform: DomainTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Validates settings and buffer lengths, then resolves the evaluator.
    fn prepare(&self, positions: usize, outputs: usize) -> Result<BatchFn> {
        self.settings.validate()?;
        if positions != outputs {
            return Err(Error::length_mismatch(positions, outputs));
        }
        Ok(resolve(&self.noise_type))
    }

    /// Evaluates every batch into the matching output slot.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSettings`] if the settings fail validation
    /// - [`Error::LengthMismatch`] if the slices differ in length
    pub fn evaluate(&self, positions: &[PositionBatch], output: &mut [[f32; 4]]) -> Result<()> {
        let run = self.prepare(positions.len(), output.len())?;
        debug!(
            batches = positions.len(),
            noise_type = %self.noise_type,
            settings = ?self.settings,
            "Evaluating noise"
        );

        #[cfg(feature = "parallel")]
        positions
            .par_chunks(BATCHES_PER_TASK)
            .zip(output.par_chunks_mut(BATCHES_PER_TASK))
            .for_each(|(p, o)| run(&self.settings, &self.transform, p, o));

        #[cfg(not(feature = "parallel"))]
        run(&self.settings, &self.transform, positions, output);

        Ok(())
    }

    /// Same as [`evaluate`](Self::evaluate) on the calling thread only.
    pub fn evaluate_sequential(
        &self,
        positions: &[PositionBatch],
        output: &mut [[f32; 4]],
    ) -> Result<()> {
        let run = self.prepare(positions.len(), output.len())?;
        trace!(batches = positions.len(), "evaluate_sequential");
        run(&self.settings, &self.transform, positions, output);
        Ok(())
    }

    /// Evaluates loose points, one value per point.
    ///
    /// Points are packed into batches of four; the last batch is padded by
    /// repeating the final point and the padding is dropped on return.
    pub fn evaluate_points(&self, points: &[[f32; 3]]) -> Result<Vec<f32>> {
        let batches = pack_points(points);
        let mut output = vec![[0.0f32; 4]; batches.len()];
        self.evaluate(&batches, &mut output)?;
        Ok(output
            .into_iter()
            .flatten()
            .take(points.len())
            .collect())
    }
}

/// Raw avalanched hash of the integer cell holding each transformed
/// position (x, then y, then z absorbed).
///
/// Useful to inspect the hash distribution independently of any noise.
///
/// # Errors
///
/// [`Error::LengthMismatch`] if the slices differ in length.
pub fn hash_cells(
    positions: &[PositionBatch],
    seed: i32,
    transform: &DomainTransform,
    output: &mut [[u32; 4]],
) -> Result<()> {
    if positions.len() != output.len() {
        return Err(Error::length_mismatch(positions.len(), output.len()));
    }
    trace!(batches = positions.len(), seed, "hash_cells");

    let base = HashState::seed(seed);
    for (batch, out) in positions.iter().zip(output.iter_mut()) {
        let p = transform.transform(&Position4::from_batch(batch));
        *out = base
            .absorb(floor_to_i32x4(p.x))
            .absorb(floor_to_i32x4(p.y))
            .absorb(floor_to_i32x4(p.z))
            .value()
            .to_array();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grain_core::{Dimensions, GradientKind};
    use wide::i32x4;

    fn positions(n: usize) -> Vec<PositionBatch> {
        (0..n)
            .map(|i| {
                let t = i as f32 * 0.013;
                [
                    [t, 0.5 - t, t * 2.0],
                    [-t, t, 0.25],
                    [t * 3.0, 0.1, -t],
                    [0.9, t * 0.5, t],
                ]
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let field = NoiseField::new(NoiseType::preset("voronoi-worley-f2-minus-f1").unwrap())
            .with_settings(Settings::default().with_seed(99).with_octaves(3))
            .with_transform(DomainTransform::uniform_scale(2.0));
        let input = positions(1000);
        let mut a = vec![[0.0; 4]; input.len()];
        let mut b = vec![[0.0; 4]; input.len()];
        field.evaluate(&input, &mut a).unwrap();
        field.evaluate_sequential(&input, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_mismatch() {
        let field = NoiseField::new(NoiseType::preset("value").unwrap());
        let mut out = vec![[0.0; 4]; 3];
        let err = field.evaluate(&positions(4), &mut out).unwrap_err();
        assert!(err.is_length_error());
        assert!(matches!(err, Error::LengthMismatch { positions: 4, outputs: 3 }));
    }

    #[test]
    fn test_invalid_settings_rejected_before_work() {
        let field = NoiseField::new(NoiseType::preset("perlin").unwrap())
            .with_settings(Settings::default().with_frequency(0));
        let mut out = vec![[7.0; 4]; 2];
        let err = field.evaluate(&positions(2), &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { field: "frequency", .. }));
        assert_eq!(out, vec![[7.0; 4]; 2]);
    }

    #[test]
    fn test_tiling_simplex_evaluates_as_plain() {
        let points = [[0.1, 0.2, 0.3], [0.7, 0.4, 0.9]];
        let plain = NoiseField::new(NoiseType::simplex(GradientKind::Perlin));
        let tiled = NoiseField::new(NoiseType::simplex(GradientKind::Perlin).with_tiling(true));
        let expected = plain.evaluate_points(&points).unwrap();
        assert_eq!(tiled.evaluate_points(&points).unwrap(), expected);
        assert!(expected.iter().all(|v| v.is_finite() && *v != 0.0));
    }

    #[test]
    fn test_empty_input() {
        let field = NoiseField::new(NoiseType::preset("simplex").unwrap());
        assert!(field.evaluate_points(&[]).unwrap().is_empty());
        field.evaluate(&[], &mut []).unwrap();
    }

    #[test]
    fn test_evaluate_points_matches_batches() {
        let field = NoiseField::new(
            NoiseType::preset("perlin").unwrap().with_dimensions(Dimensions::Two),
        );
        let points: Vec<[f32; 3]> = (0..7).map(|i| [i as f32 * 0.07, 0.0, 0.31]).collect();
        let values = field.evaluate_points(&points).unwrap();
        assert_eq!(values.len(), 7);

        let mut out = vec![[0.0; 4]; 2];
        field.evaluate_sequential(&pack_points(&points), &mut out).unwrap();
        let flat: Vec<f32> = out.into_iter().flatten().collect();
        assert_eq!(values, flat[..7]);
    }

    #[test]
    fn test_hash_cells() {
        let batch = [[0.5, 1.5, -0.5], [2.0, 0.0, 0.0], [0.0, 0.0, 0.0], [-1.2, 3.9, 7.0]];
        let mut out = [[0u32; 4]];
        hash_cells(&[batch], 5, &DomainTransform::IDENTITY, &mut out).unwrap();
        let expected = HashState::seed(5)
            .absorb(i32x4::from([0, 2, 0, -2]))
            .absorb(i32x4::from([1, 0, 0, 3]))
            .absorb(i32x4::from([-1, 0, 0, 7]))
            .value()
            .to_array();
        assert_eq!(out[0], expected);
        assert!(hash_cells(&[batch], 5, &DomainTransform::IDENTITY, &mut []).is_err());
    }
}
