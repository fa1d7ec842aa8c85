//! Fractal octave accumulation and the per-batch job driver.
//!
//! Each octave samples the same noise at a higher frequency and a lower
//! amplitude, with a distinct hash derived from the seed and the octave
//! index. The sum is divided by the total amplitude, so a single octave
//! returns the raw noise value and extra octaves stay inside the range of
//! the first.
//!
//! ```text
//! octave o:  frequency = f * lacunarity^o
//!            amplitude = persistence^o
//!            hash      = seed(s).offset(o)
//! ```

use std::marker::PhantomData;

use grain_core::Settings;
use grain_math::{DomainTransform, Position4, PositionBatch};
use wide::f32x4;

use crate::HashState;

/// A noise family evaluated for four positions at once.
pub trait Noise: 'static {
    /// Samples one octave at `frequency` with the octave's hash state.
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4;
}

/// Fractal sum of `N` over `settings.octaves` octaves.
///
/// `settings` must be valid (see [`Settings::validate`]); with zero
/// octaves the result is NaN.
#[inline]
pub fn fractal4<N: Noise>(positions: &Position4, settings: &Settings) -> f32x4 {
    let hash = HashState::seed(settings.seed);
    let mut sum = f32x4::splat(0.0);
    let mut amplitude = 1.0f32;
    let mut amplitude_sum = 0.0f32;
    let mut frequency = settings.frequency;

    for octave in 0..settings.octaves {
        sum += f32x4::splat(amplitude) * N::sample4(positions, hash.offset(octave), frequency);
        amplitude_sum += amplitude;
        frequency = frequency.wrapping_mul(settings.lacunarity);
        amplitude *= settings.persistence;
    }
    sum / f32x4::splat(amplitude_sum)
}

/// Evaluates one noise family over position batches.
///
/// # Example
///
/// ```rust
/// use grain_core::Settings;
/// use grain_math::DomainTransform;
/// use grain_noise::{Lattice3D, NoiseJob, Perlin, Unbounded};
///
/// let job = NoiseJob::<Lattice3D<Unbounded, Perlin>>::new(
///     Settings::default(),
///     DomainTransform::uniform_scale(8.0),
/// );
/// let mut out = [[0.0; 4]; 2];
/// job.run(&[[[0.1, 0.2, 0.3]; 4], [[0.5, 0.5, 0.5]; 4]], &mut out);
/// ```
pub struct NoiseJob<N> {
    settings: Settings,
    transform: DomainTransform,
    _noise: PhantomData<fn() -> N>,
}

impl<N: Noise> NoiseJob<N> {
    /// Creates a job. Settings are assumed validated.
    pub fn new(settings: Settings, transform: DomainTransform) -> Self {
        Self {
            settings,
            transform,
            _noise: PhantomData,
        }
    }

    /// Transforms and evaluates a single batch.
    #[inline]
    pub fn execute(&self, batch: &PositionBatch) -> [f32; 4] {
        let positions = self.transform.transform(&Position4::from_batch(batch));
        fractal4::<N>(&positions, &self.settings).to_array()
    }

    /// Evaluates batches in order, pairing inputs with outputs.
    ///
    /// Extra entries on either side are left untouched.
    pub fn run(&self, positions: &[PositionBatch], output: &mut [[f32; 4]]) {
        for (batch, out) in positions.iter().zip(output.iter_mut()) {
            *out = self.execute(batch);
        }
    }
}
