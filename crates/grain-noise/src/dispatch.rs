//! Runtime selection of a monomorphised noise evaluator.
//!
//! A [`NoiseType`] is a plain runtime value; every evaluator is a generic
//! composition of zero-sized strategy types. [`resolve`] bridges the two
//! by matching one strategy axis at a time and returning a function
//! pointer to the fully specialised batch loop. Every selector resolves:
//!
//! ```text
//! family -> lattice policy -> gradient / distance -> turbulence / combine -> dimensions
//! ```

use std::marker::PhantomData;

use grain_core::{
    Dimensions, DistanceKind, GradientKind, NoiseKind, NoiseType, Settings, VoronoiFunction,
};
use grain_math::{DomainTransform, PositionBatch};
use tracing::trace;

use crate::{
    Chebyshev, F1, F2, F2MinusF1, Gradient, Lattice1D, Lattice2D, Lattice3D, LatticePolicy,
    Noise, NoiseJob, Perlin, Periodic, Simplex, Simplex1D, Simplex2D, Simplex3D, Turbulence,
    Unbounded, Value, Voronoi1D, Voronoi2D, Voronoi3D, VoronoiCombine, VoronoiDistance, Worley,
};

/// Specialised batch loop: settings, transform, input batches, outputs.
///
/// Inputs and outputs are paired in order; the caller guarantees equal
/// lengths and valid settings.
pub type BatchFn = fn(&Settings, &DomainTransform, &[PositionBatch], &mut [[f32; 4]]);

fn run_job<N: Noise>(
    settings: &Settings,
    transform: &DomainTransform,
    positions: &[PositionBatch],
    output: &mut [[f32; 4]],
) {
    NoiseJob::<N>::new(*settings, *transform).run(positions, output);
}

/// Maps a runtime noise selector to its batch function.
///
/// Simplex noise has no periodic lattice, so its `tiling` flag is ignored
/// and the plain simplex evaluator is returned.
///
/// # Example
///
/// ```rust
/// use grain_core::{NoiseType, Settings};
/// use grain_math::{pack_points, DomainTransform};
/// use grain_noise::dispatch::resolve;
///
/// let simplex = NoiseType::preset("simplex").unwrap();
/// let batches = pack_points(&[[0.1, 0.2, 0.3], [0.7, 0.4, 0.9]]);
/// let run = |ty: &NoiseType| {
///     let mut out = vec![[0.0f32; 4]; batches.len()];
///     resolve(ty)(&Settings::default(), &DomainTransform::IDENTITY, &batches, &mut out);
///     out
/// };
/// assert_eq!(run(&simplex), run(&simplex.with_tiling(true)));
/// ```
pub fn resolve(noise_type: &NoiseType) -> BatchFn {
    let dims = noise_type.dimensions;
    let run = match (noise_type.kind, noise_type.tiling) {
        (NoiseKind::Lattice { gradient, turbulence }, false) => {
            with_gradient(gradient, turbulence, LatticeFamily::<Unbounded>::new(dims))
        }
        (NoiseKind::Lattice { gradient, turbulence }, true) => {
            with_gradient(gradient, turbulence, LatticeFamily::<Periodic>::new(dims))
        }
        (NoiseKind::Simplex { gradient, turbulence }, _) => {
            with_gradient(gradient, turbulence, SimplexFamily { dims })
        }
        (NoiseKind::Voronoi { distance, function }, false) => {
            voronoi::<Unbounded>(distance, function, dims)
        }
        (NoiseKind::Voronoi { distance, function }, true) => {
            voronoi::<Periodic>(distance, function, dims)
        }
    };
    trace!(noise_type = %noise_type, "resolved batch function");
    run
}

/// Continuation that receives the chosen gradient type.
trait GradientFamily {
    fn build<G: Gradient>(self) -> BatchFn;
}

fn with_gradient<F: GradientFamily>(gradient: GradientKind, turbulence: bool, family: F) -> BatchFn {
    match (gradient, turbulence) {
        (GradientKind::Value, false) => family.build::<Value>(),
        (GradientKind::Value, true) => family.build::<Turbulence<Value>>(),
        (GradientKind::Perlin, false) => family.build::<Perlin>(),
        (GradientKind::Perlin, true) => family.build::<Turbulence<Perlin>>(),
        (GradientKind::Simplex, false) => family.build::<Simplex>(),
        (GradientKind::Simplex, true) => family.build::<Turbulence<Simplex>>(),
    }
}

struct LatticeFamily<L> {
    dims: Dimensions,
    _policy: PhantomData<L>,
}

impl<L> LatticeFamily<L> {
    fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            _policy: PhantomData,
        }
    }
}

impl<L: LatticePolicy> GradientFamily for LatticeFamily<L> {
    fn build<G: Gradient>(self) -> BatchFn {
        match self.dims {
            Dimensions::One => run_job::<Lattice1D<L, G>>,
            Dimensions::Two => run_job::<Lattice2D<L, G>>,
            Dimensions::Three => run_job::<Lattice3D<L, G>>,
        }
    }
}

struct SimplexFamily {
    dims: Dimensions,
}

impl GradientFamily for SimplexFamily {
    fn build<G: Gradient>(self) -> BatchFn {
        match self.dims {
            Dimensions::One => run_job::<Simplex1D<G>>,
            Dimensions::Two => run_job::<Simplex2D<G>>,
            Dimensions::Three => run_job::<Simplex3D<G>>,
        }
    }
}

fn voronoi<L: LatticePolicy>(
    distance: DistanceKind,
    function: VoronoiFunction,
    dims: Dimensions,
) -> BatchFn {
    match distance {
        DistanceKind::Worley => voronoi_function::<L, Worley>(function, dims),
        DistanceKind::Chebyshev => voronoi_function::<L, Chebyshev>(function, dims),
    }
}

fn voronoi_function<L: LatticePolicy, D: VoronoiDistance>(
    function: VoronoiFunction,
    dims: Dimensions,
) -> BatchFn {
    match function {
        VoronoiFunction::F1 => voronoi_dims::<L, D, F1>(dims),
        VoronoiFunction::F2 => voronoi_dims::<L, D, F2>(dims),
        VoronoiFunction::F2MinusF1 => voronoi_dims::<L, D, F2MinusF1>(dims),
    }
}

fn voronoi_dims<L: LatticePolicy, D: VoronoiDistance, F: VoronoiCombine>(
    dims: Dimensions,
) -> BatchFn {
    match dims {
        Dimensions::One => run_job::<Voronoi1D<L, D, F>>,
        Dimensions::Two => run_job::<Voronoi2D<L, D, F>>,
        Dimensions::Three => run_job::<Voronoi3D<L, D, F>>,
    }
}
