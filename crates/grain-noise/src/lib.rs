//! # grain-noise
//!
//! Deterministic procedural noise evaluated four samples at a time.
//!
//! Every evaluator is a composition of zero-sized strategy types,
//! resolved at compile time:
//!
//! - [`hash`] - Lane-parallel integer hash seeding every pseudo-random choice
//! - [`lattice`] - Cell addressing ([`Unbounded`], [`Periodic`]) and
//!   lattice-interpolated noise
//! - [`gradient`] - Corner contributions ([`Value`], [`Perlin`], [`Simplex`],
//!   [`Turbulence`])
//! - [`simplex`] - Simplex-grid noise
//! - [`voronoi`] - Cellular noise ([`Worley`], [`Chebyshev`]; [`F1`], [`F2`],
//!   [`F2MinusF1`])
//! - [`fractal`] - Octave accumulation and the batch job driver
//! - [`dispatch`] - Runtime [`NoiseType`](grain_core::NoiseType) to evaluator
//!
//! # Example
//!
//! Compile-time composition:
//!
//! ```rust
//! use grain_core::Settings;
//! use grain_math::Position4;
//! use grain_noise::{fractal4, Lattice3D, Perlin, Unbounded};
//!
//! let p = Position4::splat([0.3, 0.7, 0.1]);
//! let v = fractal4::<Lattice3D<Unbounded, Perlin>>(&p, &Settings::default());
//! assert!(v.to_array().iter().all(|x| x.abs() <= 1.5));
//! ```
//!
//! Runtime selection:
//!
//! ```rust
//! use grain_noise::NoiseField;
//!
//! let field = NoiseField::new("voronoi-worley-f1".parse().unwrap());
//! let mut out = [[0.0; 4]];
//! field.evaluate(&[[[0.2, 0.4, 0.6]; 4]], &mut out).unwrap();
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Spread batches across the rayon thread pool
//!
//! # Dependencies
//!
//! - [`wide`] - 4-lane SIMD types
//! - `rayon` - Parallel batch evaluation
//! - [`tracing`] - Evaluation logging

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dispatch;
pub mod fractal;
pub mod gradient;
pub mod hash;
pub mod lattice;
pub mod parallel;
pub mod simplex;
pub mod voronoi;

pub use dispatch::{resolve, BatchFn};
pub use fractal::{fractal4, Noise, NoiseJob};
pub use gradient::{Gradient, Perlin, Simplex, Turbulence, Value};
pub use hash::HashState;
pub use lattice::{Lattice1D, Lattice2D, Lattice3D, LatticePolicy, LatticeSpan, Periodic, Unbounded};
pub use parallel::{hash_cells, NoiseField};
pub use simplex::{Simplex1D, Simplex2D, Simplex3D};
pub use voronoi::{
    Chebyshev, F1, F2, F2MinusF1, Voronoi1D, Voronoi2D, Voronoi3D, VoronoiCombine,
    VoronoiDistance, VoronoiMinima, Worley,
};
