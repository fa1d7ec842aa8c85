//! Cellular (Voronoi) noise.
//!
//! Every lattice cell holds jittered feature points derived from its hash.
//! A sample scans its own cell and the direct neighbours (3, 9 or 27
//! cells) and tracks the nearest two distances in [`VoronoiMinima`].
//!
//! Three strategies compose a cellular noise:
//!
//! - [`LatticePolicy`] - Cell addressing, with neighbour indices wrapped
//!   by [`LatticePolicy::validate_step`]
//! - [`VoronoiDistance`] - Metric ([`Worley`], [`Chebyshev`])
//! - [`VoronoiCombine`] - Reduction ([`F1`], [`F2`], [`F2MinusF1`])
//!
//! Feature points per cell:
//!
//! | dims | points | hash bits                                  |
//! |------|--------|--------------------------------------------|
//! | 1    | 1      | channel A                                  |
//! | 2    | 2      | (A, B) and (C, D)                          |
//! | 3    | 2      | 5-bit windows at 0/5/10 and 15/20/25       |

mod distance;
mod function;

pub use distance::*;
pub use function::*;

use std::marker::PhantomData;

use grain_math::simd::select_f32x4;
use grain_math::Position4;
use wide::{f32x4, i32x4, CmpLt};

use crate::{HashState, LatticePolicy, Noise};

/// Distance sentinel, larger than any in-range candidate.
pub const MINIMA_SENTINEL: f32 = 2.0;

/// Running nearest (`f1`) and second nearest (`f2`) distances.
///
/// `f1 <= f2` holds after every [`update`](Self::update).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiMinima {
    /// Nearest distance
    pub f1: f32x4,
    /// Second nearest distance
    pub f2: f32x4,
}

impl Default for VoronoiMinima {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiMinima {
    /// Both minima at the sentinel.
    #[inline]
    pub fn new() -> Self {
        Self {
            f1: f32x4::splat(MINIMA_SENTINEL),
            f2: f32x4::splat(MINIMA_SENTINEL),
        }
    }

    /// Folds one candidate distance per lane into the minima.
    #[inline]
    pub fn update(self, distance: f32x4) -> Self {
        let new_min = distance.cmp_lt(self.f1);
        let below_second = distance.cmp_lt(self.f2);
        Self {
            f1: select_f32x4(new_min, distance, self.f1),
            f2: select_f32x4(
                new_min,
                self.f1,
                select_f32x4(below_second, distance, self.f2),
            ),
        }
    }
}

/// Cellular noise along x.
#[derive(Debug, Clone, Copy, Default)]
pub struct Voronoi1D<L, D, F>(PhantomData<(L, D, F)>);

/// Cellular noise on the x/z plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Voronoi2D<L, D, F>(PhantomData<(L, D, F)>);

/// Cellular noise in x/y/z.
#[derive(Debug, Clone, Copy, Default)]
pub struct Voronoi3D<L, D, F>(PhantomData<(L, D, F)>);

const NEIGHBOURS: [i32; 3] = [-1, 0, 1];

impl<L, D, F> Noise for Voronoi1D<L, D, F>
where
    L: LatticePolicy,
    D: VoronoiDistance,
    F: VoronoiCombine,
{
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = L::span(positions.x, frequency);
        let mut minima = VoronoiMinima::new();
        for u in NEIGHBOURS {
            let h = hash.absorb(L::validate_step(x.p0 + i32x4::splat(u), frequency));
            let offset = f32x4::splat(u as f32) - x.g0;
            minima = minima.update(D::distance_1d(h.channel_a() + offset));
        }
        F::evaluate(D::finalize_1d(minima))
    }
}

impl<L, D, F> Noise for Voronoi2D<L, D, F>
where
    L: LatticePolicy,
    D: VoronoiDistance,
    F: VoronoiCombine,
{
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = L::span(positions.x, frequency);
        let z = L::span(positions.z, frequency);
        let mut minima = VoronoiMinima::new();
        for u in NEIGHBOURS {
            let hx = hash.absorb(L::validate_step(x.p0 + i32x4::splat(u), frequency));
            let x_offset = f32x4::splat(u as f32) - x.g0;
            for v in NEIGHBOURS {
                let h = hx.absorb(L::validate_step(z.p0 + i32x4::splat(v), frequency));
                let z_offset = f32x4::splat(v as f32) - z.g0;
                minima = minima
                    .update(D::distance_2d(h.channel_a() + x_offset, h.channel_b() + z_offset))
                    .update(D::distance_2d(h.channel_c() + x_offset, h.channel_d() + z_offset));
            }
        }
        F::evaluate(D::finalize_2d(minima))
    }
}

impl<L, D, F> Noise for Voronoi3D<L, D, F>
where
    L: LatticePolicy,
    D: VoronoiDistance,
    F: VoronoiCombine,
{
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = L::span(positions.x, frequency);
        let y = L::span(positions.y, frequency);
        let z = L::span(positions.z, frequency);
        let mut minima = VoronoiMinima::new();
        for u in NEIGHBOURS {
            let hx = hash.absorb(L::validate_step(x.p0 + i32x4::splat(u), frequency));
            let x_offset = f32x4::splat(u as f32) - x.g0;
            for v in NEIGHBOURS {
                let hy = hx.absorb(L::validate_step(y.p0 + i32x4::splat(v), frequency));
                let y_offset = f32x4::splat(v as f32) - y.g0;
                for w in NEIGHBOURS {
                    let h = hy.absorb(L::validate_step(z.p0 + i32x4::splat(w), frequency));
                    let z_offset = f32x4::splat(w as f32) - z.g0;
                    minima = minima
                        .update(D::distance_3d(
                            h.unit_float(0, 5) + x_offset,
                            h.unit_float(5, 5) + y_offset,
                            h.unit_float(10, 5) + z_offset,
                        ))
                        .update(D::distance_3d(
                            h.unit_float(15, 5) + x_offset,
                            h.unit_float(20, 5) + y_offset,
                            h.unit_float(25, 5) + z_offset,
                        ));
                }
            }
        }
        F::evaluate(D::finalize_3d(minima))
    }
}
