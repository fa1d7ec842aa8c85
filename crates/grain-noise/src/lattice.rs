//! Lattice addressing and lattice-interpolated noise.
//!
//! # Addressing
//!
//! A [`LatticePolicy`] maps a coordinate at a frequency onto the two
//! enclosing integer cells and the fractional offsets to each:
//!
//! ```text
//!        p0                p1
//!  ------+--------x--------+------
//!        |<- g0 ->|<- g1 ->|       g1 = g0 - 1
//! ```
//!
//! [`Unbounded`] uses the cells as-is. [`Periodic`] wraps cell indices
//! modulo the frequency so the pattern repeats once per domain unit.
//!
//! # Noise
//!
//! [`Lattice1D`], [`Lattice2D`] and [`Lattice3D`] hash every corner of
//! the enclosing cell (x, then y, then z), evaluate a [`Gradient`] at
//! each, and blend with smootherstep weights innermost axis first. The 2D
//! variant samples the horizontal x/z plane.

use std::marker::PhantomData;

use grain_math::simd::{
    floor_to_i32x4, lerp_x4, select_f32x4, select_i32x4_by_int, smootherstep_x4,
};
use grain_math::Position4;
use wide::{f32x4, i32x4, CmpEq, CmpGe, CmpLt};

use crate::{Gradient, HashState, Noise};

/// Per-axis lattice address of four coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSpan {
    /// Low cell index
    pub p0: i32x4,
    /// High cell index
    pub p1: i32x4,
    /// Offset from the low cell, in `[0, 1)`
    pub g0: f32x4,
    /// Offset from the high cell, `g0 - 1`
    pub g1: f32x4,
    /// Smootherstep of `g0`
    pub t: f32x4,
}

/// Strategy that turns coordinates into lattice cells.
pub trait LatticePolicy: 'static {
    /// Addresses `coordinate * frequency`.
    fn span(coordinate: f32x4, frequency: i32) -> LatticeSpan;

    /// Brings an index that stepped one cell past the lattice back inside.
    fn validate_step(index: i32x4, frequency: i32) -> i32x4;
}

/// Infinite lattice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

/// Lattice that repeats every `frequency` cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct Periodic;

impl LatticePolicy for Unbounded {
    #[inline]
    fn span(coordinate: f32x4, frequency: i32) -> LatticeSpan {
        let c = coordinate * f32x4::splat(frequency as f32);
        let cell = c.floor();
        let p0 = floor_to_i32x4(cell);
        let g0 = c - cell;
        LatticeSpan {
            p0,
            p1: p0 + i32x4::splat(1),
            g0,
            g1: g0 - f32x4::splat(1.0),
            t: smootherstep_x4(g0),
        }
    }

    #[inline]
    fn validate_step(index: i32x4, _frequency: i32) -> i32x4 {
        index
    }
}

impl LatticePolicy for Periodic {
    #[inline]
    fn span(coordinate: f32x4, frequency: i32) -> LatticeSpan {
        let f = f32x4::splat(frequency as f32);
        let c = coordinate * f;
        let cell = c.floor();
        let g0 = c - cell;

        // Cells are integral floats, so the float remainder is exact.
        let mut wrapped = cell - (cell / f).floor() * f;
        wrapped = select_f32x4(wrapped.cmp_lt(f32x4::splat(0.0)), wrapped + f, wrapped);
        wrapped = select_f32x4(wrapped.cmp_ge(f), wrapped - f, wrapped);

        let p0 = floor_to_i32x4(wrapped);
        let p1 = p0 + i32x4::splat(1);
        let p1 = select_i32x4_by_int(p1.cmp_eq(i32x4::splat(frequency)), i32x4::splat(0), p1);
        LatticeSpan {
            p0,
            p1,
            g0,
            g1: g0 - f32x4::splat(1.0),
            t: smootherstep_x4(g0),
        }
    }

    #[inline]
    fn validate_step(index: i32x4, frequency: i32) -> i32x4 {
        let below = index.cmp_eq(i32x4::splat(-1));
        let above = index.cmp_eq(i32x4::splat(frequency));
        let index = select_i32x4_by_int(below, i32x4::splat(frequency - 1), index);
        select_i32x4_by_int(above, i32x4::splat(0), index)
    }
}

/// Lattice noise along x.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lattice1D<L, G>(PhantomData<(L, G)>);

/// Lattice noise on the x/z plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lattice2D<L, G>(PhantomData<(L, G)>);

/// Lattice noise in x/y/z.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lattice3D<L, G>(PhantomData<(L, G)>);

impl<L: LatticePolicy, G: Gradient> Noise for Lattice1D<L, G> {
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = L::span(positions.x, frequency);
        let v0 = G::evaluate_1d(hash.absorb(x.p0), x.g0);
        let v1 = G::evaluate_1d(hash.absorb(x.p1), x.g1);
        G::evaluate_combined(lerp_x4(v0, v1, x.t))
    }
}

impl<L: LatticePolicy, G: Gradient> Noise for Lattice2D<L, G> {
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = L::span(positions.x, frequency);
        let z = L::span(positions.z, frequency);
        let h0 = hash.absorb(x.p0);
        let h1 = hash.absorb(x.p1);

        let edge = |h: HashState, gx: f32x4| {
            lerp_x4(
                G::evaluate_2d(h.absorb(z.p0), gx, z.g0),
                G::evaluate_2d(h.absorb(z.p1), gx, z.g1),
                z.t,
            )
        };
        G::evaluate_combined(lerp_x4(edge(h0, x.g0), edge(h1, x.g1), x.t))
    }
}

impl<L: LatticePolicy, G: Gradient> Noise for Lattice3D<L, G> {
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = L::span(positions.x, frequency);
        let y = L::span(positions.y, frequency);
        let z = L::span(positions.z, frequency);
        let h0 = hash.absorb(x.p0);
        let h1 = hash.absorb(x.p1);

        let edge = |h: HashState, gx: f32x4, gy: f32x4| {
            lerp_x4(
                G::evaluate_3d(h.absorb(z.p0), gx, gy, z.g0),
                G::evaluate_3d(h.absorb(z.p1), gx, gy, z.g1),
                z.t,
            )
        };
        let face = |h: HashState, gx: f32x4| {
            lerp_x4(
                edge(h.absorb(y.p0), gx, y.g0),
                edge(h.absorb(y.p1), gx, y.g1),
                y.t,
            )
        };
        G::evaluate_combined(lerp_x4(face(h0, x.g0), face(h1, x.g1), x.t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Perlin, Turbulence, Value};
    use approx::assert_abs_diff_eq;

    fn xs(values: [f32; 4]) -> Position4 {
        Position4::new(f32x4::from(values), f32x4::splat(0.0), f32x4::splat(0.0))
    }

    #[test]
    fn test_unbounded_span() {
        let s = Unbounded::span(f32x4::from([0.3, -0.3, 1.0, 2.55]), 4);
        assert_eq!(s.p0.to_array(), [1, -2, 4, 10]);
        assert_eq!(s.p1.to_array(), [2, -1, 5, 11]);
        let g0 = s.g0.to_array();
        let g1 = s.g1.to_array();
        for (want, (a, b)) in [0.2, 0.8, 0.0, 0.2].iter().zip(g0.iter().zip(g1)) {
            assert_abs_diff_eq!(*a, *want, epsilon = 1e-5);
            assert_abs_diff_eq!(b, *want - 1.0, epsilon = 1e-5);
        }
        assert_eq!(s.t.to_array()[2], 0.0);
    }

    #[test]
    fn test_periodic_span_wraps() {
        let s = Periodic::span(f32x4::from([0.3, -0.1, 0.99, 1.3]), 4);
        assert_eq!(s.p0.to_array(), [1, 3, 3, 1]);
        assert_eq!(s.p1.to_array(), [2, 0, 0, 2]);
        for p in s.p0.to_array() {
            assert!((0..4).contains(&p));
        }
    }

    #[test]
    fn test_periodic_span_frequency_one() {
        let s = Periodic::span(f32x4::from([0.5, -3.5, 7.25, 0.0]), 1);
        assert_eq!(s.p0.to_array(), [0; 4]);
        assert_eq!(s.p1.to_array(), [0; 4]);
    }

    #[test]
    fn test_validate_step() {
        let idx = i32x4::from([-1, 0, 3, 4]);
        assert_eq!(Unbounded::validate_step(idx, 4).to_array(), [-1, 0, 3, 4]);
        assert_eq!(Periodic::validate_step(idx, 4).to_array(), [3, 0, 3, 0]);
    }

    #[test]
    fn test_value_1d_at_lattice_points() {
        let hash = HashState::seed(0);
        let got = Lattice1D::<Unbounded, Value>::sample4(&xs([0.0, 1.0, 0.0, 1.0]), hash, 1);
        let expect = |cell: i32| {
            let a = hash.absorb(i32x4::splat(cell)).channel_a().to_array()[0];
            a * 2.0 - 1.0
        };
        let got = got.to_array();
        assert_eq!(got[0], expect(0));
        assert_eq!(got[1], expect(1));
        assert_abs_diff_eq!(got[0], 0.0234375, epsilon = 1e-7);
        assert_abs_diff_eq!(got[1], 0.875, epsilon = 1e-7);
    }

    #[test]
    fn test_perlin_zero_at_lattice_points() {
        let hash = HashState::seed(11);
        let p = Position4::from_batch(&[
            [0.0, 0.0, 0.0],
            [0.25, 0.5, 0.75],
            [-1.0, 2.0, 3.0],
            [1.0, -0.5, 0.5],
        ]);
        let v = Lattice3D::<Unbounded, Perlin>::sample4(&p, hash, 4).to_array();
        for lane in v {
            assert_abs_diff_eq!(lane, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_periodic_repeats() {
        let hash = HashState::seed(5);
        let base = Position4::from_batch(&[
            [0.1, 0.2, 0.3],
            [0.45, 0.9, 0.05],
            [0.7, 0.33, 0.61],
            [0.99, 0.01, 0.5],
        ]);
        let shifted = Position4::new(
            base.x + f32x4::splat(1.0),
            base.y - f32x4::splat(1.0),
            base.z + f32x4::splat(2.0),
        );
        let a = Lattice3D::<Periodic, Perlin>::sample4(&base, hash, 3).to_array();
        let b = Lattice3D::<Periodic, Perlin>::sample4(&shifted, hash, 3).to_array();
        for (a, b) in a.iter().zip(b) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_2d_ignores_y() {
        let hash = HashState::seed(1);
        let p = Position4::from_batch(&[[0.3, 0.0, 0.7]; 4]);
        let q = Position4::from_batch(&[[0.3, 5.0, 0.7]; 4]);
        assert_eq!(
            Lattice2D::<Unbounded, Perlin>::sample4(&p, hash, 4).to_array(),
            Lattice2D::<Unbounded, Perlin>::sample4(&q, hash, 4).to_array()
        );
    }

    #[test]
    fn test_turbulence_non_negative() {
        let hash = HashState::seed(9);
        for i in 0..32 {
            let f = i as f32 * 0.037;
            let p = Position4::from_batch(&[[f, 0.1, f], [f, 0.2, -f], [-f, 0.3, f], [f * 2.0, f, 0.4]]);
            let v = Lattice3D::<Unbounded, Turbulence<Perlin>>::sample4(&p, hash, 4);
            for lane in v.to_array() {
                assert!(lane >= 0.0);
            }
        }
    }
}
