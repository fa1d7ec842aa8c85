//! Corner gradient families.
//!
//! A gradient turns a corner hash and the offset from that corner into a
//! scalar contribution. Lattice and simplex noise are generic over the
//! [`Gradient`] trait and never branch on the family at runtime.
//!
//! | family       | 1D                 | 2D            | 3D                |
//! |--------------|--------------------|---------------|-------------------|
//! | [`Value`]    | hash only          | hash only     | hash only         |
//! | [`Perlin`]   | signed line        | square        | octahedron        |
//! | [`Simplex`]  | line, rescaled     | unit circle   | unit sphere       |
//!
//! Scale factors bring the extremes of each family close to `[-1, 1]`.

use std::marker::PhantomData;

use grain_math::simd::{int_mask_to_f32x4, select_f32x4, u32x4_as_i32x4};
use wide::{f32x4, i32x4, u32x4, CmpEq, CmpLt};

use crate::HashState;

/// Contribution of a lattice or simplex corner.
pub trait Gradient: 'static {
    /// 1D corner contribution at offset `x`.
    fn evaluate_1d(hash: HashState, x: f32x4) -> f32x4;

    /// 2D corner contribution at offset `(x, y)`.
    fn evaluate_2d(hash: HashState, x: f32x4, y: f32x4) -> f32x4;

    /// 3D corner contribution at offset `(x, y, z)`.
    fn evaluate_3d(hash: HashState, x: f32x4, y: f32x4, z: f32x4) -> f32x4;

    /// Final shaping of the summed or interpolated corners.
    #[inline]
    fn evaluate_combined(value: f32x4) -> f32x4 {
        value
    }
}

/// Hash-derived scalar per corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Value;

/// Classic gradient noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perlin;

/// Unit gradients scaled for the simplex falloff kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex;

/// Absolute value of another family's combined result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Turbulence<G>(PhantomData<G>);

#[inline]
fn signed(v: f32x4) -> f32x4 {
    v * f32x4::splat(2.0) - f32x4::splat(1.0)
}

/// `(1 + a) * ±x`, sign taken from bit 8 of the hash.
#[inline]
fn line(hash: HashState, x: f32x4) -> f32x4 {
    let flag = u32x4_as_i32x4(hash.value() & u32x4::splat(1 << 8));
    let positive = int_mask_to_f32x4(flag.cmp_eq(i32x4::splat(0)));
    (f32x4::splat(1.0) + hash.channel_a()) * select_f32x4(positive, x, -x)
}

/// Gradient vectors spread over the edges of a square.
#[inline]
fn square_vectors(hash: HashState) -> (f32x4, f32x4) {
    let a = signed(hash.channel_a());
    let v = f32x4::splat(0.5) - a.abs();
    let u = a - (a + f32x4::splat(0.5)).floor();
    (u, v)
}

/// Gradient vectors spread over the faces of an octahedron.
#[inline]
fn octahedron_vectors(hash: HashState) -> (f32x4, f32x4, f32x4) {
    let zero = f32x4::splat(0.0);
    let a = signed(hash.channel_a());
    let b = signed(hash.channel_d());
    let c = f32x4::splat(1.0) - a.abs() - b.abs();
    let fold = (-c).max(zero);
    let a = a + select_f32x4(a.cmp_lt(zero), fold, -fold);
    let b = b + select_f32x4(b.cmp_lt(zero), fold, -fold);
    (a, b, c)
}

impl Gradient for Value {
    #[inline]
    fn evaluate_1d(hash: HashState, _x: f32x4) -> f32x4 {
        signed(hash.channel_a())
    }

    #[inline]
    fn evaluate_2d(hash: HashState, _x: f32x4, _y: f32x4) -> f32x4 {
        signed(hash.channel_a())
    }

    #[inline]
    fn evaluate_3d(hash: HashState, _x: f32x4, _y: f32x4, _z: f32x4) -> f32x4 {
        signed(hash.channel_a())
    }
}

impl Gradient for Perlin {
    #[inline]
    fn evaluate_1d(hash: HashState, x: f32x4) -> f32x4 {
        line(hash, x)
    }

    #[inline]
    fn evaluate_2d(hash: HashState, x: f32x4, y: f32x4) -> f32x4 {
        let (u, v) = square_vectors(hash);
        (u * x + v * y) * f32x4::splat(2.0 / 0.53528)
    }

    #[inline]
    fn evaluate_3d(hash: HashState, x: f32x4, y: f32x4, z: f32x4) -> f32x4 {
        let (a, b, c) = octahedron_vectors(hash);
        (a * x + b * y + c * z) * f32x4::splat(1.0 / 0.56290)
    }
}

const SIMPLEX_SCALE_1D: f32 = 32.0 / 27.0;
const SIMPLEX_SCALE_2D: f32 = 5.832 / std::f32::consts::SQRT_2;
const SIMPLEX_SCALE_3D: f32 = 1024.0 / (125.0 * 1.732_050_8);

impl Gradient for Simplex {
    #[inline]
    fn evaluate_1d(hash: HashState, x: f32x4) -> f32x4 {
        line(hash, x) * f32x4::splat(SIMPLEX_SCALE_1D)
    }

    #[inline]
    fn evaluate_2d(hash: HashState, x: f32x4, y: f32x4) -> f32x4 {
        let (u, v) = square_vectors(hash);
        let inv_len = f32x4::splat(1.0) / (u * u + v * v).sqrt();
        (u * x + v * y) * inv_len * f32x4::splat(SIMPLEX_SCALE_2D)
    }

    #[inline]
    fn evaluate_3d(hash: HashState, x: f32x4, y: f32x4, z: f32x4) -> f32x4 {
        let (a, b, c) = octahedron_vectors(hash);
        let inv_len = f32x4::splat(1.0) / (a * a + b * b + c * c).sqrt();
        (a * x + b * y + c * z) * inv_len * f32x4::splat(SIMPLEX_SCALE_3D)
    }
}

impl<G: Gradient> Gradient for Turbulence<G> {
    #[inline]
    fn evaluate_1d(hash: HashState, x: f32x4) -> f32x4 {
        G::evaluate_1d(hash, x)
    }

    #[inline]
    fn evaluate_2d(hash: HashState, x: f32x4, y: f32x4) -> f32x4 {
        G::evaluate_2d(hash, x, y)
    }

    #[inline]
    fn evaluate_3d(hash: HashState, x: f32x4, y: f32x4, z: f32x4) -> f32x4 {
        G::evaluate_3d(hash, x, y, z)
    }

    #[inline]
    fn evaluate_combined(value: f32x4) -> f32x4 {
        G::evaluate_combined(value).abs()
    }
}
