//! Simplex noise.
//!
//! The domain is skewed so that a cube lattice folds onto a lattice of
//! simplices (segments, triangles, tetrahedra). Each sample sums a radial
//! falloff kernel over the corners of its simplex, weighted by the
//! gradient at each corner.
//!
//! | dims | frequency scale | skew                   | unskew                 | corners |
//! |------|-----------------|------------------------|------------------------|---------|
//! | 1    | `f`             | none                   | none                   | 2       |
//! | 2    | `f / sqrt(3)`   | `(x+z)(sqrt(3)-1)/2`   | `(x+z)(3-sqrt(3))/6`   | 3       |
//! | 3    | `f * 0.6`       | `(x+y+z)/3`            | `(x+y+z)/6`            | 4       |
//!
//! Corner selection is branchless: lane masks pick the middle corners and
//! [`HashState::select`] picks their partial hashes.
//!
//! Simplex noise is always unbounded; there is no periodic variant.

use std::marker::PhantomData;

use bytemuck::cast;
use grain_math::simd::{floor_to_i32x4, i32x4_to_f32x4, select_i32x4, select_i32x4_by_int};
use grain_math::Position4;
use wide::{f32x4, i32x4, CmpGt};

use crate::{Gradient, HashState, Noise};

const SQRT_3: f32 = 1.732_050_8;
const SKEW_2D: f32 = (SQRT_3 - 1.0) / 2.0;
const UNSKEW_2D: f32 = (3.0 - SQRT_3) / 6.0;

/// Simplex noise along x.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex1D<G>(PhantomData<G>);

/// Simplex noise on the x/z plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex2D<G>(PhantomData<G>);

/// Simplex noise in x/y/z.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex3D<G>(PhantomData<G>);

#[inline]
fn falloff(f: f32x4) -> f32x4 {
    (f * f * f * f32x4::splat(8.0)).max(f32x4::splat(0.0))
}

impl<G: Gradient> Simplex1D<G> {
    #[inline]
    fn kernel(hash: HashState, corner: i32x4, x: f32x4) -> f32x4 {
        let x = x - i32x4_to_f32x4(corner);
        let f = f32x4::splat(1.0) - x * x;
        f * f * f * G::evaluate_1d(hash, x)
    }
}

impl<G: Gradient> Noise for Simplex1D<G> {
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let x = positions.x * f32x4::splat(frequency as f32);
        let x0 = floor_to_i32x4(x);
        let x1 = x0 + i32x4::splat(1);
        G::evaluate_combined(
            Self::kernel(hash.absorb(x0), x0, x) + Self::kernel(hash.absorb(x1), x1, x),
        )
    }
}

impl<G: Gradient> Simplex2D<G> {
    #[inline]
    fn kernel(hash: HashState, cx: i32x4, cz: i32x4, px: f32x4, pz: f32x4) -> f32x4 {
        let (cx, cz) = (i32x4_to_f32x4(cx), i32x4_to_f32x4(cz));
        let unskew = (cx + cz) * f32x4::splat(UNSKEW_2D);
        let x = px - cx + unskew;
        let z = pz - cz + unskew;
        let f = f32x4::splat(0.5) - x * x - z * z;
        falloff(f) * G::evaluate_2d(hash, x, z)
    }
}

impl<G: Gradient> Noise for Simplex2D<G> {
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let scale = f32x4::splat(frequency as f32 * (1.0 / SQRT_3));
        let px = positions.x * scale;
        let pz = positions.z * scale;
        let skew = (px + pz) * f32x4::splat(SKEW_2D);
        let (sx, sz) = (px + skew, pz + skew);

        let x0 = floor_to_i32x4(sx);
        let z0 = floor_to_i32x4(sz);
        let x1 = x0 + i32x4::splat(1);
        let z1 = z0 + i32x4::splat(1);

        let x_gt_z = (sx - i32x4_to_f32x4(x0)).cmp_gt(sz - i32x4_to_f32x4(z0));
        let xc = select_i32x4(x_gt_z, x1, x0);
        let zc = select_i32x4(x_gt_z, z0, z1);

        let h0 = hash.absorb(x0);
        let h1 = hash.absorb(x1);
        let hc = HashState::select(h0, h1, x_gt_z);

        G::evaluate_combined(
            Self::kernel(h0.absorb(z0), x0, z0, px, pz)
                + Self::kernel(h1.absorb(z1), x1, z1, px, pz)
                + Self::kernel(hc.absorb(zc), xc, zc, px, pz),
        )
    }
}

/// One corner of a tetrahedron with its x-only partial hash.
#[derive(Clone, Copy)]
struct Corner3 {
    hash: HashState,
    x: i32x4,
    y: i32x4,
    z: i32x4,
}

impl<G: Gradient> Simplex3D<G> {
    #[inline]
    fn kernel(corner: Corner3, px: f32x4, py: f32x4, pz: f32x4) -> f32x4 {
        let (cx, cy, cz) = (
            i32x4_to_f32x4(corner.x),
            i32x4_to_f32x4(corner.y),
            i32x4_to_f32x4(corner.z),
        );
        let unskew = (cx + cy + cz) * f32x4::splat(1.0 / 6.0);
        let x = px - cx + unskew;
        let y = py - cy + unskew;
        let z = pz - cz + unskew;
        let f = f32x4::splat(0.5) - x * x - y * y - z * z;
        let hash = corner.hash.absorb(corner.y).absorb(corner.z);
        falloff(f) * G::evaluate_3d(hash, x, y, z)
    }
}

impl<G: Gradient> Noise for Simplex3D<G> {
    #[inline]
    fn sample4(positions: &Position4, hash: HashState, frequency: i32) -> f32x4 {
        let scale = f32x4::splat(frequency as f32 * 0.6);
        let px = positions.x * scale;
        let py = positions.y * scale;
        let pz = positions.z * scale;
        let skew = (px + py + pz) * f32x4::splat(1.0 / 3.0);
        let (sx, sy, sz) = (px + skew, py + skew, pz + skew);

        let x0 = floor_to_i32x4(sx);
        let y0 = floor_to_i32x4(sy);
        let z0 = floor_to_i32x4(sz);
        let one = i32x4::splat(1);
        let (x1, y1, z1) = (x0 + one, y0 + one, z0 + one);

        let dx = sx - i32x4_to_f32x4(x0);
        let dy = sy - i32x4_to_f32x4(y0);
        let dz = sz - i32x4_to_f32x4(z0);

        // Integer lane masks, all bits set where the comparison holds.
        let x_gt_y: i32x4 = cast(dx.cmp_gt(dy));
        let x_gt_z: i32x4 = cast(dx.cmp_gt(dz));
        let y_gt_z: i32x4 = cast(dy.cmp_gt(dz));
        let all = i32x4::splat(-1);
        let not = |m: i32x4| m ^ all;

        // First middle corner steps along the largest offset, the second
        // along every offset except the smallest.
        let x_a = x_gt_y & x_gt_z;
        let x_b = x_gt_y | (x_gt_z & y_gt_z);
        let y_a = not(x_gt_y) & y_gt_z;
        let y_b = not(x_gt_y) | (x_gt_z & y_gt_z);
        let z_a = (x_gt_y & not(x_gt_z)) | (not(x_gt_y) & not(y_gt_z));
        let z_b = not(x_gt_z & y_gt_z);

        let h0 = hash.absorb(x0);
        let h1 = hash.absorb(x1);

        let corners = [
            Corner3 {
                hash: h0,
                x: x0,
                y: y0,
                z: z0,
            },
            Corner3 {
                hash: h1,
                x: x1,
                y: y1,
                z: z1,
            },
            Corner3 {
                hash: HashState::select(h0, h1, cast(x_a)),
                x: select_i32x4_by_int(x_a, x1, x0),
                y: select_i32x4_by_int(y_a, y1, y0),
                z: select_i32x4_by_int(z_a, z1, z0),
            },
            Corner3 {
                hash: HashState::select(h0, h1, cast(x_b)),
                x: select_i32x4_by_int(x_b, x1, x0),
                y: select_i32x4_by_int(y_b, y1, y0),
                z: select_i32x4_by_int(z_b, z1, z0),
            },
        ];

        let sum = corners
            .iter()
            .fold(f32x4::splat(0.0), |acc, c| acc + Self::kernel(*c, px, py, pz));
        G::evaluate_combined(sum)
    }
}
