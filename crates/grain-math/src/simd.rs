//! 4-lane SIMD helpers.
//!
//! Every noise sample batch holds four independent lanes. This module
//! provides the handful of lane operations the noise engine needs on top
//! of the `wide` crate: interpolation, float/int conversion and
//! branchless per-lane selection.
//!
//! # Masks
//!
//! Comparisons on `f32x4` produce a lane mask with all bits set where the
//! comparison holds. The `select_*` helpers accept such a mask and pick
//! per lane without branching:
//!
//! ```rust
//! use grain_math::simd::select_i32x4;
//! use wide::{f32x4, i32x4, CmpLt};
//!
//! let mask = f32x4::from([0.0, 2.0, 0.0, 2.0]).cmp_lt(f32x4::splat(1.0));
//! let picked = select_i32x4(mask, i32x4::splat(7), i32x4::splat(-7));
//! assert_eq!(picked.to_array(), [7, -7, 7, -7]);
//! ```

use bytemuck::cast;
use wide::{f32x4, i32x4, u32x4};

/// Linear interpolation per lane: `a + (b - a) * t`.
///
/// Returns `a` exactly where `t = 0`.
///
/// # Example
///
/// ```rust
/// use grain_math::simd::lerp_x4;
/// use wide::f32x4;
///
/// let r = lerp_x4(f32x4::splat(0.0), f32x4::splat(10.0), f32x4::from([0.0, 0.25, 0.5, 1.0]));
/// assert_eq!(r.to_array(), [0.0, 2.5, 5.0, 10.0]);
/// ```
#[inline]
pub fn lerp_x4(a: f32x4, b: f32x4, t: f32x4) -> f32x4 {
    a + (b - a) * t
}

/// Quintic smootherstep per lane: `t^3 (t (6t - 15) + 10)`.
///
/// Maps [0, 1] onto [0, 1] with zero first and second derivatives at
/// both ends. Input is not clamped.
#[inline]
pub fn smootherstep_x4(t: f32x4) -> f32x4 {
    t * t * t * (t * (t * f32x4::splat(6.0) - f32x4::splat(15.0)) + f32x4::splat(10.0))
}

/// Floors each lane and converts to `i32`.
#[inline]
pub fn floor_to_i32x4(v: f32x4) -> i32x4 {
    v.floor().round_int()
}

/// Converts each `i32` lane to `f32`.
#[inline]
pub fn i32x4_to_f32x4(v: i32x4) -> f32x4 {
    v.round_float()
}

/// Picks `t` where the mask is set, `f` elsewhere.
#[inline]
pub fn select_f32x4(mask: f32x4, t: f32x4, f: f32x4) -> f32x4 {
    mask.blend(t, f)
}

/// Picks `t` where the float mask is set, `f` elsewhere.
#[inline]
pub fn select_i32x4(mask: f32x4, t: i32x4, f: i32x4) -> i32x4 {
    let m: i32x4 = cast(mask);
    f ^ ((f ^ t) & m)
}

/// Picks `t` where the float mask is set, `f` elsewhere.
#[inline]
pub fn select_u32x4(mask: f32x4, t: u32x4, f: u32x4) -> u32x4 {
    let m: u32x4 = cast(mask);
    f ^ ((f ^ t) & m)
}

/// Picks `t` where the integer mask is set, `f` elsewhere.
#[inline]
pub fn select_i32x4_by_int(mask: i32x4, t: i32x4, f: i32x4) -> i32x4 {
    f ^ ((f ^ t) & mask)
}

/// Reinterprets an integer lane mask as a float lane mask.
#[inline]
pub fn int_mask_to_f32x4(mask: i32x4) -> f32x4 {
    cast(mask)
}

/// Reinterprets signed lanes as unsigned, bit for bit.
#[inline]
pub fn i32x4_as_u32x4(v: i32x4) -> u32x4 {
    cast(v)
}

/// Reinterprets unsigned lanes as signed, bit for bit.
#[inline]
pub fn u32x4_as_i32x4(v: u32x4) -> i32x4 {
    cast(v)
}

/// Reinterprets raw bit patterns as `f32` lanes.
#[inline]
pub fn f32x4_from_bits(bits: u32x4) -> f32x4 {
    cast(bits)
}
