//! Affine domain transforms.
//!
//! Sample positions pass through a [`DomainTransform`] before noise
//! evaluation. The transform is a 3x4 affine matrix stored as four
//! columns: three basis columns and a translation column.
//!
//! ```text
//! x' = c0.x * x + c1.x * y + c2.x * z + c3.x
//! y' = c0.y * x + c1.y * y + c2.y * z + c3.y
//! z' = c0.z * x + c1.z * y + c2.z * z + c3.z
//! ```
//!
//! # Usage
//!
//! ```rust
//! use grain_math::{DomainTransform, Position4, Trs};
//!
//! let trs = Trs {
//!     translation: [1.0, 0.0, 0.0],
//!     rotation: [0.0, 0.0, 0.0],
//!     scale: [8.0, 8.0, 8.0],
//! };
//! let t = DomainTransform::from_trs(&trs);
//! let p = t.transform(&Position4::splat([1.0, 2.0, 3.0]));
//! assert_eq!(p.x.to_array(), [9.0; 4]);
//! assert_eq!(p.z.to_array(), [24.0; 4]);
//! ```

use glam::{Affine3A, EulerRot, Quat, Vec3};
use wide::f32x4;

use crate::Position4;

/// Translation, Euler rotation in degrees, and per-axis scale.
///
/// Rotation is applied as Z, then X, then Y (the Y rotation is outermost).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Trs {
    /// Translation applied after rotation and scale
    pub translation: [f32; 3],
    /// Euler angles in degrees
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
}

impl Default for Trs {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Trs {
    /// Rotation quaternion for the stored Euler angles.
    pub fn rotation_quat(&self) -> Quat {
        let [x, y, z] = self.rotation.map(f32::to_radians);
        Quat::from_euler(EulerRot::YXZ, y, x, z)
    }
}

/// 3x4 affine transform applied to sample positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainTransform {
    /// Basis columns followed by the translation column
    pub columns: [[f32; 3]; 4],
}

impl Default for DomainTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DomainTransform {
    /// Leaves positions unchanged.
    pub const IDENTITY: Self = Self {
        columns: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        ],
    };

    /// Builds from explicit columns.
    pub const fn from_columns(columns: [[f32; 3]; 4]) -> Self {
        Self { columns }
    }

    /// Uniform scale without rotation or translation.
    pub fn uniform_scale(scale: f32) -> Self {
        Self::from_columns([
            [scale, 0.0, 0.0],
            [0.0, scale, 0.0],
            [0.0, 0.0, scale],
            [0.0, 0.0, 0.0],
        ])
    }

    /// Converts a glam affine.
    pub fn from_affine(affine: &Affine3A) -> Self {
        let a = affine.to_cols_array();
        Self::from_columns([
            [a[0], a[1], a[2]],
            [a[3], a[4], a[5]],
            [a[6], a[7], a[8]],
            [a[9], a[10], a[11]],
        ])
    }

    /// Composes scale, rotation and translation.
    pub fn from_trs(trs: &Trs) -> Self {
        let affine = Affine3A::from_scale_rotation_translation(
            Vec3::from_array(trs.scale),
            trs.rotation_quat(),
            Vec3::from_array(trs.translation),
        );
        Self::from_affine(&affine)
    }

    /// Transforms four positions at once.
    #[inline]
    pub fn transform(&self, p: &Position4) -> Position4 {
        let [c0, c1, c2, c3] = self.columns;
        let row = |i: usize| {
            f32x4::splat(c0[i]) * p.x
                + f32x4::splat(c1[i]) * p.y
                + f32x4::splat(c2[i]) * p.z
                + f32x4::splat(c3[i])
        };
        Position4::new(row(0), row(1), row(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Lane `i` of a transformed batch as a point.
    fn lane(p: &Position4, i: usize) -> [f32; 3] {
        [p.x.to_array()[i], p.y.to_array()[i], p.z.to_array()[i]]
    }

    #[test]
    fn test_identity() {
        let p = Position4::from_batch(&[
            [1.0, 2.0, 3.0],
            [-1.0, 0.5, 0.0],
            [0.0, 0.0, 0.0],
            [4.0, 5.0, 6.0],
        ]);
        assert_eq!(DomainTransform::IDENTITY.transform(&p), p);
        assert_eq!(DomainTransform::default(), DomainTransform::IDENTITY);
    }

    #[test]
    fn test_trs_default_is_identity() {
        let t = DomainTransform::from_trs(&Trs::default());
        for (col, want) in t.columns.iter().zip(DomainTransform::IDENTITY.columns) {
            for i in 0..3 {
                assert_abs_diff_eq!(col[i], want[i], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_uniform_scale() {
        let t = DomainTransform::uniform_scale(8.0);
        let p = t.transform(&Position4::splat([0.5, -1.0, 2.0]));
        assert_eq!(lane(&p, 0), [4.0, -8.0, 16.0]);
    }

    #[test]
    fn test_rotation_about_y() {
        let trs = Trs {
            rotation: [0.0, 90.0, 0.0],
            ..Trs::default()
        };
        let p = DomainTransform::from_trs(&trs).transform(&Position4::splat([1.0, 0.0, 0.0]));
        let [x, y, z] = lane(&p, 0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lanes_match_glam() {
        let trs = Trs {
            translation: [0.25, -3.0, 1.0],
            rotation: [30.0, 45.0, 10.0],
            scale: [2.0, 4.0, 8.0],
        };
        let affine = Affine3A::from_scale_rotation_translation(
            Vec3::from_array(trs.scale),
            trs.rotation_quat(),
            Vec3::from_array(trs.translation),
        );
        let batch = [
            [0.1, 0.2, 0.3],
            [1.0, -1.0, 0.0],
            [5.0, 0.0, -2.5],
            [0.0, 0.0, 0.0],
        ];
        let lanes = DomainTransform::from_trs(&trs).transform(&Position4::from_batch(&batch));
        for (i, point) in batch.into_iter().enumerate() {
            let want = affine.transform_point3(Vec3::from_array(point)).to_array();
            let got = lane(&lanes, i);
            for axis in 0..3 {
                assert_abs_diff_eq!(got[axis], want[axis], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_rotation_order_yxz() {
        // Z first, then X: z-rotation takes x onto y, x-rotation takes y onto z
        let trs = Trs {
            rotation: [90.0, 0.0, 90.0],
            ..Trs::default()
        };
        let p = DomainTransform::from_trs(&trs).transform(&Position4::splat([1.0, 0.0, 0.0]));
        let [x, y, z] = lane(&p, 0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(z, 1.0, epsilon = 1e-6);
    }
}
