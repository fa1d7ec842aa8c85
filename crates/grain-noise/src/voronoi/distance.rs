//! Distance metrics for cellular noise.

use wide::f32x4;

use super::VoronoiMinima;

/// Distance from a sample to a feature point, plus the final transform of
/// the two running minima.
///
/// `distance_*` may return any monotonic measure (squared length, say);
/// `finalize_*` converts it to the reported distance.
pub trait VoronoiDistance: 'static {
    /// 1D distance for offset `x`.
    fn distance_1d(x: f32x4) -> f32x4;

    /// 2D distance for offset `(x, y)`.
    fn distance_2d(x: f32x4, y: f32x4) -> f32x4;

    /// 3D distance for offset `(x, y, z)`.
    fn distance_3d(x: f32x4, y: f32x4, z: f32x4) -> f32x4;

    /// Converts 1D minima to reported distances.
    fn finalize_1d(minima: VoronoiMinima) -> VoronoiMinima;

    /// Converts 2D minima to reported distances.
    fn finalize_2d(minima: VoronoiMinima) -> VoronoiMinima;

    /// Converts 3D minima to reported distances.
    fn finalize_3d(minima: VoronoiMinima) -> VoronoiMinima;
}

/// Euclidean distance, clamped to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Worley;

/// Chebyshev (chessboard) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

#[inline]
fn clamped_root(v: f32x4) -> f32x4 {
    v.min(f32x4::splat(1.0)).sqrt()
}

impl VoronoiDistance for Worley {
    #[inline]
    fn distance_1d(x: f32x4) -> f32x4 {
        x.abs()
    }

    #[inline]
    fn distance_2d(x: f32x4, y: f32x4) -> f32x4 {
        x * x + y * y
    }

    #[inline]
    fn distance_3d(x: f32x4, y: f32x4, z: f32x4) -> f32x4 {
        x * x + y * y + z * z
    }

    #[inline]
    fn finalize_1d(minima: VoronoiMinima) -> VoronoiMinima {
        minima
    }

    #[inline]
    fn finalize_2d(minima: VoronoiMinima) -> VoronoiMinima {
        VoronoiMinima {
            f1: clamped_root(minima.f1),
            f2: clamped_root(minima.f2),
        }
    }

    #[inline]
    fn finalize_3d(minima: VoronoiMinima) -> VoronoiMinima {
        Self::finalize_2d(minima)
    }
}

impl VoronoiDistance for Chebyshev {
    #[inline]
    fn distance_1d(x: f32x4) -> f32x4 {
        x.abs()
    }

    #[inline]
    fn distance_2d(x: f32x4, y: f32x4) -> f32x4 {
        x.abs().max(y.abs())
    }

    #[inline]
    fn distance_3d(x: f32x4, y: f32x4, z: f32x4) -> f32x4 {
        x.abs().max(y.abs()).max(z.abs())
    }

    #[inline]
    fn finalize_1d(minima: VoronoiMinima) -> VoronoiMinima {
        minima
    }

    #[inline]
    fn finalize_2d(minima: VoronoiMinima) -> VoronoiMinima {
        minima
    }

    #[inline]
    fn finalize_3d(minima: VoronoiMinima) -> VoronoiMinima {
        minima
    }
}
