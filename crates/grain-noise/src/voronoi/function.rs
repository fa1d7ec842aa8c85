//! Reductions of the two nearest feature distances.

use wide::f32x4;

use super::VoronoiMinima;

/// Turns the nearest (`f1`) and second nearest (`f2`) distances into the
/// noise value.
pub trait VoronoiCombine: 'static {
    /// Reduces finalized minima to one value per lane.
    fn evaluate(minima: VoronoiMinima) -> f32x4;
}

/// Nearest distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct F1;

/// Second nearest distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct F2;

/// Gap between the two nearest distances; zero along cell borders.
#[derive(Debug, Clone, Copy, Default)]
pub struct F2MinusF1;

impl VoronoiCombine for F1 {
    #[inline]
    fn evaluate(minima: VoronoiMinima) -> f32x4 {
        minima.f1
    }
}

impl VoronoiCombine for F2 {
    #[inline]
    fn evaluate(minima: VoronoiMinima) -> f32x4 {
        minima.f2
    }
}

impl VoronoiCombine for F2MinusF1 {
    #[inline]
    fn evaluate(minima: VoronoiMinima) -> f32x4 {
        minima.f2 - minima.f1
    }
}
