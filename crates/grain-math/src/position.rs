//! Batched sample positions.
//!
//! [`Position4`] stores four 3D positions column-wise so that each axis
//! is one `f32x4` lane vector.
//!
//! ```text
//! [[x0, y0, z0],          x: [x0, x1, x2, x3]
//!  [x1, y1, z1],   --->   y: [y0, y1, y2, y3]
//!  [x2, y2, z2],          z: [z0, z1, z2, z3]
//!  [x3, y3, z3]]
//! ```

use wide::f32x4;

/// One batch of input positions as it arrives from the caller.
pub type PositionBatch = [[f32; 3]; 4];

/// Four 3D positions, one per lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position4 {
    /// X coordinates
    pub x: f32x4,
    /// Y coordinates
    pub y: f32x4,
    /// Z coordinates
    pub z: f32x4,
}

impl Position4 {
    /// Creates a batch from per-axis lanes.
    #[inline]
    pub fn new(x: f32x4, y: f32x4, z: f32x4) -> Self {
        Self { x, y, z }
    }

    /// All four lanes at the same point.
    #[inline]
    pub fn splat(p: [f32; 3]) -> Self {
        Self::new(f32x4::splat(p[0]), f32x4::splat(p[1]), f32x4::splat(p[2]))
    }

    /// Transposes a caller batch into lanes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grain_math::Position4;
    ///
    /// let p = Position4::from_batch(&[
    ///     [0.0, 1.0, 2.0],
    ///     [3.0, 4.0, 5.0],
    ///     [6.0, 7.0, 8.0],
    ///     [9.0, 10.0, 11.0],
    /// ]);
    /// assert_eq!(p.x.to_array(), [0.0, 3.0, 6.0, 9.0]);
    /// assert_eq!(p.z.to_array(), [2.0, 5.0, 8.0, 11.0]);
    /// ```
    #[inline]
    pub fn from_batch(batch: &PositionBatch) -> Self {
        Self::new(
            f32x4::from([batch[0][0], batch[1][0], batch[2][0], batch[3][0]]),
            f32x4::from([batch[0][1], batch[1][1], batch[2][1], batch[3][1]]),
            f32x4::from([batch[0][2], batch[1][2], batch[2][2], batch[3][2]]),
        )
    }
}

/// Packs loose points into batches of four.
///
/// A trailing partial batch is padded by repeating the last point, so the
/// padded lanes produce valid (and discarded) samples.
pub fn pack_points(points: &[[f32; 3]]) -> Vec<PositionBatch> {
    points
        .chunks(4)
        .map(|chunk| {
            let last = chunk[chunk.len() - 1];
            std::array::from_fn(|i| chunk.get(i).copied().unwrap_or(last))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_batch_transposes() {
        let batch = [
            [0.5, -1.0, 2.0],
            [1.5, -2.0, 3.0],
            [2.5, -3.0, 4.0],
            [3.5, -4.0, 5.0],
        ];
        let p = Position4::from_batch(&batch);
        assert_eq!(p.x.to_array(), [0.5, 1.5, 2.5, 3.5]);
        assert_eq!(p.y.to_array(), [-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(p.z.to_array(), [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_splat() {
        let p = Position4::splat([1.0, 2.0, 3.0]);
        assert_eq!(p, Position4::from_batch(&[[1.0, 2.0, 3.0]; 4]));
    }

    #[test]
    fn test_pack_points_pads_tail() {
        let points: Vec<[f32; 3]> = (0..6).map(|i| [i as f32, 0.0, 0.0]).collect();
        let batches = pack_points(&points);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1][0][0], 4.0);
        assert_eq!(batches[1][1][0], 5.0);
        assert_eq!(batches[1][2][0], 5.0);
        assert_eq!(batches[1][3][0], 5.0);
    }

    #[test]
    fn test_pack_points_empty() {
        assert!(pack_points(&[]).is_empty());
    }
}
