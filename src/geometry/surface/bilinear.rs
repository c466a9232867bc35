use crate::math::{blend, Matrix3x2, Vector3, BLEND_SLOPE};

use super::BoundarySurface;

/// A bilinear patch through four corner points.
///
/// Corners are given in counter-clockwise parametric order:
/// `(-1,-1)`, `(1,-1)`, `(1,1)`, `(-1,1)`. A planar quadrilateral with
/// straight edges is the common case.
#[derive(Debug, Clone)]
pub struct BilinearPatch {
    corners: [Vector3; 4],
}

impl BilinearPatch {
    /// Creates a new patch from its four corners.
    #[must_use]
    pub fn new(corners: [Vector3; 4]) -> Self {
        Self { corners }
    }

    /// Returns the corner points.
    #[must_use]
    pub fn corners(&self) -> &[Vector3; 4] {
        &self.corners
    }

    // Corner k sits at parametric sides (ia, ib).
    const SIDES: [(usize, usize); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];
}

impl BoundarySurface for BilinearPatch {
    fn position(&self, a: f64, b: f64) -> Vector3 {
        let wa = blend(a);
        let wb = blend(b);
        Self::SIDES
            .iter()
            .zip(&self.corners)
            .fold(Vector3::zeros(), |acc, (&(ia, ib), c)| acc + c * (wa[ia] * wb[ib]))
    }

    fn derivatives(&self, a: f64, b: f64) -> Matrix3x2 {
        let wa = blend(a);
        let wb = blend(b);
        let mut da = Vector3::zeros();
        let mut db = Vector3::zeros();
        for (&(ia, ib), c) in Self::SIDES.iter().zip(&self.corners) {
            da += c * (BLEND_SLOPE[ia] * wb[ib]);
            db += c * (wa[ia] * BLEND_SLOPE[ib]);
        }
        Matrix3x2::from_columns(&[da, db])
    }
}
