use std::fmt;

use crate::error::{MappingError, Result};
use crate::geometry::boundary::{Boundary, BoundaryFn, FnBoundary};
use crate::geometry::surface::BoundarySurface;
use crate::math::{Jacobian, Matrix3x2, Vector3, VectorN, PARAM_MAX, PARAM_MIN};

use super::{check_dimension, MappingBuilder};

/// Number of boundary curves of a two-parameter mapping.
pub const BOUNDARY_COUNT: usize = 4;

/// Transfinite (Coons patch) mapping from `[-1, 1]²` into `D`-dimensional
/// space, bounded by four curves.
///
/// Boundary layout:
///
/// ```text
///            B2(r)
///     C3 ------------ C2
///      |              |
/// B3(s)|              |B1(s)
///      |              |
///     C0 ------------ C1
///            B0(r)
/// ```
///
/// Boundaries 0 and 2 run along `r` at `s = -1` and `s = 1`; boundaries 1
/// and 3 run along `s` at `r = 1` and `r = -1`. Corners are taken from the
/// endpoints of boundaries 0 and 2 only:
/// `C0 = B0(-1)`, `C1 = B0(1)`, `C2 = B2(1)`, `C3 = B2(-1)`.
///
/// The mapping is immutable once built. `D` may be 2 (planar region) or
/// 3 (surface patch in space).
pub struct TransfiniteMapping<const D: usize> {
    boundaries: [Box<dyn Boundary<D>>; BOUNDARY_COUNT],
    corners: [VectorN<D>; BOUNDARY_COUNT],
}

impl<const D: usize> TransfiniteMapping<D> {
    /// Creates a mapping from four boundaries, ordered `B0..B3`.
    ///
    /// # Errors
    ///
    /// Returns an error if `D` is not 2 or 3, or if `boundaries` does not
    /// hold exactly four entries.
    pub fn new(boundaries: Vec<Box<dyn Boundary<D>>>) -> Result<Self> {
        check_dimension::<D>()?;
        let boundaries: [Box<dyn Boundary<D>>; BOUNDARY_COUNT] =
            boundaries.try_into().map_err(|b: Vec<_>| MappingError::BoundaryCount {
                expected: BOUNDARY_COUNT,
                found: b.len(),
            })?;
        Self::from_boundaries(boundaries)
    }

    /// Creates a mapping from four boundaries given as an array.
    ///
    /// # Errors
    ///
    /// Returns an error if `D` is not 2 or 3.
    pub fn from_boundaries(boundaries: [Box<dyn Boundary<D>>; BOUNDARY_COUNT]) -> Result<Self> {
        check_dimension::<D>()?;
        let corners = [
            boundaries[0].position(PARAM_MIN),
            boundaries[0].position(PARAM_MAX),
            boundaries[2].position(PARAM_MAX),
            boundaries[2].position(PARAM_MIN),
        ];
        tracing::debug!(dim = D, ?corners, "built transfinite mapping");
        Ok(Self {
            boundaries,
            corners,
        })
    }

    /// Creates a mapping from parallel lists of position and derivative
    /// closures.
    ///
    /// # Errors
    ///
    /// Returns an error if `D` is not 2 or 3, or if either list does not
    /// hold exactly four closures.
    pub fn from_fns(positions: Vec<BoundaryFn<D>>, derivatives: Vec<BoundaryFn<D>>) -> Result<Self> {
        check_dimension::<D>()?;
        for list in [&positions, &derivatives] {
            if list.len() != BOUNDARY_COUNT {
                return Err(MappingError::BoundaryCount {
                    expected: BOUNDARY_COUNT,
                    found: list.len(),
                }
                .into());
            }
        }
        let boundaries = positions
            .into_iter()
            .zip(derivatives)
            .map(|(p, d)| Box::new(FnBoundary::new(p, d)) as Box<dyn Boundary<D>>)
            .collect();
        Self::new(boundaries)
    }

    /// Returns a builder that collects boundaries slot by slot.
    #[must_use]
    pub fn builder() -> MappingBuilder<D> {
        MappingBuilder::new()
    }

    /// Returns the spatial dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        D
    }

    /// Returns the corner points `C0..C3`.
    #[must_use]
    pub fn corners(&self) -> &[VectorN<D>; BOUNDARY_COUNT] {
        &self.corners
    }

    /// Returns boundary `index`, if it exists.
    #[must_use]
    pub fn boundary(&self, index: usize) -> Option<&dyn Boundary<D>> {
        self.boundaries.get(index).map(|b| &**b)
    }

    /// Evaluates the physical point at `u = [r, s]`.
    ///
    /// Values outside `[-1, 1]²` extrapolate with the same blending formula.
    #[must_use]
    pub fn point(&self, u: [f64; 2]) -> VectorN<D> {
        let [r, s] = u;
        let b = [
            self.boundaries[0].position(r),
            self.boundaries[1].position(s),
            self.boundaries[2].position(r),
            self.boundaries[3].position(s),
        ];
        self.blend(r, s, &b)
    }

    /// Evaluates the Jacobian `J[i][j] = dx_i/du_j` and the point at `u`.
    #[must_use]
    pub fn derivs(&self, u: [f64; 2]) -> (Jacobian<D>, VectorN<D>) {
        let [r, s] = u;
        let b = [
            self.boundaries[0].position(r),
            self.boundaries[1].position(s),
            self.boundaries[2].position(r),
            self.boundaries[3].position(s),
        ];
        let db0 = self.boundaries[0].derivative(r);
        let db1 = self.boundaries[1].derivative(s);
        let db2 = self.boundaries[2].derivative(r);
        let db3 = self.boundaries[3].derivative(s);
        let [c0, c1, c2, c3] = &self.corners;

        let dxdr = (b[1] - b[3]) * 0.5 + (db0 * (1.0 - s) + db2 * (1.0 + s)) * 0.5
            - ((c1 - c0) * (1.0 - s) + (c2 - c3) * (1.0 + s)) * 0.25;

        let dxds = (db3 * (1.0 - r) + db1 * (1.0 + r)) * 0.5 + (b[2] - b[0]) * 0.5
            - ((c3 - c0) * (1.0 - r) + (c2 - c1) * (1.0 + r)) * 0.25;

        (Jacobian::from_columns(&[dxdr, dxds]), self.blend(r, s, &b))
    }

    /// Evaluates only the Jacobian at `u`.
    #[must_use]
    pub fn jacobian(&self, u: [f64; 2]) -> Jacobian<D> {
        self.derivs(u).0
    }

    /// Distances between each stored corner and the matching endpoint of
    /// the other adjacent boundary: `|B3(-1) - C0|`, `|B1(-1) - C1|`,
    /// `|B1(1) - C2|`, `|B3(1) - C3|`.
    ///
    /// Construction never checks these; callers that need consistent
    /// boundaries can inspect them here.
    #[must_use]
    pub fn corner_gaps(&self) -> [f64; BOUNDARY_COUNT] {
        let (b1_start, b1_end) = self.boundaries[1].endpoints();
        let (b3_start, b3_end) = self.boundaries[3].endpoints();
        [
            (b3_start - self.corners[0]).norm(),
            (b1_start - self.corners[1]).norm(),
            (b1_end - self.corners[2]).norm(),
            (b3_end - self.corners[3]).norm(),
        ]
    }

    /// Largest entry of [`corner_gaps`](Self::corner_gaps).
    #[must_use]
    pub fn max_corner_gap(&self) -> f64 {
        self.corner_gaps().into_iter().fold(0.0, f64::max)
    }

    // x = 1/2 [(1-r) B3 + (1+r) B1] + 1/2 [(1-s) B0 + (1+s) B2] - bilinear(C)
    fn blend(&self, r: f64, s: f64, b: &[VectorN<D>; BOUNDARY_COUNT]) -> VectorN<D> {
        let [c0, c1, c2, c3] = &self.corners;
        (b[3] * (1.0 - r) + b[1] * (1.0 + r)) * 0.5 + (b[0] * (1.0 - s) + b[2] * (1.0 + s)) * 0.5
            - (c0 * ((1.0 - r) * (1.0 - s))
                + c1 * ((1.0 + r) * (1.0 - s))
                + c2 * ((1.0 + r) * (1.0 + s))
                + c3 * ((1.0 - r) * (1.0 + s)))
                * 0.25
    }
}

impl<const D: usize> fmt::Debug for TransfiniteMapping<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransfiniteMapping")
            .field("dim", &D)
            .field("corners", &self.corners)
            .finish_non_exhaustive()
    }
}

impl BoundarySurface for TransfiniteMapping<3> {
    fn position(&self, a: f64, b: f64) -> Vector3 {
        self.point([a, b])
    }

    fn derivatives(&self, a: f64, b: f64) -> Matrix3x2 {
        self.jacobian([a, b])
    }
}
