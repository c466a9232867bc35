use crate::error::{Result, SamplingError};
use crate::mapping::TransfiniteMapping;
use crate::math::{linspace, PARAM_MAX, PARAM_MIN};

use super::{MappedGrid, SamplingParams};

/// Samples a transfinite mapping over a regular grid of `[-1, 1]²`.
pub struct SampleGrid {
    params: SamplingParams,
}

impl SampleGrid {
    /// Creates a new `SampleGrid` operation.
    #[must_use]
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    /// Executes the sampling, returning the mapped grid.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction has fewer than two points.
    pub fn execute<const D: usize>(&self, mapping: &TransfiniteMapping<D>) -> Result<MappedGrid<D>> {
        let SamplingParams {
            r_points,
            s_points,
            with_jacobians,
        } = self.params;
        if r_points < 2 || s_points < 2 {
            return Err(SamplingError::InvalidParameters(format!(
                "grid needs at least 2x2 points, got {r_points}x{s_points}"
            ))
            .into());
        }

        let r = linspace(PARAM_MIN, PARAM_MAX, r_points);
        let s = linspace(PARAM_MIN, PARAM_MAX, s_points);
        let count = r_points * s_points;
        let mut points = Vec::with_capacity(count);
        let mut jacobians = Vec::with_capacity(if with_jacobians { count } else { 0 });

        for &sj in &s {
            for &ri in &r {
                if with_jacobians {
                    let (j, x) = mapping.derivs([ri, sj]);
                    points.push(x);
                    jacobians.push(j);
                } else {
                    points.push(mapping.point([ri, sj]));
                }
            }
        }

        tracing::debug!(r_points, s_points, with_jacobians, "sampled transfinite grid");
        Ok(MappedGrid {
            r,
            s,
            points,
            jacobians,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TransfiniteError;
    use crate::geometry::boundary::{Boundary, CircularArc, Segment};
    use crate::math::Vector2;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn quarter_annulus() -> TransfiniteMapping<2> {
        let boundaries: Vec<Box<dyn Boundary<2>>> = vec![
            Box::new(Segment::new(Vector2::new(1.0, 0.0), Vector2::new(3.0, 0.0)).unwrap()),
            Box::new(CircularArc::planar(Vector2::zeros(), 3.0, 0.0, FRAC_PI_2).unwrap()),
            Box::new(Segment::new(Vector2::new(0.0, 1.0), Vector2::new(0.0, 3.0)).unwrap()),
            Box::new(CircularArc::planar(Vector2::zeros(), 1.0, 0.0, FRAC_PI_2).unwrap()),
        ];
        TransfiniteMapping::new(boundaries).unwrap()
    }

    #[test]
    fn default_grid_matches_point_evaluation() {
        init_tracing();
        let m = quarter_annulus();
        let grid = SampleGrid::new(SamplingParams::default()).execute(&m).unwrap();
        assert_eq!(grid.points().len(), 21 * 21);
        assert_eq!(grid.jacobians().len(), 21 * 21);
        for (j, &s) in grid.s().iter().enumerate() {
            for (i, &r) in grid.r().iter().enumerate() {
                assert_eq!(*grid.point(i, j).unwrap(), m.point([r, s]));
                assert_eq!(*grid.jacobian(i, j).unwrap(), m.jacobian([r, s]));
            }
        }
    }

    #[test]
    fn grid_lines_follow_boundaries() {
        init_tracing();
        let m = quarter_annulus();
        let params = SamplingParams {
            r_points: 5,
            s_points: 3,
            with_jacobians: false,
        };
        let grid = SampleGrid::new(params).execute(&m).unwrap();
        assert!(grid.jacobians().is_empty());
        assert!(grid.jacobian(0, 0).is_none());

        // Bottom row is the radial segment along the x axis.
        let bottom = grid.r_line(0).unwrap();
        assert_eq!(bottom.len(), 5);
        assert_abs_diff_eq!(bottom[2], Vector2::new(2.0, 0.0), epsilon = 1e-15);

        // Leftmost column lies on the unit circle.
        let inner = grid.s_line(0).unwrap();
        assert_eq!(inner.len(), 3);
        for p in &inner {
            assert_abs_diff_eq!(p.norm(), 1.0, epsilon = 1e-14);
        }

        assert_eq!(grid.r(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(grid.s(), &[-1.0, 0.0, 1.0]);
        assert_eq!(grid.points().len(), grid.r().len() * grid.s().len());
        assert!(grid.r_line(3).is_none());
        assert!(grid.s_line(5).is_none());
        assert!(grid.point(5, 0).is_none());
    }

    #[test]
    fn annulus_is_not_inverted() {
        let m = quarter_annulus();
        let grid = SampleGrid::new(SamplingParams::default()).execute(&m).unwrap();
        // det J = |dx/dr| * |dx/ds| = 1 * (rho * pi / 4), smallest on the inner arc
        let min_det = grid.min_determinant().unwrap();
        assert_abs_diff_eq!(min_det, PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.min_area_element().unwrap(), min_det, epsilon = 1e-12);
    }

    #[test]
    fn rejects_degenerate_grid() {
        let m = quarter_annulus();
        let params = SamplingParams {
            r_points: 1,
            ..SamplingParams::default()
        };
        assert!(matches!(
            SampleGrid::new(params).execute(&m),
            Err(TransfiniteError::Sampling(SamplingError::InvalidParameters(_)))
        ));
    }
}
