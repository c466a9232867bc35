use crate::error::{GeometryError, Result};
use crate::math::{VectorN, TOLERANCE};

use super::Boundary;

/// A straight segment between two points.
///
/// The parametric form is `X(t) = (1 - t) / 2 * start + (1 + t) / 2 * end`,
/// so `X(-1) = start` and `X(1) = end` hold exactly.
#[derive(Debug, Clone)]
pub struct Segment<const D: usize> {
    start: VectorN<D>,
    end: VectorN<D>,
}

impl<const D: usize> Segment<D> {
    /// Creates a new segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: VectorN<D>, end: VectorN<D>) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        tracing::trace!(?start, ?end, "segment boundary");
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &VectorN<D> {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &VectorN<D> {
        &self.end
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl<const D: usize> Boundary<D> for Segment<D> {
    fn position(&self, t: f64) -> VectorN<D> {
        self.start * (0.5 * (1.0 - t)) + self.end * (0.5 * (1.0 + t))
    }

    fn derivative(&self, _t: f64) -> VectorN<D> {
        (self.end - self.start) * 0.5
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::diff::central_derivative;
    use crate::math::{Vector2, Vector3};
    use approx::assert_abs_diff_eq;

    #[test]
    fn endpoints_are_exact() {
        let s = Segment::new(Vector2::new(1.0, 0.0), Vector2::new(3.0, 0.0)).unwrap();
        assert_eq!(s.position(-1.0), Vector2::new(1.0, 0.0));
        assert_eq!(s.position(1.0), Vector2::new(3.0, 0.0));
        assert_eq!(s.position(0.0), Vector2::new(2.0, 0.0));
    }

    #[test]
    fn derivative_is_half_chord() {
        let s = Segment::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 4.0, -6.0)).unwrap();
        assert_eq!(s.derivative(0.7), Vector3::new(1.0, 2.0, -3.0));
        let numeric = central_derivative(|t| s.position(t), 0.2, 1e-3);
        assert_abs_diff_eq!(numeric, s.derivative(0.2), epsilon = 1e-12);
    }

    #[test]
    fn length() {
        let s = Segment::new(Vector2::new(0.0, 0.0), Vector2::new(3.0, 4.0)).unwrap();
        assert!((s.length() - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn coincident_points_rejected() {
        let p = Vector2::new(1.0, 1.0);
        assert!(Segment::new(p, p).is_err());
    }
}
