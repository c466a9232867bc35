mod arc;
mod function;
mod nurbs;
mod segment;

pub use arc::CircularArc;
pub use function::{BoundaryFn, FnBoundary};
pub use nurbs::NurbsCurve;
pub use segment::Segment;

use std::sync::Arc;

use crate::math::{VectorN, PARAM_MAX, PARAM_MIN};

/// A boundary curve of a transfinite region, parametrized over `[-1, 1]`.
///
/// Implementations supply both the position and its analytic derivative;
/// the mapping never differentiates numerically, so the two must agree.
/// Evaluation outside `[-1, 1]` should extrapolate smoothly where the
/// curve family allows it.
pub trait Boundary<const D: usize>: Send + Sync {
    /// Evaluates the curve at parameter `t`.
    fn position(&self, t: f64) -> VectorN<D>;

    /// Evaluates `dX/dt` at parameter `t`.
    fn derivative(&self, t: f64) -> VectorN<D>;

    /// Returns the start and end points, `X(-1)` and `X(+1)`.
    fn endpoints(&self) -> (VectorN<D>, VectorN<D>) {
        (self.position(PARAM_MIN), self.position(PARAM_MAX))
    }
}

impl<const D: usize, B: Boundary<D> + ?Sized> Boundary<D> for Box<B> {
    fn position(&self, t: f64) -> VectorN<D> {
        (**self).position(t)
    }

    fn derivative(&self, t: f64) -> VectorN<D> {
        (**self).derivative(t)
    }
}

impl<const D: usize, B: Boundary<D> + ?Sized> Boundary<D> for Arc<B> {
    fn position(&self, t: f64) -> VectorN<D> {
        (**self).position(t)
    }

    fn derivative(&self, t: f64) -> VectorN<D> {
        (**self).derivative(t)
    }
}
