use std::fmt;

use crate::math::VectorN;

use super::Boundary;

/// Boxed vector-valued function of the boundary parameter.
pub type BoundaryFn<const D: usize> = Box<dyn Fn(f64) -> VectorN<D> + Send + Sync>;

/// A boundary backed by a pair of closures: one for the position and one
/// for its derivative.
///
/// The closures must describe the same curve; nothing here checks that.
pub struct FnBoundary<P, Q> {
    position: P,
    derivative: Q,
}

impl<P, Q> FnBoundary<P, Q> {
    /// Wraps a position closure and its derivative.
    #[must_use]
    pub fn new(position: P, derivative: Q) -> Self {
        Self {
            position,
            derivative,
        }
    }
}

impl<P, Q> fmt::Debug for FnBoundary<P, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBoundary").finish_non_exhaustive()
    }
}

impl<const D: usize, P, Q> Boundary<D> for FnBoundary<P, Q>
where
    P: Fn(f64) -> VectorN<D> + Send + Sync,
    Q: Fn(f64) -> VectorN<D> + Send + Sync,
{
    fn position(&self, t: f64) -> VectorN<D> {
        (self.position)(t)
    }

    fn derivative(&self, t: f64) -> VectorN<D> {
        (self.derivative)(t)
    }
}
