use std::fmt;

use crate::math::{Matrix3x2, Vector3};

use super::BoundarySurface;

/// A face backed by a position closure and a closure returning its partial
/// derivatives.
pub struct FnSurface<P, Q> {
    position: P,
    derivatives: Q,
}

impl<P, Q> FnSurface<P, Q>
where
    P: Fn(f64, f64) -> Vector3 + Send + Sync,
    Q: Fn(f64, f64) -> Matrix3x2 + Send + Sync,
{
    /// Wraps a position closure and its derivative closure.
    #[must_use]
    pub fn new(position: P, derivatives: Q) -> Self {
        Self {
            position,
            derivatives,
        }
    }
}

impl<P, Q> fmt::Debug for FnSurface<P, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSurface").finish_non_exhaustive()
    }
}

impl<P, Q> BoundarySurface for FnSurface<P, Q>
where
    P: Fn(f64, f64) -> Vector3 + Send + Sync,
    Q: Fn(f64, f64) -> Matrix3x2 + Send + Sync,
{
    fn position(&self, a: f64, b: f64) -> Vector3 {
        (self.position)(a, b)
    }

    fn derivatives(&self, a: f64, b: f64) -> Matrix3x2 {
        (self.derivatives)(a, b)
    }
}
