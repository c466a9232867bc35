mod bilinear;
mod function;

pub use bilinear::BilinearPatch;
pub use function::FnSurface;

use std::sync::Arc;

use crate::math::{Matrix3x2, Vector3};

/// A bounding face of a transfinite volume, parametrized over `[-1, 1]²`.
///
/// The face of the volume normal to axis `k` is parametrized by the two
/// remaining volume coordinates in increasing axis order, so the face at
/// `xi = const` takes `(eta, zeta)`, at `eta = const` takes `(xi, zeta)` and
/// at `zeta = const` takes `(xi, eta)`.
pub trait BoundarySurface: Send + Sync {
    /// Evaluates the surface at `(a, b)`.
    fn position(&self, a: f64, b: f64) -> Vector3;

    /// Evaluates the partial derivatives at `(a, b)`: column 0 is `dX/da`,
    /// column 1 is `dX/db`.
    fn derivatives(&self, a: f64, b: f64) -> Matrix3x2;
}

impl<S: BoundarySurface + ?Sized> BoundarySurface for Box<S> {
    fn position(&self, a: f64, b: f64) -> Vector3 {
        (**self).position(a, b)
    }

    fn derivatives(&self, a: f64, b: f64) -> Matrix3x2 {
        (**self).derivatives(a, b)
    }
}

impl<S: BoundarySurface + ?Sized> BoundarySurface for Arc<S> {
    fn position(&self, a: f64, b: f64) -> Vector3 {
        (**self).position(a, b)
    }

    fn derivatives(&self, a: f64, b: f64) -> Matrix3x2 {
        (**self).derivatives(a, b)
    }
}
