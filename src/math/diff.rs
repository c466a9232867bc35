//! Centered finite-difference helpers.
//!
//! Used to verify analytic derivatives of boundaries and mappings. The
//! five-point stencil is fourth-order accurate, so a step of `1e-3` leaves a
//! truncation error well below `1e-9` for smooth functions.

use nalgebra::{SMatrix, SVector};

/// Five-point centered derivative of a vector-valued function of one variable.
#[must_use]
pub fn central_derivative<const D: usize, F>(f: F, t: f64, h: f64) -> SVector<f64, D>
where
    F: Fn(f64) -> SVector<f64, D>,
{
    let fm2 = f(t - 2.0 * h);
    let fm1 = f(t - h);
    let fp1 = f(t + h);
    let fp2 = f(t + 2.0 * h);
    (fm2 - fp2 + (fp1 - fm1) * 8.0) / (12.0 * h)
}

/// Five-point centered Jacobian of a map `R^N -> R^D`.
///
/// Column `j` approximates `df/du_j`.
#[must_use]
pub fn central_jacobian<const D: usize, const N: usize, F>(
    f: F,
    u: [f64; N],
    h: f64,
) -> SMatrix<f64, D, N>
where
    F: Fn([f64; N]) -> SVector<f64, D>,
{
    let mut jacobian = SMatrix::<f64, D, N>::zeros();
    for j in 0..N {
        let column = central_derivative(
            |t| {
                let mut shifted = u;
                shifted[j] = t;
                f(shifted)
            },
            u[j],
            h,
        );
        jacobian.set_column(j, &column);
    }
    jacobian
}
