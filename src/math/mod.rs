pub mod diff;

/// Fixed-size vector in `D`-dimensional physical space.
pub type VectorN<const D: usize> = nalgebra::SVector<f64, D>;

/// Jacobian of a two-parameter mapping into `D`-dimensional space.
///
/// Column `j` holds `dx/du_j`.
pub type Jacobian<const D: usize> = nalgebra::SMatrix<f64, D, 2>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x2 matrix, the partial derivatives of a surface patch in 3D.
pub type Matrix3x2 = nalgebra::Matrix3x2<f64>;

/// 3x3 matrix, the Jacobian of a volume mapping.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Lower end of the canonical parameter interval.
pub const PARAM_MIN: f64 = -1.0;

/// Upper end of the canonical parameter interval.
pub const PARAM_MAX: f64 = 1.0;

/// Linear blending weights `[(1 - t) / 2, (1 + t) / 2]` on `[-1, 1]`.
#[must_use]
pub fn blend(t: f64) -> [f64; 2] {
    [0.5 * (1.0 - t), 0.5 * (1.0 + t)]
}

/// Derivatives of [`blend`] with respect to `t`.
pub const BLEND_SLOPE: [f64; 2] = [-0.5, 0.5];

/// Returns `n` evenly spaced values from `start` to `end` inclusive.
///
/// The last entry is exactly `end`. `n == 1` yields `[start]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Area scale factor `sqrt(det(J^T J))` of a two-parameter mapping.
///
/// Equals `|det J|` in 2D and the length of `dx/dr x dx/ds` in 3D.
#[must_use]
pub fn area_element<const D: usize>(jacobian: &Jacobian<D>) -> f64 {
    let metric = jacobian.transpose() * jacobian;
    metric.determinant().max(0.0).sqrt()
}

/// Signed determinant of a planar Jacobian. Negative values mean the
/// mapping is locally inverted.
#[must_use]
pub fn signed_area_element(jacobian: &Jacobian<2>) -> f64 {
    jacobian.determinant()
}
