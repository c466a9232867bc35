use crate::error::{GeometryError, Result};
use crate::math::VectorN;

use super::Boundary;

/// A rational B-spline (NURBS) curve used as a transfinite boundary.
///
/// The curve is evaluated in its own knot parameter `u`; as a [`Boundary`]
/// the canonical parameter `t in [-1, 1]` is mapped affinely onto the knot
/// domain `[knots[p], knots[n + 1]]`, and derivatives carry the matching
/// chain-rule factor.
#[derive(Debug, Clone)]
pub struct NurbsCurve<const D: usize> {
    degree: usize,
    knots: Vec<f64>,
    control_points: Vec<VectorN<D>>,
    weights: Vec<f64>,
}

impl<const D: usize> NurbsCurve<D> {
    /// Creates a new NURBS curve.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than `degree + 1` control points,
    /// the knot vector has the wrong length, holds a non-finite value,
    /// decreases, or spans an empty domain, or a weight is missing, zero,
    /// negative or non-finite.
    pub fn new(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<VectorN<D>>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let count = control_points.len();
        if count < degree + 1 {
            return Err(GeometryError::Degenerate(format!(
                "degree {degree} needs at least {} control points, got {count}",
                degree + 1
            ))
            .into());
        }
        if weights.len() != count {
            return Err(GeometryError::WeightCountMismatch {
                control_points: count,
                weights: weights.len(),
            }
            .into());
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(GeometryError::NonPositiveWeight { index, value }.into());
        }
        if knots.len() != count + degree + 1 {
            return Err(GeometryError::InvalidKnots(format!(
                "expected {} knots, got {}",
                count + degree + 1,
                knots.len()
            ))
            .into());
        }
        if knots.iter().any(|k| !k.is_finite()) {
            return Err(GeometryError::InvalidKnots("knots must be finite".into()).into());
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(GeometryError::InvalidKnots("knots must be non-decreasing".into()).into());
        }
        if knots[count] <= knots[degree] {
            return Err(GeometryError::InvalidKnots("empty parameter domain".into()).into());
        }

        tracing::trace!(degree, control_points = count, "nurbs boundary");
        Ok(Self {
            degree,
            knots,
            control_points,
            weights,
        })
    }

    /// Creates a non-rational B-spline (all weights one).
    ///
    /// # Errors
    ///
    /// Same conditions as [`NurbsCurve::new`].
    pub fn bspline(degree: usize, knots: Vec<f64>, control_points: Vec<VectorN<D>>) -> Result<Self> {
        let weights = vec![1.0; control_points.len()];
        Self::new(degree, knots, control_points, weights)
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[VectorN<D>] {
        &self.control_points
    }

    /// Returns the knot-parameter domain `(u_min, u_max)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[self.degree], self.knots[self.control_points.len()])
    }

    /// Evaluates the curve at knot parameter `u`.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> VectorN<D> {
        let span = self.find_span(u);
        let basis = basis_funs(span, u, self.degree, &self.knots);

        let mut numerator = VectorN::<D>::zeros();
        let mut denominator = 0.0;
        for (j, n) in basis.iter().enumerate() {
            let idx = span - self.degree + j;
            let nw = n * self.weights[idx];
            numerator += self.control_points[idx] * nw;
            denominator += nw;
        }
        numerator / denominator
    }

    /// Evaluates the curve and `dC/du` at knot parameter `u`.
    ///
    /// With `A = sum(N_i w_i P_i)` and `W = sum(N_i w_i)`, the quotient rule
    /// gives `C' = (A' - W' C) / W`.
    #[must_use]
    pub fn evaluate_with_derivative(&self, u: f64) -> (VectorN<D>, VectorN<D>) {
        let span = self.find_span(u);
        let (basis, slopes) = basis_with_derivatives(span, u, self.degree, &self.knots);

        let mut a = VectorN::<D>::zeros();
        let mut da = VectorN::<D>::zeros();
        let mut w = 0.0;
        let mut dw = 0.0;
        for j in 0..=self.degree {
            let idx = span - self.degree + j;
            let wi = self.weights[idx];
            a += self.control_points[idx] * (basis[j] * wi);
            da += self.control_points[idx] * (slopes[j] * wi);
            w += basis[j] * wi;
            dw += slopes[j] * wi;
        }

        let point = a / w;
        let derivative = (da - point * dw) / w;
        (point, derivative)
    }

    fn to_knot_param(&self, t: f64) -> f64 {
        let (lo, hi) = self.domain();
        lo + 0.5 * (1.0 + t) * (hi - lo)
    }

    fn find_span(&self, u: f64) -> usize {
        find_span(self.control_points.len() - 1, self.degree, u, &self.knots)
    }
}

impl<const D: usize> Boundary<D> for NurbsCurve<D> {
    fn position(&self, t: f64) -> VectorN<D> {
        self.evaluate(self.to_knot_param(t))
    }

    fn derivative(&self, t: f64) -> VectorN<D> {
        let (lo, hi) = self.domain();
        let (_, dc_du) = self.evaluate_with_derivative(self.to_knot_param(t));
        dc_du * (0.5 * (hi - lo))
    }
}

/// Finds the knot span index `i` with `knots[i] <= u < knots[i + 1]`,
/// clamped to `[p, n]`. `n` is the index of the last control point.
/// Piegl & Tiller, The NURBS Book, algorithm A2.1.
fn find_span(n: usize, p: usize, u: f64, knots: &[f64]) -> usize {
    if u >= knots[n + 1] {
        return n;
    }
    if u <= knots[p] {
        return p;
    }

    let mut lo = p;
    let mut hi = n + 1;
    let mut mid = (lo + hi) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
        mid = (lo + hi) / 2;
    }
    mid
}

/// Non-zero basis functions `N[span - p ..= span]` of degree `p` at `u`
/// (Cox-de Boor triangle). The NURBS Book, algorithm A2.2.
fn basis_funs(span: usize, u: f64, p: usize, knots: &[f64]) -> Vec<f64> {
    let mut n = vec![0.0; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];
    n[0] = 1.0;

    for j in 1..=p {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Basis functions and their first derivatives over the same span.
///
/// `N'_{i,p} = p * (N_{i,p-1} / (k[i+p] - k[i]) - N_{i+1,p-1} / (k[i+p+1] - k[i+1]))`,
/// with terms over a zero-width knot interval dropped.
#[allow(clippy::cast_precision_loss)]
fn basis_with_derivatives(span: usize, u: f64, p: usize, knots: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let values = basis_funs(span, u, p, knots);
    let mut slopes = vec![0.0; p + 1];
    if p == 0 {
        return (values, slopes);
    }

    // lower[m] = N_{span - p + 1 + m, p - 1}
    let lower = basis_funs(span, u, p - 1, knots);
    let pf = p as f64;
    for (j, slope) in slopes.iter_mut().enumerate() {
        let i = span - p + j;
        let mut d = 0.0;
        if j >= 1 {
            let width = knots[i + p] - knots[i];
            if width > 0.0 {
                d += pf * lower[j - 1] / width;
            }
        }
        if j < p {
            let width = knots[i + p + 1] - knots[i + 1];
            if width > 0.0 {
                d -= pf * lower[j] / width;
            }
        }
        *slope = d;
    }
    (values, slopes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TransfiniteError;
    use crate::math::diff::central_derivative;
    use crate::math::Vector2;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_1_SQRT_2;

    fn quarter_circle() -> NurbsCurve<2> {
        NurbsCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            vec![1.0, FRAC_1_SQRT_2, 1.0],
        )
        .unwrap()
    }

    fn wavy_cubic() -> NurbsCurve<2> {
        NurbsCurve::new(
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.8),
                Vector2::new(2.0, -0.6),
                Vector2::new(3.0, 0.0),
            ],
            vec![1.0, 2.0, 0.5, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn rational_quadratic_is_exact_circle() {
        let c = quarter_circle();
        for i in 0..=10 {
            let u = f64::from(i) / 10.0;
            assert_relative_eq!(c.evaluate(u).norm(), 1.0, epsilon = 1e-14);
        }
        assert_abs_diff_eq!(c.evaluate(0.0), Vector2::new(1.0, 0.0), epsilon = 1e-15);
        assert_abs_diff_eq!(c.evaluate(1.0), Vector2::new(0.0, 1.0), epsilon = 1e-15);
    }

    #[test]
    fn boundary_endpoints_are_clamped_control_points() {
        let c = wavy_cubic();
        assert_abs_diff_eq!(c.position(-1.0), Vector2::new(0.0, 0.0), epsilon = 1e-15);
        assert_abs_diff_eq!(c.position(1.0), Vector2::new(3.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn knot_derivative_matches_finite_difference() {
        let c = wavy_cubic();
        for i in 0..=8 {
            let u = f64::from(i) / 8.0;
            let (p, d) = c.evaluate_with_derivative(u);
            assert_abs_diff_eq!(p, c.evaluate(u), epsilon = 1e-14);
            let numeric = central_derivative(|u| c.evaluate(u), u, 1e-4);
            assert_abs_diff_eq!(numeric, d, epsilon = 1e-8);
        }
    }

    #[test]
    fn boundary_derivative_carries_domain_scale() {
        let c = NurbsCurve::bspline(
            2,
            vec![0.0, 0.0, 0.0, 4.0, 4.0, 4.0],
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 2.0),
                Vector2::new(2.0, 0.0),
            ],
        )
        .unwrap();
        for &t in &[-1.0, -0.4, 0.0, 0.6, 1.0] {
            let numeric = central_derivative(|t| c.position(t), t, 1e-3);
            assert_abs_diff_eq!(numeric, c.derivative(t), epsilon = 1e-10);
        }
    }

    #[test]
    fn interior_knot_span_lookup() {
        let c = NurbsCurve::bspline(
            1,
            vec![0.0, 0.0, 0.5, 1.0, 1.0],
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(2.0, 0.0),
            ],
        )
        .unwrap();
        assert_abs_diff_eq!(c.evaluate(0.25), Vector2::new(0.5, 0.5), epsilon = 1e-15);
        assert_abs_diff_eq!(c.evaluate(0.75), Vector2::new(1.5, 0.5), epsilon = 1e-15);
        let (_, d) = c.evaluate_with_derivative(0.75);
        assert_abs_diff_eq!(d, Vector2::new(2.0, -2.0), epsilon = 1e-14);
    }

    #[test]
    fn rejects_bad_input() {
        let pts = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)];
        assert!(NurbsCurve::bspline(1, vec![0.0, 0.0, 1.0], pts.clone()).is_err());
        assert!(NurbsCurve::bspline(1, vec![0.0, 1.0, 0.5, 1.0], pts.clone()).is_err());
        assert!(NurbsCurve::bspline(1, vec![0.0, 0.0, 0.0, 0.0], pts.clone()).is_err());
        assert!(NurbsCurve::new(1, vec![0.0, 0.0, 1.0, 1.0], pts.clone(), vec![1.0]).is_err());
        assert!(NurbsCurve::new(1, vec![0.0, 0.0, 1.0, 1.0], pts.clone(), vec![1.0, 0.0]).is_err());
        assert!(NurbsCurve::bspline(2, vec![0.0; 5], pts).is_err());
    }

    #[test]
    fn rejects_non_finite_input() {
        let pts = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)];
        let knots = vec![0.0, 0.0, 1.0, 1.0];
        for w in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                NurbsCurve::new(1, knots.clone(), pts.clone(), vec![1.0, w]),
                Err(TransfiniteError::Geometry(GeometryError::NonPositiveWeight { index: 1, .. }))
            ));
        }
        assert!(matches!(
            NurbsCurve::bspline(1, vec![0.0, 0.0, f64::NAN, 1.0], pts.clone()),
            Err(TransfiniteError::Geometry(GeometryError::InvalidKnots(_)))
        ));
        assert!(NurbsCurve::bspline(1, vec![0.0, 0.0, 1.0, f64::INFINITY], pts).is_err());
    }
}
