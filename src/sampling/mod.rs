mod sample_grid;

pub use sample_grid::SampleGrid;

use crate::math::{area_element, signed_area_element, Jacobian, VectorN};

/// Parameters controlling grid sampling.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Number of grid points along `r` (at least 2).
    pub r_points: usize,
    /// Number of grid points along `s` (at least 2).
    pub s_points: usize,
    /// Whether to evaluate the Jacobian at every grid point.
    pub with_jacobians: bool,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            r_points: 21,
            s_points: 21,
            with_jacobians: true,
        }
    }
}

/// A structured grid of mapped points.
///
/// Points are stored with `r` varying fastest: the point at grid index
/// `(i, j)` lives at `j * r_points + i`.
#[derive(Debug, Clone)]
pub struct MappedGrid<const D: usize> {
    r: Vec<f64>,
    s: Vec<f64>,
    points: Vec<VectorN<D>>,
    jacobians: Vec<Jacobian<D>>,
}

impl<const D: usize> MappedGrid<D> {
    /// Parameter values along `r`.
    #[must_use]
    pub fn r(&self) -> &[f64] {
        &self.r
    }

    /// Parameter values along `s`.
    #[must_use]
    pub fn s(&self) -> &[f64] {
        &self.s
    }

    /// All mapped points, `r` varying fastest.
    #[must_use]
    pub fn points(&self) -> &[VectorN<D>] {
        &self.points
    }

    /// Jacobians at each point; empty when not requested.
    #[must_use]
    pub fn jacobians(&self) -> &[Jacobian<D>] {
        &self.jacobians
    }

    /// Returns the point at grid index `(i, j)`.
    #[must_use]
    pub fn point(&self, i: usize, j: usize) -> Option<&VectorN<D>> {
        self.index(i, j).and_then(|k| self.points.get(k))
    }

    /// Returns the Jacobian at grid index `(i, j)`, if Jacobians were sampled.
    #[must_use]
    pub fn jacobian(&self, i: usize, j: usize) -> Option<&Jacobian<D>> {
        self.index(i, j).and_then(|k| self.jacobians.get(k))
    }

    /// Returns the grid line of constant `s` at index `j`.
    #[must_use]
    pub fn r_line(&self, j: usize) -> Option<&[VectorN<D>]> {
        let n = self.r.len();
        if j >= self.s.len() {
            return None;
        }
        self.points.get(j * n..(j + 1) * n)
    }

    /// Returns the grid line of constant `r` at index `i`.
    #[must_use]
    pub fn s_line(&self, i: usize) -> Option<Vec<VectorN<D>>> {
        (i < self.r.len()).then(|| self.points.iter().skip(i).step_by(self.r.len()).copied().collect())
    }

    /// Smallest area element over the sampled Jacobians.
    #[must_use]
    pub fn min_area_element(&self) -> Option<f64> {
        self.jacobians.iter().map(area_element).reduce(f64::min)
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.r.len() && j < self.s.len()).then(|| j * self.r.len() + i)
    }
}

impl MappedGrid<2> {
    /// Smallest signed Jacobian determinant. A negative value means the
    /// mapping folds over itself somewhere on the grid.
    #[must_use]
    pub fn min_determinant(&self) -> Option<f64> {
        self.jacobians.iter().map(signed_area_element).reduce(f64::min)
    }
}
