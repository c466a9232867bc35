use std::fmt;

use crate::error::{MappingError, Result};
use crate::geometry::surface::BoundarySurface;
use crate::math::{blend, Matrix3, Vector3, BLEND_SLOPE, PARAM_MAX, PARAM_MIN};

/// Number of bounding faces of a volume mapping.
pub const FACE_COUNT: usize = 6;

const SIDES: [f64; 2] = [PARAM_MIN, PARAM_MAX];

/// Transfinite (Gordon-Hall) mapping from `[-1, 1]³` into space, bounded by
/// six surfaces.
///
/// Faces are ordered `[xi=-1, xi=1, eta=-1, eta=1, zeta=-1, zeta=1]` and each
/// is parametrized by the two remaining coordinates in increasing axis
/// order (see [`BoundarySurface`]). With `phi0(t) = (1 - t) / 2` and
/// `phi1(t) = (1 + t) / 2` the interpolant is
///
/// ```text
/// x = sum_f  sum_i     phi_i(u_f) F_{f,i}
///   - sum_m  sum_{i,j} phi_i(u_f) phi_j(u_n) E_{m,i,j}(u_m)    f = m+1, n = m+2 (mod 3)
///   + sum_{i,j,k}      phi_i(xi) phi_j(eta) phi_k(zeta) V_{ijk}
/// ```
///
/// The edge running along axis `m` is read from the face normal to axis
/// `m + 1 (mod 3)`; vertices are read from the two `xi` faces. Like the
/// two-parameter mapping, nothing checks that adjacent faces agree.
pub struct TransfiniteVolume {
    faces: [Box<dyn BoundarySurface>; FACE_COUNT],
    corners: [Vector3; 8],
}

impl TransfiniteVolume {
    /// Creates a volume mapping from six faces.
    ///
    /// # Errors
    ///
    /// Returns an error if `faces` does not hold exactly six entries.
    pub fn new(faces: Vec<Box<dyn BoundarySurface>>) -> Result<Self> {
        let faces: [Box<dyn BoundarySurface>; FACE_COUNT] =
            faces.try_into().map_err(|f: Vec<_>| MappingError::BoundaryCount {
                expected: FACE_COUNT,
                found: f.len(),
            })?;
        let corners = std::array::from_fn(|v| {
            let (i, j, k) = vertex_sides(v);
            faces[i].position(SIDES[j], SIDES[k])
        });
        tracing::debug!(?corners, "built transfinite volume");
        Ok(Self { faces, corners })
    }

    /// Returns the eight vertices, indexed `i + 2 j + 4 k` where `i, j, k`
    /// select the `-1` (0) or `+1` (1) side along `xi, eta, zeta`.
    #[must_use]
    pub fn corners(&self) -> &[Vector3; 8] {
        &self.corners
    }

    /// Returns the face normal to `axis` on `side` (0 for `-1`, 1 for `+1`).
    #[must_use]
    pub fn face(&self, axis: usize, side: usize) -> Option<&dyn BoundarySurface> {
        if side > 1 {
            return None;
        }
        self.faces.get(2 * axis + side).map(|f| &**f)
    }

    /// Evaluates the physical point at `u = [xi, eta, zeta]`.
    #[must_use]
    pub fn point(&self, u: [f64; 3]) -> Vector3 {
        let w = u.map(blend);
        let mut x = Vector3::zeros();

        for f in 0..3 {
            let (a, b) = face_params(f, u);
            for i in 0..2 {
                x += self.faces[2 * f + i].position(a, b) * w[f][i];
            }
        }

        for m in 0..3 {
            let (f, n) = edge_carrier(m);
            for i in 0..2 {
                for j in 0..2 {
                    let (a, b) = edge_params(m, u, j);
                    x -= self.faces[2 * f + i].position(a, b) * (w[f][i] * w[n][j]);
                }
            }
        }

        for (v, c) in self.corners.iter().enumerate() {
            let (i, j, k) = vertex_sides(v);
            x += c * (w[0][i] * w[1][j] * w[2][k]);
        }
        x
    }

    /// Evaluates the 3x3 Jacobian `J[i][j] = dx_i/du_j` and the point at `u`.
    #[must_use]
    pub fn derivs(&self, u: [f64; 3]) -> (Matrix3, Vector3) {
        let w = u.map(blend);
        let dw = BLEND_SLOPE;
        let mut x = Vector3::zeros();
        let mut cols = [Vector3::zeros(); 3];

        for f in 0..3 {
            let (a, b) = face_params(f, u);
            for i in 0..2 {
                let face = &self.faces[2 * f + i];
                let pos = face.position(a, b);
                let d = face.derivatives(a, b);
                x += pos * w[f][i];
                for (axis, col) in cols.iter_mut().enumerate() {
                    if axis == f {
                        *col += pos * dw[i];
                    } else {
                        *col += d.column(face_column(f, axis)) * w[f][i];
                    }
                }
            }
        }

        for m in 0..3 {
            let (f, n) = edge_carrier(m);
            for i in 0..2 {
                for j in 0..2 {
                    let (a, b) = edge_params(m, u, j);
                    let face = &self.faces[2 * f + i];
                    let e = face.position(a, b);
                    let de = face.derivatives(a, b).column(face_column(f, m)).into_owned();
                    let weight = w[f][i] * w[n][j];
                    x -= e * weight;
                    cols[f] -= e * (dw[i] * w[n][j]);
                    cols[n] -= e * (w[f][i] * dw[j]);
                    cols[m] -= de * weight;
                }
            }
        }

        for (v, c) in self.corners.iter().enumerate() {
            let (i, j, k) = vertex_sides(v);
            x += c * (w[0][i] * w[1][j] * w[2][k]);
            cols[0] += c * (dw[i] * w[1][j] * w[2][k]);
            cols[1] += c * (w[0][i] * dw[j] * w[2][k]);
            cols[2] += c * (w[0][i] * w[1][j] * dw[k]);
        }

        (Matrix3::from_columns(&cols), x)
    }

    /// Evaluates only the Jacobian at `u`.
    #[must_use]
    pub fn jacobian(&self, u: [f64; 3]) -> Matrix3 {
        self.derivs(u).0
    }
}

impl fmt::Debug for TransfiniteVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransfiniteVolume")
            .field("corners", &self.corners)
            .finish_non_exhaustive()
    }
}

/// Sides `(i, j, k)` of vertex `v = i + 2 j + 4 k`.
fn vertex_sides(v: usize) -> (usize, usize, usize) {
    (v & 1, (v >> 1) & 1, (v >> 2) & 1)
}

/// Parameters of the face normal to `axis` at the volume point `u`.
fn face_params(axis: usize, u: [f64; 3]) -> (f64, f64) {
    match axis {
        0 => (u[1], u[2]),
        1 => (u[0], u[2]),
        _ => (u[0], u[1]),
    }
}

/// Column of the face-normal-to-`axis` derivative matrix that holds the
/// derivative along volume axis `along`.
fn face_column(axis: usize, along: usize) -> usize {
    if along < axis {
        along
    } else {
        along - 1
    }
}

/// Face axis `f` carrying the edges along `m`, and the axis `n` held fixed
/// on that face.
fn edge_carrier(m: usize) -> (usize, usize) {
    ((m + 1) % 3, (m + 2) % 3)
}

/// Face parameters of the edge along `m` at side `j` of its fixed axis.
fn edge_params(m: usize, u: [f64; 3], j: usize) -> (f64, f64) {
    let (f, n) = edge_carrier(m);
    let mut p = u;
    p[n] = SIDES[j];
    face_params(f, p)
}
