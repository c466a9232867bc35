use crate::error::{GeometryError, Result};
use crate::math::{Vector2, VectorN, TOLERANCE};

use super::Boundary;

/// A circular arc, swept from `start_angle` to `end_angle` as `t` runs
/// over `[-1, 1]`.
///
/// `X(t) = center + radius * (cos(theta) * x_axis + sin(theta) * y_axis)`
/// with `theta = start_angle + (1 + t) / 2 * (end_angle - start_angle)`.
#[derive(Debug, Clone)]
pub struct CircularArc<const D: usize> {
    center: VectorN<D>,
    radius: f64,
    x_axis: VectorN<D>,
    y_axis: VectorN<D>,
    start_angle: f64,
    end_angle: f64,
}

impl<const D: usize> CircularArc<D> {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `x_axis` - Direction of angle 0 (normalized)
    /// * `y_axis` - Direction of angle pi/2 (normalized, must be perpendicular to `x_axis`)
    /// * `start_angle` - Angle at `t = -1`, in radians
    /// * `end_angle` - Angle at `t = 1`, in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, an axis is
    /// zero-length, the axes are not perpendicular, or the sweep is empty.
    pub fn new(
        center: VectorN<D>,
        radius: f64,
        x_axis: VectorN<D>,
        y_axis: VectorN<D>,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }

        let x_len = x_axis.norm();
        let y_len = y_axis.norm();
        if x_len < TOLERANCE || y_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let x_axis = x_axis / x_len;
        let y_axis = y_axis / y_len;

        if x_axis.dot(&y_axis).abs() > TOLERANCE {
            return Err(
                GeometryError::Degenerate("arc axes must be perpendicular".into()).into(),
            );
        }
        if (end_angle - start_angle).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep is empty".into()).into());
        }

        tracing::trace!(radius, start_angle, end_angle, "arc boundary");
        Ok(Self {
            center,
            radius,
            x_axis,
            y_axis,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &VectorN<D> {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed sweep angle `end_angle - start_angle`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    fn angle(&self, t: f64) -> f64 {
        self.start_angle + 0.5 * (1.0 + t) * self.sweep()
    }
}

impl CircularArc<2> {
    /// Creates an arc in the plane using the standard axes.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the sweep is empty.
    pub fn planar(center: Vector2, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        Self::new(center, radius, Vector2::x(), Vector2::y(), start_angle, end_angle)
    }
}

impl<const D: usize> Boundary<D> for CircularArc<D> {
    fn position(&self, t: f64) -> VectorN<D> {
        let theta = self.angle(t);
        self.center
            + self.x_axis * (self.radius * theta.cos())
            + self.y_axis * (self.radius * theta.sin())
    }

    fn derivative(&self, t: f64) -> VectorN<D> {
        let theta = self.angle(t);
        let dtheta_dt = 0.5 * self.sweep();
        (self.x_axis * (-self.radius * theta.sin()) + self.y_axis * (self.radius * theta.cos()))
            * dtheta_dt
    }
}
