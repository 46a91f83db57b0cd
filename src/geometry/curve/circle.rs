use std::fmt;

use crate::error::{GeometryError, Result};
use crate::geometry::{Line, Point};
use crate::math::Decimal;

/// A full circle given by its center and a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    center: Point,
    radius: Decimal,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// A zero radius is allowed; it degenerates to the center point.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative.
    pub fn new(center: Point, radius: Decimal) -> Result<Self> {
        if radius.is_sign_negative() && !radius.is_zero() {
            return Err(GeometryError::NegativeRadius(radius).into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> Decimal {
        self.radius
    }

    /// Line through `point` perpendicular to the radius at `point`.
    ///
    /// The point is not checked against the circle; callers pass points they
    /// already know to lie on it, such as the samples the circle came from.
    ///
    /// # Errors
    ///
    /// Returns an error if `point` is the center, where no radius direction exists.
    pub fn tangent_at(&self, point: &Point) -> Result<Line> {
        let rx = point.x - self.center.x;
        let ry = point.y - self.center.y;
        Line::new(*point, point.offset(-ry, rx))
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "center {}, r {}", self.center, self.radius.round_dp(3))
    }
}
