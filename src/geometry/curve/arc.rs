use std::fmt;

use crate::error::{GeometryError, Result};
use crate::geometry::{Circle, Line, Point};
use crate::math::{Decimal, DEGENERATE_TOLERANCE};

/// A circular arc through a start, a middle, and an end point.
///
/// The supporting circle is derived once, on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    start: Point,
    middle: Point,
    end: Point,
    circle: Circle,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateCurve`] if the three points are collinear.
    pub fn new(start: Point, middle: Point, end: Point) -> Result<Self> {
        let circle = Self::circumcircle(&start, &middle, &end)?;
        Ok(Self {
            start,
            middle,
            end,
            circle,
        })
    }

    /// The unique circle through three non-collinear points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateCurve`] when the determinant of the
    /// three-point system is within `1e-6` of zero.
    pub fn circumcircle(a: &Point, b: &Point, c: &Point) -> Result<Circle> {
        let det = (a.x - b.x) * (b.y - c.y) - (b.x - c.x) * (a.y - b.y);
        if det.abs() < DEGENERATE_TOLERANCE {
            return Err(GeometryError::DegenerateCurve(format!(
                "points {a}, {b} and {c} are collinear"
            ))
            .into());
        }

        let mid_sq = b.x * b.x + b.y * b.y;
        let ab = (a.x * a.x + a.y * a.y - mid_sq) / Decimal::TWO;
        let bc = (mid_sq - c.x * c.x - c.y * c.y) / Decimal::TWO;

        let x0 = (ab * (b.y - c.y) - bc * (a.y - b.y)) / det;
        let y0 = ((a.x - b.x) * bc - (b.x - c.x) * ab) / det;
        let center = Point::new(x0, y0);
        Circle::new(center, center.distance(a))
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.start
    }

    /// Returns the middle point.
    #[must_use]
    pub fn middle(&self) -> &Point {
        &self.middle
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// Returns the supporting circle.
    #[must_use]
    pub fn as_circle(&self) -> &Circle {
        &self.circle
    }

    /// Tangent line at a point of the supporting circle.
    ///
    /// # Errors
    ///
    /// Returns an error if `point` is the circle center.
    pub fn tangent_at(&self, point: &Point) -> Result<Line> {
        self.circle.tangent_at(point)
    }

    /// Tangent line at the start point.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed arc; kept fallible to mirror [`Circle::tangent_at`].
    pub fn start_tangent(&self) -> Result<Line> {
        self.tangent_at(&self.start)
    }

    /// Tangent line at the end point.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed arc; kept fallible to mirror [`Circle::tangent_at`].
    pub fn end_tangent(&self) -> Result<Line> {
        self.tangent_at(&self.end)
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {} ~ {}", self.start, self.middle, self.end)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KimuError;
    use crate::math::TOLERANCE;
    use rust_decimal_macros::dec;

    fn p(x: Decimal, y: Decimal) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn quarter_arc_of_unit_circle() {
        let arc = Arc::new(p(dec!(1), dec!(0)), p(dec!(0), dec!(1)), p(dec!(-1), dec!(0))).unwrap();
        let circle = arc.as_circle();
        assert!(circle.center().approx_eq(&p(dec!(0), dec!(0))));
        assert!((circle.radius() - dec!(1)).abs() < TOLERANCE);
    }

    #[test]
    fn offset_circle_recovered() {
        // Points on the circle centered at (3, -2) with radius 5.
        let arc = Arc::new(p(dec!(8), dec!(-2)), p(dec!(6), dec!(2)), p(dec!(3), dec!(3))).unwrap();
        let circle = arc.as_circle();
        assert!(circle.center().approx_eq(&p(dec!(3), dec!(-2))));
        assert!((circle.radius() - dec!(5)).abs() < TOLERANCE);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let err = Arc::new(p(dec!(0), dec!(0)), p(dec!(1), dec!(1)), p(dec!(2), dec!(2)))
            .unwrap_err();
        assert!(matches!(
            err,
            KimuError::Geometry(GeometryError::DegenerateCurve(_))
        ));
    }

    #[test]
    fn end_tangents_touch_endpoints() {
        let arc = Arc::new(p(dec!(1), dec!(0)), p(dec!(0), dec!(1)), p(dec!(-1), dec!(0))).unwrap();
        let start = arc.start_tangent().unwrap();
        let end = arc.end_tangent().unwrap();
        assert_eq!(*start.start(), p(dec!(1), dec!(0)));
        assert!(start.slope().is_none());
        assert!(end.slope().is_none());
    }
}
