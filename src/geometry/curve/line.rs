use std::fmt;

use crate::error::{GeometryError, Result};
use crate::geometry::Point;
use crate::math::{hypot, Decimal, TOLERANCE};

/// An infinite line through two distinct sample points.
///
/// The samples only fix position and direction; the line is not a segment.
/// Parametrically `P(t) = start + t * (end - start)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    /// Creates a new line through `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two sample points coincide.
    pub fn new(start: Point, end: Point) -> Result<Self> {
        if hypot(end.x - start.x, end.y - start.y) <= TOLERANCE {
            return Err(GeometryError::ZeroLength {
                x: start.x,
                y: start.y,
            }
            .into());
        }
        Ok(Self { start, end })
    }

    /// Returns the first sample point.
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.start
    }

    /// Returns the second sample point.
    #[must_use]
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// Returns `end - start` as `(dx, dy)`.
    #[must_use]
    pub fn delta(&self) -> (Decimal, Decimal) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// Distance between the two sample points.
    #[must_use]
    pub fn length(&self) -> Decimal {
        let (dx, dy) = self.delta();
        hypot(dx, dy)
    }

    /// Slope `dy / dx`, or `None` for a vertical line.
    #[must_use]
    pub fn slope(&self) -> Option<Decimal> {
        let (dx, dy) = self.delta();
        dy.checked_div(dx)
    }

    /// Whether two lines have the same direction (sine of the angle within [`TOLERANCE`]).
    ///
    /// Vertical lines need no special casing: the test uses the cross product
    /// of the direction vectors rather than slopes.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Line) -> bool {
        let (dx1, dy1) = self.delta();
        let (dx2, dy2) = other.delta();
        let cross = dx1 * dy2 - dy1 * dx2;
        cross.abs() <= TOLERANCE * self.length() * other.length()
    }

    /// Signed distance from `point` to the line; positive on the left of the direction.
    #[must_use]
    pub fn residual(&self, point: &Point) -> Decimal {
        let (dx, dy) = self.delta();
        let cross = dx * (point.y - self.start.y) - dy * (point.x - self.start.x);
        cross / self.length()
    }

    /// Whether `point` lies within `slack` of the line.
    #[must_use]
    pub fn contains(&self, point: &Point, slack: Decimal) -> bool {
        self.residual(point).abs() <= slack
    }

    /// Projection parameter of `point`: 0 at `start`, 1 at `end`.
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> Decimal {
        let (dx, dy) = self.delta();
        let dot = (point.x - self.start.x) * dx + (point.y - self.start.y) * dy;
        dot / (dx * dx + dy * dy)
    }

    /// Evaluates the line at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: Decimal) -> Point {
        let (dx, dy) = self.delta();
        Point::new(self.start.x + dx * t, self.start.y + dy * t)
    }

    /// Returns the line with its sample points swapped.
    #[must_use]
    pub fn reversed(&self) -> Line {
        Line {
            start: self.end,
            end: self.start,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
