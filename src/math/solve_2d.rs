//! The two construction shapes every workflow step reduces to.
//!
//! Both return an [`Intersection`] so callers handle zero, one, or two roots
//! the same way they handle a pairwise solve.

use crate::error::Result;
use crate::geometry::{Circle, Line, Point};

use super::intersect_2d::{intersect_circle_line, Intersection};
use super::{hypot, Decimal};

/// Points on `line` at `distance` from `reference`.
///
/// Solved as the intersection of the line with the circle of radius
/// `distance` around `reference`. When `reference` lies on the line the two
/// roots are `reference ± distance` along the line, forward root first.
///
/// # Errors
///
/// Returns an error if `distance` is negative or its square leaves the
/// decimal range.
pub fn points_at_distance_on_line(
    line: &Line,
    reference: &Point,
    distance: Decimal,
) -> Result<Intersection> {
    let circle = Circle::new(*reference, distance)?;
    intersect_circle_line(&circle, line)
}

/// Points on the perpendicular to `line` through `through`, at `distance`.
///
/// Option 1 lies on the left of the line direction, option 2 on the right.
/// A zero distance yields `through` itself.
#[must_use]
pub fn points_on_perpendicular(line: &Line, through: &Point, distance: Decimal) -> Intersection {
    if distance.is_zero() {
        return Intersection::Single(*through);
    }
    let (dx, dy) = line.delta();
    let len = hypot(dx, dy);
    let nx = -dy * distance / len;
    let ny = dx * distance / len;
    Intersection::Pair(through.offset(nx, ny), through.offset(-nx, -ny))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn p(x: Decimal, y: Decimal) -> Point {
        Point::new(x, y)
    }

    fn close(a: &Point, b: &Point) -> bool {
        a.distance(b) < dec!(0.000000001)
    }

    #[test]
    fn distance_along_diagonal() {
        let line = Line::new(p(dec!(0), dec!(0)), p(dec!(6), dec!(8))).unwrap();
        let hit = points_at_distance_on_line(&line, &p(dec!(0), dec!(0)), dec!(5)).unwrap();
        let pts = hit.points();
        assert_eq!(pts.len(), 2);
        assert!(close(&pts[0], &p(dec!(3), dec!(4))), "forward={}", pts[0]);
        assert!(close(&pts[1], &p(dec!(-3), dec!(-4))), "backward={}", pts[1]);
    }

    #[test]
    fn distance_from_point_off_line() {
        let line = Line::new(p(dec!(0), dec!(0)), p(dec!(10), dec!(0))).unwrap();
        let hit = points_at_distance_on_line(&line, &p(dec!(5), dec!(3)), dec!(5)).unwrap();
        let pts = hit.points();
        assert!(close(&pts[0], &p(dec!(9), dec!(0))));
        assert!(close(&pts[1], &p(dec!(1), dec!(0))));
    }

    #[test]
    fn negative_distance_rejected() {
        let line = Line::new(p(dec!(0), dec!(0)), p(dec!(1), dec!(0))).unwrap();
        assert!(points_at_distance_on_line(&line, &p(dec!(0), dec!(0)), dec!(-1)).is_err());
    }

    #[test]
    fn perpendicular_left_then_right() {
        let line = Line::new(p(dec!(0), dec!(0)), p(dec!(10), dec!(0))).unwrap();
        let hit = points_on_perpendicular(&line, &p(dec!(4), dec!(0)), dec!(2));
        let pts = hit.points();
        assert!(close(&pts[0], &p(dec!(4), dec!(2))));
        assert!(close(&pts[1], &p(dec!(4), dec!(-2))));
    }

    #[test]
    fn perpendicular_of_vertical_line() {
        let line = Line::new(p(dec!(1), dec!(0)), p(dec!(1), dec!(-3))).unwrap();
        let pts = points_on_perpendicular(&line, &p(dec!(1), dec!(-3)), dec!(4)).points();
        // Heading south, left is east.
        assert!(close(&pts[0], &p(dec!(5), dec!(-3))));
        assert!(close(&pts[1], &p(dec!(-3), dec!(-3))));
    }

    #[test]
    fn zero_perpendicular_offset_is_identity() {
        let line = Line::new(p(dec!(0), dec!(0)), p(dec!(1), dec!(1))).unwrap();
        let through = p(dec!(2), dec!(2));
        assert_eq!(
            points_on_perpendicular(&line, &through, Decimal::ZERO),
            Intersection::Single(through)
        );
    }
}
