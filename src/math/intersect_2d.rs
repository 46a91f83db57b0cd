use crate::error::{GeometryError, Result};
use crate::geometry::{Circle, GeodeticObject, Line, Point};

use super::{checked_hypot, checked_square, sqrt, Decimal, TANGENCY_TOLERANCE, TOLERANCE};

/// Outcome of a pairwise solve.
///
/// `Empty` and `Coincident` are valid answers, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// No common point: parallel lines, disjoint circles, or a missed line.
    Empty,
    /// A single point, either a line/line crossing or a tangency.
    Single(Point),
    /// Two distinct points.
    Pair(Point, Point),
    /// Identical circles; every point is common, none is usable.
    Coincident,
}

impl Intersection {
    /// Returns the usable points in solver order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Intersection::Empty | Intersection::Coincident => Vec::new(),
            Intersection::Single(p) => vec![p],
            Intersection::Pair(p, q) => vec![p, q],
        }
    }

    /// Number of usable points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Intersection::Empty | Intersection::Coincident => 0,
            Intersection::Single(_) => 1,
            Intersection::Pair(..) => 2,
        }
    }

    /// Whether there is no usable point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Intersection of two infinite lines, in determinant form.
///
/// Parallel (and collinear) lines give [`Intersection::Empty`].
#[must_use]
pub fn intersect_line_line(l1: &Line, l2: &Line) -> Intersection {
    if l1.is_parallel_to(l2) {
        tracing::debug!(%l1, %l2, "lines are parallel");
        return Intersection::Empty;
    }
    let (d1x, d1y) = l1.delta();
    let (d2x, d2y) = l2.delta();
    let cross = d1x * d2y - d1y * d2x;

    let dx = l2.start().x - l1.start().x;
    let dy = l2.start().y - l1.start().y;
    let t = (dx * d2y - dy * d2x) / cross;
    Intersection::Single(l1.point_at(t))
}

/// Intersection of a circle with an infinite line.
///
/// Works from the signed distance of the center to the line and the foot of
/// the perpendicular, so intermediate values stay near `r²`. The half chord
/// is `sqrt(r² - dist²)`. A line whose distance from the center is within
/// [`TANGENCY_TOLERANCE`] of the radius touches in exactly one point. Two
/// roots are ordered along the line direction, forward root first.
///
/// # Errors
///
/// Returns [`GeometryError::Overflow`](crate::error::GeometryError::Overflow)
/// if `r²` leaves the decimal range.
pub fn intersect_circle_line(circle: &Circle, line: &Line) -> Result<Intersection> {
    let center = circle.center();
    let r = circle.radius();

    let distance = line.residual(center).abs();
    if distance > r + TANGENCY_TOLERANCE {
        tracing::debug!(%distance, radius = %r, "line misses circle");
        return Ok(Intersection::Empty);
    }

    let foot = line.point_at(line.parameter_of(center));
    if (distance - r).abs() <= TANGENCY_TOLERANCE {
        return Ok(Intersection::Single(foot));
    }

    let r_sq = checked_square(r, "radius squared")?;
    let half_chord = sqrt(r_sq - checked_square(distance, "distance squared")?)
        .unwrap_or(Decimal::ZERO);
    let (dx, dy) = line.delta();
    let len = line.length();
    let ox = half_chord * dx / len;
    let oy = half_chord * dy / len;
    Ok(Intersection::Pair(foot.offset(ox, oy), foot.offset(-ox, -oy)))
}

/// Intersection of two circles through the radical line.
///
/// Concentric circles give [`Intersection::Coincident`] for equal radii and
/// [`Intersection::Empty`] otherwise. Internal or external tangency gives a
/// single point. Two roots are ordered left, then right, of the center line
/// seen from the first circle.
///
/// # Errors
///
/// Returns [`GeometryError::Overflow`](crate::error::GeometryError::Overflow)
/// if a squared radius or center distance leaves the decimal range.
pub fn intersect_circle_circle(c1: &Circle, c2: &Circle) -> Result<Intersection> {
    let (r1, r2) = (c1.radius(), c2.radius());
    let dx = c2.center().x - c1.center().x;
    let dy = c2.center().y - c1.center().y;
    let d = checked_hypot(dx, dy)?;

    if d <= TOLERANCE {
        if (r1 - r2).abs() <= TOLERANCE {
            tracing::debug!("circles coincide");
            return Ok(Intersection::Coincident);
        }
        return Ok(Intersection::Empty);
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if d > sum + TANGENCY_TOLERANCE || d < diff - TANGENCY_TOLERANCE {
        tracing::debug!(%d, %sum, %diff, "circles do not meet");
        return Ok(Intersection::Empty);
    }

    let r1_sq = checked_square(r1, "radius squared")?;
    let r2_sq = checked_square(r2, "radius squared")?;
    let d_sq = checked_square(d, "center distance squared")?;
    let numerator = (r1_sq - r2_sq)
        .checked_add(d_sq)
        .ok_or(GeometryError::Overflow("radical line offset"))?;

    // Distance from c1 along the center line to the radical line.
    let a = numerator / (Decimal::TWO * d);
    let mid = c1.center().offset(a * dx / d, a * dy / d);
    if (d - sum).abs() <= TANGENCY_TOLERANCE || (d - diff).abs() <= TANGENCY_TOLERANCE {
        return Ok(Intersection::Single(mid));
    }

    let a_sq = checked_square(a, "radical line offset squared")?;
    let h = sqrt((r1_sq - a_sq).max(Decimal::ZERO)).unwrap_or(Decimal::ZERO);
    let px = -dy * h / d;
    let py = dx * h / d;
    Ok(Intersection::Pair(mid.offset(px, py), mid.offset(-px, -py)))
}

/// Solves any two objects, dispatching on their kinds.
///
/// Arcs take part through their supporting circle; normalise them first
/// with [`GeodeticObject::normalized`] to use an end tangent instead.
///
/// # Errors
///
/// Returns an error if a circle solve leaves the decimal range.
pub fn intersect(a: &GeodeticObject, b: &GeodeticObject) -> Result<Intersection> {
    match (a, b) {
        (GeodeticObject::Line(l1), GeodeticObject::Line(l2)) => Ok(intersect_line_line(l1, l2)),
        (GeodeticObject::Circle(c), GeodeticObject::Line(l))
        | (GeodeticObject::Line(l), GeodeticObject::Circle(c)) => intersect_circle_line(c, l),
        (GeodeticObject::Circle(c1), GeodeticObject::Circle(c2)) => intersect_circle_circle(c1, c2),
        (GeodeticObject::Arc(arc), _) => intersect(&GeodeticObject::Circle(*arc.as_circle()), b),
        (_, GeodeticObject::Arc(arc)) => intersect(a, &GeodeticObject::Circle(*arc.as_circle())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Arc;
    use rust_decimal_macros::dec;

    fn p(x: Decimal, y: Decimal) -> Point {
        Point::new(x, y)
    }

    fn line(x1: Decimal, y1: Decimal, x2: Decimal, y2: Decimal) -> Line {
        Line::new(p(x1, y1), p(x2, y2)).unwrap()
    }

    fn circle(x: Decimal, y: Decimal, r: Decimal) -> Circle {
        Circle::new(p(x, y), r).unwrap()
    }

    fn close(a: &Point, b: &Point) -> bool {
        a.distance(b) < dec!(0.000000001)
    }

    // ── line-line ──

    #[test]
    fn line_line_crossing() {
        let hit = intersect_line_line(
            &line(dec!(0), dec!(0), dec!(2), dec!(2)),
            &line(dec!(0), dec!(2), dec!(2), dec!(0)),
        );
        assert!(close(&hit.points()[0], &p(dec!(1), dec!(1))), "hit={hit:?}");
    }

    #[test]
    fn line_line_with_vertical() {
        let hit = intersect_line_line(
            &line(dec!(3), dec!(-5), dec!(3), dec!(5)),
            &line(dec!(0), dec!(1), dec!(1), dec!(2)),
        );
        assert!(close(&hit.points()[0], &p(dec!(3), dec!(4))), "hit={hit:?}");
    }

    #[test]
    fn line_line_parallel_is_empty() {
        let hit = intersect_line_line(
            &line(dec!(0), dec!(0), dec!(1), dec!(1)),
            &line(dec!(0), dec!(1), dec!(2), dec!(3)),
        );
        assert_eq!(hit, Intersection::Empty);
    }

    #[test]
    fn line_line_distinct_verticals_is_empty() {
        let hit = intersect_line_line(
            &line(dec!(0), dec!(0), dec!(0), dec!(1)),
            &line(dec!(4), dec!(0), dec!(4), dec!(1)),
        );
        assert!(hit.is_empty());
    }

    #[test]
    fn line_line_beyond_samples() {
        // Samples are far from the crossing; lines are infinite.
        let hit = intersect_line_line(
            &line(dec!(10), dec!(0), dec!(11), dec!(0)),
            &line(dec!(0), dec!(10), dec!(0), dec!(11)),
        );
        assert!(close(&hit.points()[0], &p(dec!(0), dec!(0))), "hit={hit:?}");
    }

    // ── circle-line ──

    #[test]
    fn circle_line_two_roots() {
        let hit = intersect_circle_line(
            &circle(dec!(0), dec!(0), dec!(5)),
            &line(dec!(-10), dec!(3), dec!(10), dec!(3)),
        )
        .unwrap();
        let Intersection::Pair(a, b) = hit else {
            panic!("expected two roots, got {hit:?}");
        };
        assert!(close(&a, &p(dec!(4), dec!(3))), "a={a}");
        assert!(close(&b, &p(dec!(-4), dec!(3))), "b={b}");
    }

    #[test]
    fn circle_line_miss() {
        let hit = intersect_circle_line(
            &circle(dec!(0), dec!(0), dec!(1)),
            &line(dec!(-1), dec!(2), dec!(1), dec!(2)),
        )
        .unwrap();
        assert_eq!(hit, Intersection::Empty);
    }

    #[test]
    fn circle_line_tangent_gives_one_point() {
        let hit = intersect_circle_line(
            &circle(dec!(2), dec!(2), dec!(1)),
            &line(dec!(0), dec!(3), dec!(7), dec!(3)),
        )
        .unwrap();
        assert_eq!(hit.len(), 1, "hit={hit:?}");
        assert!(close(&hit.points()[0], &p(dec!(2), dec!(3))));
    }

    #[test]
    fn circle_line_vertical() {
        let hit = intersect_circle_line(
            &circle(dec!(1), dec!(1), dec!(2)),
            &line(dec!(1), dec!(-9), dec!(1), dec!(9)),
        )
        .unwrap();
        let pts = hit.points();
        assert_eq!(pts.len(), 2);
        assert!(close(&pts[0], &p(dec!(1), dec!(3))));
        assert!(close(&pts[1], &p(dec!(1), dec!(-1))));
    }

    #[test]
    fn circle_line_zero_radius_on_line() {
        let hit = intersect_circle_line(
            &circle(dec!(4), dec!(0), dec!(0)),
            &line(dec!(0), dec!(0), dec!(10), dec!(0)),
        )
        .unwrap();
        assert!(close(&hit.points()[0], &p(dec!(4), dec!(0))), "hit={hit:?}");
    }

    // ── circle-circle ──

    #[test]
    fn circle_circle_two_roots_symmetric() {
        let hit = intersect_circle_circle(
            &circle(dec!(0), dec!(0), dec!(5)),
            &circle(dec!(8), dec!(0), dec!(5)),
        )
        .unwrap();
        let Intersection::Pair(a, b) = hit else {
            panic!("expected two roots, got {hit:?}");
        };
        assert!(close(&a, &p(dec!(4), dec!(3))), "a={a}");
        assert!(close(&b, &p(dec!(4), dec!(-3))), "b={b}");
    }

    #[test]
    fn circle_circle_too_far() {
        let hit = intersect_circle_circle(
            &circle(dec!(0), dec!(0), dec!(1)),
            &circle(dec!(5), dec!(0), dec!(1)),
        )
        .unwrap();
        assert_eq!(hit, Intersection::Empty);
    }

    #[test]
    fn circle_circle_nested() {
        let hit = intersect_circle_circle(
            &circle(dec!(0), dec!(0), dec!(5)),
            &circle(dec!(1), dec!(0), dec!(1)),
        )
        .unwrap();
        assert_eq!(hit, Intersection::Empty);
    }

    #[test]
    fn circle_circle_external_tangency() {
        let hit = intersect_circle_circle(
            &circle(dec!(0), dec!(0), dec!(1)),
            &circle(dec!(2), dec!(0), dec!(1)),
        )
        .unwrap();
        assert_eq!(hit.len(), 1);
        assert!(close(&hit.points()[0], &p(dec!(1), dec!(0))));
    }

    #[test]
    fn circle_circle_internal_tangency() {
        let hit = intersect_circle_circle(
            &circle(dec!(0), dec!(0), dec!(3)),
            &circle(dec!(1), dec!(0), dec!(2)),
        )
        .unwrap();
        assert_eq!(hit.len(), 1);
        assert!(close(&hit.points()[0], &p(dec!(3), dec!(0))));
    }

    #[test]
    fn circle_circle_coincident() {
        let c = circle(dec!(7), dec!(7), dec!(2));
        assert_eq!(
            intersect_circle_circle(&c, &c).unwrap(),
            Intersection::Coincident
        );
        assert!(Intersection::Coincident.is_empty());
    }

    #[test]
    fn circle_circle_concentric_distinct_radii() {
        let hit = intersect_circle_circle(
            &circle(dec!(7), dec!(7), dec!(2)),
            &circle(dec!(7), dec!(7), dec!(3)),
        )
        .unwrap();
        assert_eq!(hit, Intersection::Empty);
    }

    // ── dispatch ──

    #[test]
    fn dispatch_is_symmetric_for_line_circle() {
        let l = GeodeticObject::from(line(dec!(-10), dec!(3), dec!(10), dec!(3)));
        let c = GeodeticObject::from(circle(dec!(0), dec!(0), dec!(5)));
        assert_eq!(intersect(&l, &c).unwrap(), intersect(&c, &l).unwrap());
        assert_eq!(intersect(&l, &c).unwrap().len(), 2);
    }

    #[test]
    fn dispatch_uses_arc_circle() {
        let arc = Arc::new(p(dec!(5), dec!(0)), p(dec!(0), dec!(5)), p(dec!(-5), dec!(0))).unwrap();
        let hit = intersect(
            &GeodeticObject::from(arc),
            &GeodeticObject::from(line(dec!(-10), dec!(-3), dec!(10), dec!(-3))),
        )
        .unwrap();
        // The supporting circle is hit even below the arc itself.
        assert_eq!(hit.len(), 2);
    }

    // ── large radii ──

    fn flat_arc() -> Arc {
        Arc::new(
            p(dec!(0), dec!(0)),
            p(dec!(1000), dec!(0.000001)),
            p(dec!(2000), dec!(0)),
        )
        .unwrap()
    }

    #[test]
    fn flat_arc_meets_its_chord_line() {
        let arc = flat_arc();
        assert!(arc.as_circle().radius() > dec!(400000000000));
        let hit = intersect(
            &GeodeticObject::from(arc),
            &GeodeticObject::from(line(dec!(0), dec!(0), dec!(20000), dec!(0))),
        )
        .unwrap();
        let Intersection::Pair(a, b) = hit else {
            panic!("expected two roots, got {hit:?}");
        };
        assert!(a.distance(&p(dec!(2000), dec!(0))) < dec!(0.001), "a={a}");
        assert!(b.distance(&p(dec!(0), dec!(0))) < dec!(0.001), "b={b}");
    }

    #[test]
    fn huge_circles_overlapping_slightly() {
        let upper = circle(dec!(0), dec!(500000000000), dec!(500000000000));
        let lower = circle(dec!(0), dec!(-499999999999), dec!(500000000000));
        let Intersection::Pair(a, b) = intersect_circle_circle(&upper, &lower).unwrap() else {
            panic!("expected two roots");
        };
        assert!((a.y - dec!(0.5)).abs() < dec!(0.001), "a={a}");
        assert!((b.y - dec!(0.5)).abs() < dec!(0.001), "b={b}");
        assert!((a.x + b.x).abs() < dec!(0.001));
        assert!(a.x > dec!(700000));
    }

    #[test]
    fn radius_beyond_decimal_range_is_an_error() {
        let huge = circle(dec!(0), dec!(0), dec!(1000000000000000));
        let err = intersect_circle_line(&huge, &line(dec!(0), dec!(0), dec!(1), dec!(0)))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::KimuError::Geometry(GeometryError::Overflow(_))
        ));
        let twin = circle(dec!(1), dec!(0), dec!(1000000000000000));
        assert!(intersect_circle_circle(&huge, &twin).is_err());
    }
}
