use std::fmt;
use std::str::FromStr;

use crate::error::{GeometryError, Result};
use crate::math::{hypot, Decimal, TOLERANCE};

/// A point in the active reference frame, with exact decimal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Easting.
    pub x: Decimal,
    /// Northing.
    pub y: Decimal,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    /// Parses a point from two decimal strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either string is not a valid decimal number.
    pub fn parse(x: &str, y: &str) -> Result<Self> {
        Ok(Self::new(parse_coordinate(x)?, parse_coordinate(y)?))
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Point) -> Decimal {
        hypot(other.x - self.x, other.y - self.y)
    }

    /// Returns the point with both coordinates rounded to `dp` decimal places.
    #[must_use]
    pub fn rounded(&self, dp: u32) -> Point {
        Point::new(self.x.round_dp(dp), self.y.round_dp(dp))
    }

    /// Whether both coordinates agree within [`TOLERANCE`].
    #[must_use]
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= TOLERANCE && (self.y - other.y).abs() <= TOLERANCE
    }

    /// Translates the point by `(dx, dy)`.
    #[must_use]
    pub fn offset(&self, dx: Decimal, dy: Decimal) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x.round_dp(3), self.y.round_dp(3))
    }
}

fn parse_coordinate(value: &str) -> Result<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| {
            GeometryError::InvalidCoordinate {
                value: value.to_owned(),
                reason: e.to_string(),
            }
            .into()
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_keeps_digits() {
        let p = Point::parse("6672314.125", " 385221.0005 ").unwrap();
        assert_eq!(p.x, dec!(6672314.125));
        assert_eq!(p.y, dec!(385221.0005));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Point::parse("12,5", "3").is_err());
    }

    #[test]
    fn rounding_to_host_precision() {
        let p = Point::new(dec!(1.23449), dec!(-2.0006));
        assert_eq!(p.rounded(3), Point::new(dec!(1.234), dec!(-2.001)));
    }

    #[test]
    fn display_uses_three_decimals() {
        let p = Point::new(dec!(1.23456), dec!(2));
        assert_eq!(p.to_string(), "(1.235, 2)");
    }
}
