use crate::error::{OperationError, Result};
use crate::geometry::Point;
use crate::math::Decimal;

/// An axis-aligned rectangular extent, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    xmin: Decimal,
    xmax: Decimal,
    ymin: Decimal,
    ymax: Decimal,
}

impl Extent {
    /// Creates an extent from its ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if either range is inverted.
    pub fn new(xmin: Decimal, xmax: Decimal, ymin: Decimal, ymax: Decimal) -> Result<Self> {
        if xmin > xmax || ymin > ymax {
            return Err(OperationError::InvalidInput(format!(
                "inverted extent x [{xmin}, {xmax}] y [{ymin}, {ymax}]"
            ))
            .into());
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Smallest extent holding every point, or `None` for no points.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self {
            xmin: first.x,
            xmax: first.x,
            ymin: first.y,
            ymax: first.y,
        };
        Some(rest.iter().fold(init, |e, p| Self {
            xmin: e.xmin.min(p.x),
            xmax: e.xmax.max(p.x),
            ymin: e.ymin.min(p.y),
            ymax: e.ymax.max(p.y),
        }))
    }

    #[must_use]
    pub fn xmin(&self) -> Decimal {
        self.xmin
    }

    #[must_use]
    pub fn xmax(&self) -> Decimal {
        self.xmax
    }

    #[must_use]
    pub fn ymin(&self) -> Decimal {
        self.ymin
    }

    #[must_use]
    pub fn ymax(&self) -> Decimal {
        self.ymax
    }

    /// Returns `true` if `point` lies inside or on the border.
    #[must_use]
    pub fn admits(&self, point: &Point) -> bool {
        self.xmin <= point.x && point.x <= self.xmax && self.ymin <= point.y && point.y <= self.ymax
    }

    /// Splits `candidates` into `(admitted, excluded)`, keeping order.
    #[must_use]
    pub fn partition(&self, candidates: &[Point]) -> (Vec<Point>, Vec<Point>) {
        candidates.iter().partition(|p| self.admits(p))
    }
}

/// Source of the region results must fall into.
pub trait BoundsOracle {
    /// The extent currently in view.
    fn current_extent(&self) -> Extent;
}

impl BoundsOracle for Extent {
    fn current_extent(&self) -> Extent {
        *self
    }
}
