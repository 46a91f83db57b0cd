use std::str::FromStr;

use crate::error::{OperationError, Result};
use crate::geometry::{Line, Point};
use crate::math::{Decimal, HOST_PRECISION, TOLERANCE};

/// Measurements driving a rectangular mapping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingParams {
    /// Distance along the boundary from the clicked endpoint to point A.
    pub a_measure: Decimal,
    /// Offset of point B from the boundary, perpendicular through A.
    pub b_measure: Decimal,
    /// Building side lengths: the first places point C, the rest one corner each.
    pub sides: Vec<Decimal>,
}

impl MappingParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a measure is negative or a side is not positive.
    pub fn new(a_measure: Decimal, b_measure: Decimal, sides: Vec<Decimal>) -> Result<Self> {
        if a_measure < Decimal::ZERO {
            return Err(invalid(format!("a measure {a_measure} is negative")));
        }
        if b_measure < Decimal::ZERO {
            return Err(invalid(format!("b measure {b_measure} is negative")));
        }
        if let Some(side) = sides.iter().find(|s| **s <= Decimal::ZERO) {
            return Err(invalid(format!("side length {side} is not positive")));
        }
        Ok(Self {
            a_measure,
            b_measure,
            sides,
        })
    }

    /// Parses parameters from form input.
    ///
    /// `sides` is a comma-separated list; an empty string means no sides.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not a decimal number or fails
    /// validation.
    pub fn parse(a_measure: &str, b_measure: &str, sides: &str) -> Result<Self> {
        let sides = if sides.trim().is_empty() {
            Vec::new()
        } else {
            sides.split(',').map(parse_measure).collect::<Result<_>>()?
        };
        Self::new(parse_measure(a_measure)?, parse_measure(b_measure)?, sides)
    }
}

fn parse_measure(value: &str) -> Result<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid(format!("{value:?} is not a number")))
}

fn invalid(message: String) -> crate::error::KimuError {
    OperationError::InvalidInput(message).into()
}

/// How one of two roots is picked without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPolicy {
    /// The root lying between the reference segment's endpoints.
    WithinSegment,
    /// The root farther from the reference start.
    Farther,
    /// The root nearer to the reference start.
    Nearer,
    /// Hand both roots to the chooser.
    Ask,
}

impl RootPolicy {
    /// Picks a root against `reference`.
    ///
    /// Returns `None` when no root qualifies, and always for [`RootPolicy::Ask`].
    /// Equal distances keep the earlier root.
    #[must_use]
    pub fn pick(self, roots: &[Point], reference: &Line) -> Option<Point> {
        let origin = reference.start();
        let mut roots = roots.iter().copied();
        match self {
            RootPolicy::WithinSegment => roots.find(|p| {
                let t = reference.parameter_of(p);
                t >= -TOLERANCE && t <= Decimal::ONE + TOLERANCE
            }),
            RootPolicy::Farther => roots.reduce(|best, p| {
                if p.distance(origin) > best.distance(origin) {
                    p
                } else {
                    best
                }
            }),
            RootPolicy::Nearer => roots.reduce(|best, p| {
                if p.distance(origin) < best.distance(origin) {
                    p
                } else {
                    best
                }
            }),
            RootPolicy::Ask => None,
        }
    }
}

/// Root selection and duplicate detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingPolicy {
    /// Picks point A among the two roots on the boundary.
    pub point_a: RootPolicy,
    /// Picks point C among the two roots on the A/B line.
    pub point_c: RootPolicy,
    /// Decimals compared when looking for a duplicate corner.
    pub precision: u32,
    /// Whether point A opens the corner list. When off, the list starts at
    /// B and holds A only if B coincides with it.
    pub point_a_as_corner: bool,
}

impl Default for MappingPolicy {
    fn default() -> Self {
        Self {
            point_a: RootPolicy::WithinSegment,
            point_c: RootPolicy::Farther,
            precision: HOST_PRECISION,
            point_a_as_corner: true,
        }
    }
}
