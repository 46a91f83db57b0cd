use crate::error::{OperationError, Result};
use crate::geometry::{Line, Point};
use crate::math::Decimal;

/// Divides a line into equal parts.
pub struct SplitLine {
    line: Line,
    parts: u32,
}

impl SplitLine {
    /// Creates a new `SplitLine` operation.
    #[must_use]
    pub fn new(line: Line, parts: u32) -> Self {
        Self { line, parts }
    }

    /// Executes the split, returning the `parts + 1` nodes from start to end.
    ///
    /// # Errors
    ///
    /// Returns an error if `parts` is zero.
    pub fn execute(&self) -> Result<Vec<Point>> {
        if self.parts == 0 {
            return Err(
                OperationError::InvalidInput("cannot split a line into 0 parts".into()).into(),
            );
        }
        let n = Decimal::from(self.parts);
        let mut nodes: Vec<Point> = (0..self.parts)
            .map(|i| self.line.point_at(Decimal::from(i) / n))
            .collect();
        nodes.push(*self.line.end());
        Ok(nodes)
    }
}

/// Translates a line by a displacement.
pub struct DisplaceLine {
    line: Line,
    dx: Decimal,
    dy: Decimal,
}

impl DisplaceLine {
    /// Creates a new `DisplaceLine` operation.
    #[must_use]
    pub fn new(line: Line, dx: Decimal, dy: Decimal) -> Self {
        Self { line, dx, dy }
    }

    /// Executes the translation, returning the displaced line.
    ///
    /// # Errors
    ///
    /// Returns an error if rounding collapses the displaced endpoints onto
    /// each other.
    pub fn execute(&self) -> Result<Line> {
        Line::new(
            self.line.start().offset(self.dx, self.dy),
            self.line.end().offset(self.dx, self.dy),
        )
    }
}
