use crate::error::{Result, SelectionError};
use crate::geometry::{Line, Point};

use crate::operations::selection::Selection;

/// The property boundary measured from, oriented away from the clicked end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    line: Line,
}

impl Boundary {
    /// Creates a boundary running from `start` towards `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn new(start: Point, end: Point) -> Result<Self> {
        Ok(Self {
            line: Line::new(start, end)?,
        })
    }

    /// Builds the boundary from a selection and the clicked endpoint.
    ///
    /// The selection is one line feature or two point features. The clicked
    /// point must coincide with one of the two endpoints; it becomes the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection does not imply exactly two points in
    /// one frame, or the clicked point is not an endpoint.
    pub fn from_selection(selection: &Selection, clicked: &Point) -> Result<Self> {
        selection.validate(2)?;
        let lines = selection.lines();
        let points = selection.points();
        let (first, last) = match (lines.as_slice(), points.as_slice()) {
            ([line], []) => (*line.start(), *line.end()),
            ([], [p0, p1]) => (*p0, *p1),
            _ => {
                return Err(SelectionError::UnsupportedComposition {
                    lines: lines.len(),
                    points: points.len(),
                }
                .into())
            }
        };
        if first.approx_eq(clicked) {
            Self::new(first, last)
        } else if last.approx_eq(clicked) {
            Self::new(last, first)
        } else {
            tracing::warn!(%clicked, "clicked point is not an endpoint of the boundary");
            Err(SelectionError::NotAnEndpoint {
                x: clicked.x,
                y: clicked.y,
            }
            .into())
        }
    }

    /// The boundary as an infinite line through its endpoints.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// The clicked endpoint measurements start from.
    #[must_use]
    pub fn start(&self) -> &Point {
        self.line.start()
    }

    /// The opposite endpoint.
    #[must_use]
    pub fn end(&self) -> &Point {
        self.line.end()
    }
}
