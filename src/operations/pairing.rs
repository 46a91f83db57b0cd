use crate::error::{Result, SelectionError};
use crate::geometry::{ArcTreatment, GeodeticObject, Line};
use crate::math::intersect_2d::{intersect, Intersection};

use super::selection::Selection;

/// Two objects to be solved against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectPair {
    pub first: GeodeticObject,
    pub second: GeodeticObject,
}

impl ObjectPair {
    /// Solves the pair.
    ///
    /// # Errors
    ///
    /// Returns an error if a circle solve leaves the decimal range.
    pub fn solve(&self) -> Result<Intersection> {
        intersect(&self.first, &self.second)
    }
}

/// A line/line pairing dropped because the lines never meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelPair {
    pub first: Line,
    pub second: Line,
}

/// Output of [`ConstructPairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePairs {
    /// Pairs to feed the solver, in enumeration order.
    pub pairs: Vec<ObjectPair>,
    /// Line/line pairings rejected up front.
    pub parallel: Vec<ParallelPair>,
}

/// Builds every object pair implied by a selection.
///
/// The selection supplies lines (line features, or lines through point
/// features); extra objects such as a circle around a clicked centroid are
/// appended to every grouping. Four loose points are grouped into two lines
/// in all three possible ways, since the user gave no order.
pub struct ConstructPairs<'a> {
    selection: &'a Selection,
    objects: Vec<GeodeticObject>,
    treatment: ArcTreatment,
}

impl<'a> ConstructPairs<'a> {
    /// Creates a new `ConstructPairs` operation.
    #[must_use]
    pub fn new(selection: &'a Selection) -> Self {
        Self {
            selection,
            objects: Vec::new(),
            treatment: ArcTreatment::default(),
        }
    }

    /// Adds an object that takes part in every pairing.
    #[must_use]
    pub fn with_object(mut self, object: impl Into<GeodeticObject>) -> Self {
        self.objects.push(object.into());
        self
    }

    /// Sets how arcs are reduced before pairing.
    #[must_use]
    pub fn arc_treatment(mut self, treatment: ArcTreatment) -> Self {
        self.treatment = treatment;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection composition is unsupported, a
    /// grouping does not hold exactly two objects, or a line cannot be built
    /// (two coinciding points).
    pub fn execute(&self) -> Result<CandidatePairs> {
        let extras = self
            .objects
            .iter()
            .map(|o| o.normalized(self.treatment))
            .collect::<Result<Vec<_>>>()?;

        let mut out = CandidatePairs::default();
        for grouping in self.groupings()? {
            let objects: Vec<GeodeticObject> = grouping
                .into_iter()
                .map(GeodeticObject::Line)
                .chain(extras.iter().copied())
                .collect();
            let [first, second] = objects[..] else {
                return Err(SelectionError::WrongObjectCount(objects.len()).into());
            };

            if let (GeodeticObject::Line(a), GeodeticObject::Line(b)) = (first, second) {
                if a.is_parallel_to(&b) {
                    tracing::warn!(%a, %b, "lines are parallel; there is no intersection point");
                    out.parallel.push(ParallelPair {
                        first: a,
                        second: b,
                    });
                    continue;
                }
            }
            out.pairs.push(ObjectPair { first, second });
        }
        Ok(out)
    }

    /// Lines implied by the selection, one vector per alternative grouping.
    fn groupings(&self) -> Result<Vec<Vec<Line>>> {
        let lines = self.selection.lines();
        let points = self.selection.points();
        let groupings = match (lines.as_slice(), points.as_slice()) {
            ([], []) => vec![vec![]],
            ([line], []) => vec![vec![*line]],
            ([a, b], []) => vec![vec![*a, *b]],
            ([], [p0, p1]) => vec![vec![Line::new(*p0, *p1)?]],
            ([line], [p0, p1]) => vec![vec![*line, Line::new(*p0, *p1)?]],
            ([], [p0, p1, p2, p3]) => vec![
                vec![Line::new(*p0, *p1)?, Line::new(*p2, *p3)?],
                vec![Line::new(*p0, *p2)?, Line::new(*p1, *p3)?],
                vec![Line::new(*p0, *p3)?, Line::new(*p2, *p1)?],
            ],
            _ => {
                return Err(SelectionError::UnsupportedComposition {
                    lines: lines.len(),
                    points: points.len(),
                }
                .into())
            }
        };
        Ok(groupings)
    }
}
