use crate::error::Result;
use crate::geometry::{ArcTreatment, Circle, GeodeticObject, Point};
use crate::math::intersect_2d::Intersection;
use crate::sink::ResultSink;

use super::bounds::BoundsOracle;
use super::disambiguate::{select_and_prune, Pruner, Resolution};
use super::pairing::ConstructPairs;
use super::selection::Selection;

/// Label given to the emitted intersection point.
pub const INTERSECTION_LABEL: &str = "Intersection point";

/// How an intersection tool run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// One point was accepted and handed to the sink.
    Emitted(Point),
    /// The selected objects do not meet.
    NoIntersection,
    /// Every candidate fell outside the current extent.
    OutsideRegion { excluded: Vec<Point> },
    /// The user closed the review without keeping a point.
    Cancelled,
}

/// Intersects the objects implied by a selection and emits one point.
///
/// Runs validation, pair construction, solving, the bounds filter and, if
/// more than one candidate is left, select-and-prune review.
pub struct IntersectionTool<'a> {
    selection: &'a Selection,
    expected_points: Option<usize>,
    objects: Vec<GeodeticObject>,
    treatment: ArcTreatment,
}

impl<'a> IntersectionTool<'a> {
    /// Two lines, given as line features or four loose points.
    #[must_use]
    pub fn lines(selection: &'a Selection) -> Self {
        Self {
            selection,
            expected_points: Some(4),
            objects: Vec::new(),
            treatment: ArcTreatment::AsCircle,
        }
    }

    /// A line (one line feature or two points) against a circle.
    #[must_use]
    pub fn line_circle(selection: &'a Selection, circle: Circle) -> Self {
        Self {
            selection,
            expected_points: Some(2),
            objects: vec![GeodeticObject::Circle(circle)],
            treatment: ArcTreatment::AsCircle,
        }
    }

    /// Curves against each other or against a selected line.
    ///
    /// An empty selection solves the curves pairwise; otherwise the selection
    /// must imply exactly one line.
    #[must_use]
    pub fn curves(
        selection: &'a Selection,
        objects: impl IntoIterator<Item = GeodeticObject>,
        treatment: ArcTreatment,
    ) -> Self {
        let expected_points = (!selection.features().is_empty()).then_some(2);
        Self {
            selection,
            expected_points,
            objects: objects.into_iter().collect(),
            treatment,
        }
    }

    /// Every candidate point, before the bounds filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is malformed, an object cannot be
    /// normalized, or a solve leaves the decimal range.
    pub fn candidates(&self) -> Result<Vec<Point>> {
        if let Some(expected) = self.expected_points {
            self.selection.validate(expected)?;
        }
        let pairs = self
            .objects
            .iter()
            .fold(ConstructPairs::new(self.selection), |op, o| op.with_object(*o))
            .arc_treatment(self.treatment)
            .execute()?;

        let mut out = Vec::new();
        for pair in &pairs.pairs {
            match pair.solve()? {
                Intersection::Coincident => {
                    tracing::warn!(
                        first = %pair.first,
                        second = %pair.second,
                        "objects coincide; there is no unique intersection point"
                    );
                }
                hit => out.extend(hit.points()),
            }
        }
        Ok(out)
    }

    /// Executes the tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is malformed, an object cannot be
    /// normalized, or the sink rejects the result.
    pub fn execute<O, P, S>(&self, oracle: &O, pruner: &mut P, sink: &mut S) -> Result<ToolOutcome>
    where
        O: BoundsOracle + ?Sized,
        P: Pruner + ?Sized,
        S: ResultSink + ?Sized,
    {
        let candidates = self.candidates()?;
        if candidates.is_empty() {
            tracing::warn!("no intersection point");
            return Ok(ToolOutcome::NoIntersection);
        }

        let (admitted, excluded) = oracle.current_extent().partition(&candidates);
        if !excluded.is_empty() {
            tracing::warn!(
                count = excluded.len(),
                "potential intersection points lie outside of the map canvas"
            );
        }
        if admitted.is_empty() {
            return Ok(ToolOutcome::OutsideRegion { excluded });
        }

        let labels: Vec<String> = (1..=admitted.len()).map(|i| format!("Opt {i}")).collect();
        match select_and_prune(&admitted, &labels, pruner) {
            Resolution::Accepted { point, rejected } => {
                tracing::debug!(%point, rejected = rejected.len(), "intersection point accepted");
                sink.emit(&[point], &[INTERSECTION_LABEL.to_owned()])?;
                Ok(ToolOutcome::Emitted(point))
            }
            Resolution::Cancelled => Ok(ToolOutcome::Cancelled),
            Resolution::Empty => Ok(ToolOutcome::NoIntersection),
        }
    }
}
