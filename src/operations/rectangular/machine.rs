use std::fmt;

use crate::error::{OperationError, Result};
use crate::geometry::{Line, Point};
use crate::math::solve_2d::{points_at_distance_on_line, points_on_perpendicular};
use crate::math::Decimal;
use crate::operations::bounds::{BoundsOracle, Extent};
use crate::operations::disambiguate::{Choice, Chooser};
use crate::sink::ResultSink;

use super::boundary::Boundary;
use super::params::{MappingParams, MappingPolicy, RootPolicy};

/// A point located by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// On the boundary, `a_measure` from the clicked endpoint.
    PointA,
    /// Perpendicular to the boundary through A, `b_measure` away.
    PointB,
    /// On the A/B line, the first side length beyond B.
    PointC,
    /// Perpendicular to the last accepted side; carries the side index.
    PointD(usize),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PointA => f.write_str("point A"),
            Stage::PointB => f.write_str("point B"),
            Stage::PointC => f.write_str("point C"),
            Stage::PointD(i) => write!(f, "point D{i}"),
        }
    }
}

/// A pending decision between two candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub stage: Stage,
    pub candidates: Vec<Point>,
    pub labels: Vec<String>,
    pub prompt: String,
}

/// Why a run stopped without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The accepted point, or every candidate, fell outside the extent.
    OutsideRegion { stage: Stage },
    /// The construction has no qualifying root.
    NoSolution { stage: Stage },
    /// The chooser closed without deciding.
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::OutsideRegion { stage } => {
                write!(f, "{stage} lies outside of the map canvas")
            }
            AbortReason::NoSolution { stage } => write!(f, "{stage} cannot be located"),
            AbortReason::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// What [`RectangularMapping::advance`] stopped at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Awaiting(ChoiceRequest),
    Finished(Vec<Point>),
    Aborted(AbortReason),
}

/// Final result of [`RectangularMapping::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingOutcome {
    Completed(Vec<Point>),
    Aborted(AbortReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Ready(Stage),
    Awaiting(ChoiceRequest),
    Finished,
    Aborted(AbortReason),
}

enum Flow {
    Accept(Point),
    Ask(ChoiceRequest),
    Abort(AbortReason),
}

/// Maps building corners from boundary measurements.
///
/// The run locates A, then B, then C, then one further corner per remaining
/// side, appending each accepted point to the corner list. It suspends with a
/// [`ChoiceRequest`] whenever two admissible candidates remain and continues
/// on [`resume`](Self::resume). Aborting discards every corner.
#[derive(Debug, Clone)]
pub struct RectangularMapping {
    boundary: Boundary,
    params: MappingParams,
    policy: MappingPolicy,
    extent: Extent,
    state: State,
    corners: Vec<Point>,
    point_a: Point,
    point_b: Point,
}

impl RectangularMapping {
    /// Creates a run over `boundary`, filtering against the oracle's current extent.
    #[must_use]
    pub fn new<O: BoundsOracle + ?Sized>(
        boundary: Boundary,
        params: MappingParams,
        oracle: &O,
    ) -> Self {
        let start = *boundary.start();
        Self {
            boundary,
            params,
            policy: MappingPolicy::default(),
            extent: oracle.current_extent(),
            state: State::Ready(Stage::PointA),
            corners: Vec::new(),
            point_a: start,
            point_b: start,
        }
    }

    /// Replaces the root selection policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MappingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Corners accepted so far, in visit order.
    #[must_use]
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// The pending request, if the run is suspended.
    #[must_use]
    pub fn pending(&self) -> Option<&ChoiceRequest> {
        match &self.state {
            State::Awaiting(request) => Some(request),
            _ => None,
        }
    }

    /// Whether the run has finished or aborted.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Finished | State::Aborted(_))
    }

    /// Runs until the workflow finishes, aborts, or needs a choice.
    ///
    /// Calling it while suspended returns the same request again.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Finished`] once the run is over, or a
    /// construction error, which also aborts the run.
    pub fn advance(&mut self) -> Result<Step> {
        loop {
            let stage = match &self.state {
                State::Ready(stage) => *stage,
                State::Awaiting(request) => return Ok(Step::Awaiting(request.clone())),
                State::Finished | State::Aborted(_) => {
                    return Err(OperationError::Finished.into())
                }
            };
            let flow = match self.locate(stage) {
                Ok(flow) => flow,
                Err(err) => {
                    self.abort(AbortReason::NoSolution { stage });
                    return Err(err);
                }
            };
            match flow {
                Flow::Accept(point) => self.commit(stage, point),
                Flow::Ask(request) => {
                    self.state = State::Awaiting(request.clone());
                    return Ok(Step::Awaiting(request));
                }
                Flow::Abort(reason) => {
                    self.abort(reason);
                    return Ok(Step::Aborted(reason));
                }
            }
            if self.state == State::Finished {
                return Ok(Step::Finished(self.corners.clone()));
            }
        }
    }

    /// Answers the pending request and continues the run.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoPendingChoice`] if the run is not
    /// suspended, [`OperationError::InvalidChoice`] for an index outside the
    /// candidates (the request stays pending), or any error from
    /// [`advance`](Self::advance).
    pub fn resume(&mut self, choice: Choice) -> Result<Step> {
        let State::Awaiting(request) = &self.state else {
            return Err(OperationError::NoPendingChoice.into());
        };
        let index = match choice {
            Choice::Select(index) => index,
            Choice::Cancel => {
                self.abort(AbortReason::Cancelled);
                return Ok(Step::Aborted(AbortReason::Cancelled));
            }
        };
        let Some(point) = request.candidates.get(index).copied() else {
            return Err(OperationError::InvalidChoice {
                index,
                count: request.candidates.len(),
            }
            .into());
        };
        let stage = request.stage;
        self.commit(stage, point);
        if self.state == State::Finished {
            return Ok(Step::Finished(self.corners.clone()));
        }
        self.advance()
    }

    /// Drives the run to the end, asking `chooser` at every suspension.
    ///
    /// # Errors
    ///
    /// Returns an error if a construction fails or the chooser answers with
    /// an out-of-range index.
    pub fn run<C: Chooser + ?Sized>(&mut self, chooser: &mut C) -> Result<MappingOutcome> {
        let mut step = self.advance()?;
        loop {
            match step {
                Step::Awaiting(request) => {
                    let choice = chooser.choose(&request.candidates, &request.prompt);
                    step = self.resume(choice)?;
                }
                Step::Finished(corners) => return Ok(MappingOutcome::Completed(corners)),
                Step::Aborted(reason) => return Ok(MappingOutcome::Aborted(reason)),
            }
        }
    }

    fn locate(&self, stage: Stage) -> Result<Flow> {
        match stage {
            Stage::PointA => {
                let start = *self.boundary.start();
                if self.params.a_measure.is_zero() {
                    return Ok(self.admit(stage, start));
                }
                let line = self.boundary.line();
                let roots = points_at_distance_on_line(line, &start, self.params.a_measure)?.points();
                // Measured from the far end so "within" and "nearer" mean the
                // same segment the user measured along.
                let reference = self.boundary.line().reversed();
                Ok(self.settle(stage, &roots, self.policy.point_a, &reference))
            }
            Stage::PointB => {
                if self.params.b_measure.is_zero() {
                    return Ok(self.admit(stage, self.point_a));
                }
                let line = self.boundary.line();
                let roots = points_on_perpendicular(line, &self.point_a, self.params.b_measure).points();
                Ok(self.settle(stage, &roots, RootPolicy::Ask, self.boundary.line()))
            }
            Stage::PointC => {
                let anchor = if self.point_a == self.point_b {
                    *self.boundary.end()
                } else {
                    self.point_a
                };
                let direction = Line::new(anchor, self.point_b)?;
                let roots =
                    points_at_distance_on_line(&direction, &self.point_b, self.side(0))?.points();
                Ok(self.settle(stage, &roots, self.policy.point_c, &direction))
            }
            Stage::PointD(i) => {
                let [.., previous, last] = self.corners[..] else {
                    return Ok(Flow::Abort(AbortReason::NoSolution { stage }));
                };
                let segment = Line::new(previous, last)?;
                let roots = points_on_perpendicular(&segment, &last, self.side(i)).points();
                Ok(self.settle(stage, &roots, RootPolicy::Ask, &segment))
            }
        }
    }

    fn settle(&self, stage: Stage, roots: &[Point], policy: RootPolicy, reference: &Line) -> Flow {
        if roots.is_empty() {
            tracing::warn!(%stage, "no root for the construction");
            return Flow::Abort(AbortReason::NoSolution { stage });
        }
        if policy != RootPolicy::Ask {
            return match policy.pick(roots, reference) {
                Some(point) => self.admit(stage, point),
                None => {
                    tracing::warn!(%stage, ?policy, "no root satisfies the policy");
                    Flow::Abort(AbortReason::NoSolution { stage })
                }
            };
        }

        let (admitted, excluded) = self.extent.partition(roots);
        if !excluded.is_empty() {
            tracing::warn!(%stage, count = excluded.len(), "options lie outside of the map canvas");
        }
        match admitted.len() {
            0 => Flow::Abort(AbortReason::OutsideRegion { stage }),
            1 => Flow::Accept(admitted[0]),
            _ => Flow::Ask(self.request(stage, admitted)),
        }
    }

    fn admit(&self, stage: Stage, point: Point) -> Flow {
        if self.extent.admits(&point) {
            Flow::Accept(point)
        } else {
            tracing::warn!(%stage, %point, "point lies outside of the map canvas");
            Flow::Abort(AbortReason::OutsideRegion { stage })
        }
    }

    fn request(&self, stage: Stage, candidates: Vec<Point>) -> ChoiceRequest {
        let subject = match stage {
            Stage::PointA | Stage::PointB => stage.to_string(),
            Stage::PointC | Stage::PointD(_) => format!("corner point {}", self.corners.len() + 1),
        };
        let labels = (1..=candidates.len()).map(|i| format!("Opt {i}")).collect();
        ChoiceRequest {
            stage,
            candidates,
            labels,
            prompt: format!("Which option do you choose for {subject}?"),
        }
    }

    fn commit(&mut self, stage: Stage, point: Point) {
        tracing::debug!(%stage, %point, "point accepted");
        match stage {
            Stage::PointA => {
                self.point_a = point;
                if self.policy.point_a_as_corner {
                    self.corners.push(point);
                }
                self.state = State::Ready(Stage::PointB);
            }
            Stage::PointB => {
                if point != self.point_a || !self.policy.point_a_as_corner {
                    self.corners.push(point);
                }
                self.point_b = point;
                self.state = self.next_side(0);
            }
            Stage::PointC => {
                self.corners.push(point);
                self.state = self.next_side(1);
            }
            Stage::PointD(i) => {
                if self.is_duplicate(&point) {
                    tracing::warn!(%point, "corner already mapped; skipping");
                } else {
                    self.corners.push(point);
                }
                self.state = self.next_side(i + 1);
            }
        }
    }

    fn next_side(&self, index: usize) -> State {
        match index {
            i if i >= self.params.sides.len() => State::Finished,
            0 => State::Ready(Stage::PointC),
            i => State::Ready(Stage::PointD(i)),
        }
    }

    fn side(&self, index: usize) -> Decimal {
        self.params.sides[index]
    }

    fn is_duplicate(&self, point: &Point) -> bool {
        let precision = self.policy.precision;
        let rounded = point.rounded(precision);
        self.corners.iter().any(|c| c.rounded(precision) == rounded)
    }

    fn abort(&mut self, reason: AbortReason) {
        tracing::warn!(%reason, discarded = self.corners.len(), "rectangular mapping aborted");
        self.corners.clear();
        self.state = State::Aborted(reason);
    }
}

/// Sink label of the `n`-th corner, counting from 1.
#[must_use]
pub fn corner_label(n: usize) -> String {
    format!("Corner point {n}")
}

/// Hands corners to `sink` labelled in visit order.
///
/// # Errors
///
/// Returns any error raised by the sink.
pub fn emit_corners<S: ResultSink + ?Sized>(corners: &[Point], sink: &mut S) -> Result<()> {
    let labels: Vec<String> = (1..=corners.len()).map(corner_label).collect();
    sink.emit(corners, &labels)
}
