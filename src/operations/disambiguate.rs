//! Picking one candidate out of several.
//!
//! The engine never guesses between admissible candidates. A [`Chooser`]
//! picks one by index; a [`Pruner`] reviews candidates one at a time for the
//! select-and-prune tools. Either may cancel, which abandons the step.

use crate::error::{OperationError, Result};
use crate::geometry::Point;

/// Answer to a choice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Accept the candidate at this index.
    Select(usize),
    /// Close without deciding.
    Cancel,
}

/// External decision point picking among candidates.
pub trait Chooser {
    /// Picks one of `candidates`, which always holds at least two points.
    fn choose(&mut self, candidates: &[Point], prompt: &str) -> Choice;
}

impl<F> Chooser for F
where
    F: FnMut(&[Point], &str) -> Choice,
{
    fn choose(&mut self, candidates: &[Point], prompt: &str) -> Choice {
        self(candidates, prompt)
    }
}

/// Answer to a single-candidate review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Reject,
    Cancel,
}

/// External decision point reviewing candidates one by one.
pub trait Pruner {
    /// Decides on one candidate.
    fn review(&mut self, candidate: &Point, label: &str) -> Verdict;
}

impl<F> Pruner for F
where
    F: FnMut(&Point, &str) -> Verdict,
{
    fn review(&mut self, candidate: &Point, label: &str) -> Verdict {
        self(candidate, label)
    }
}

/// Result of a disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// One candidate survived; the others were removed.
    Accepted { point: Point, rejected: Vec<Point> },
    /// The decision point closed without deciding.
    Cancelled,
    /// There was nothing to choose from.
    Empty,
}

impl Resolution {
    /// The accepted point, if any.
    #[must_use]
    pub fn accepted(&self) -> Option<&Point> {
        match self {
            Resolution::Accepted { point, .. } => Some(point),
            _ => None,
        }
    }
}

fn accept(candidates: &[Point], index: usize) -> Resolution {
    let rejected = candidates
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, p)| *p)
        .collect();
    Resolution::Accepted {
        point: candidates[index],
        rejected,
    }
}

/// Resolves `candidates` to one point with an index-based chooser.
///
/// A single candidate is accepted without consulting the chooser.
///
/// # Errors
///
/// Returns [`OperationError::InvalidChoice`] if the chooser answers with an
/// index outside the candidate list.
pub fn disambiguate<C: Chooser + ?Sized>(
    candidates: &[Point],
    prompt: &str,
    chooser: &mut C,
) -> Result<Resolution> {
    match candidates.len() {
        0 => return Ok(Resolution::Empty),
        1 => return Ok(accept(candidates, 0)),
        _ => {}
    }
    match chooser.choose(candidates, prompt) {
        Choice::Select(index) if index < candidates.len() => Ok(accept(candidates, index)),
        Choice::Select(index) => Err(OperationError::InvalidChoice {
            index,
            count: candidates.len(),
        }
        .into()),
        Choice::Cancel => {
            tracing::debug!(count = candidates.len(), "choice cancelled");
            Ok(Resolution::Cancelled)
        }
    }
}

/// Resolves `candidates` by reviewing them in order.
///
/// The first kept candidate wins. Rejected candidates are removed; once a
/// single candidate remains it is accepted without asking.
pub fn select_and_prune<P: Pruner + ?Sized>(
    candidates: &[Point],
    labels: &[String],
    pruner: &mut P,
) -> Resolution {
    let mut rejected = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        if candidates.len() - rejected.len() == 1 {
            return Resolution::Accepted {
                point: *candidate,
                rejected,
            };
        }
        let label = labels.get(i).map_or("", String::as_str);
        match pruner.review(candidate, label) {
            Verdict::Keep => {
                rejected.extend_from_slice(&candidates[i + 1..]);
                return Resolution::Accepted {
                    point: *candidate,
                    rejected,
                };
            }
            Verdict::Reject => rejected.push(*candidate),
            Verdict::Cancel => return Resolution::Cancelled,
        }
    }
    Resolution::Empty
}
