use thiserror::Error;

use crate::math::Decimal;

/// Top-level error type for the Kimu construction engine.
#[derive(Debug, Error)]
pub enum KimuError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Errors raised while constructing geodetic objects.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("line sample points coincide at ({x}, {y})")]
    ZeroLength { x: Decimal, y: Decimal },

    #[error("circle radius {0} is negative")]
    NegativeRadius(Decimal),

    #[error("degenerate curve: {0}")]
    DegenerateCurve(String),

    #[error("invalid coordinate {value:?}: {reason}")]
    InvalidCoordinate { value: String, reason: String },

    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// Errors related to the shape of a user selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no features selected")]
    Empty,

    #[error("features come from different reference frames ({expected} and {found})")]
    MixedFrames { expected: String, found: String },

    #[error("selection implies {found} points, expected {expected}")]
    WrongPointCount { expected: usize, found: usize },

    #[error("cannot build intersection pairs from {lines} line(s) and {points} point(s)")]
    UnsupportedComposition { lines: usize, points: usize },

    #[error("object grouping holds {0} objects, expected exactly 2")]
    WrongObjectCount(usize),

    #[error("polyline needs at least two vertices, got {0}")]
    ShortPolyline(usize),

    #[error("clicked point ({x}, {y}) is not an endpoint of the boundary line")]
    NotAnEndpoint { x: Decimal, y: Decimal },
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("choice {index} is out of range for {count} candidates")]
    InvalidChoice { index: usize, count: usize },

    #[error("workflow already finished")]
    Finished,

    #[error("no choice is pending")]
    NoPendingChoice,
}

/// Errors raised while handing results to the host.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("{points} points but {labels} labels")]
    LabelMismatch { points: usize, labels: usize },

    #[error("coordinate {0} cannot be represented on the host")]
    Unrepresentable(Decimal),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for results using [`KimuError`].
pub type Result<T> = std::result::Result<T, KimuError>;
