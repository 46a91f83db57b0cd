mod arc;
mod circle;
mod line;

pub use arc::Arc;
pub use circle::Circle;
pub use line::Line;

use std::fmt;

use crate::error::Result;

/// How an arc takes part in an intersection solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcTreatment {
    /// Solve against the full supporting circle.
    #[default]
    AsCircle,
    /// Solve against the tangent line at the arc start.
    StartTangent,
    /// Solve against the tangent line at the arc end.
    EndTangent,
}

/// A geodetic object that can take part in an intersection solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeodeticObject {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
}

impl GeodeticObject {
    /// Reduces an arc to a circle or to one of its end tangents.
    ///
    /// Lines and circles are returned unchanged, so the result is never an `Arc`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tangent line cannot be built.
    pub fn normalized(&self, treatment: ArcTreatment) -> Result<GeodeticObject> {
        match (self, treatment) {
            (GeodeticObject::Arc(arc), ArcTreatment::AsCircle) => {
                Ok(GeodeticObject::Circle(*arc.as_circle()))
            }
            (GeodeticObject::Arc(arc), ArcTreatment::StartTangent) => {
                Ok(GeodeticObject::Line(arc.start_tangent()?))
            }
            (GeodeticObject::Arc(arc), ArcTreatment::EndTangent) => {
                Ok(GeodeticObject::Line(arc.end_tangent()?))
            }
            (other, _) => Ok(*other),
        }
    }

    /// Returns the line if this object is one.
    #[must_use]
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            GeodeticObject::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Short name of the object kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GeodeticObject::Line(_) => "line",
            GeodeticObject::Circle(_) => "circle",
            GeodeticObject::Arc(_) => "arc",
        }
    }
}

impl From<Line> for GeodeticObject {
    fn from(line: Line) -> Self {
        GeodeticObject::Line(line)
    }
}

impl From<Circle> for GeodeticObject {
    fn from(circle: Circle) -> Self {
        GeodeticObject::Circle(circle)
    }
}

impl From<Arc> for GeodeticObject {
    fn from(arc: Arc) -> Self {
        GeodeticObject::Arc(arc)
    }
}

impl fmt::Display for GeodeticObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeodeticObject::Line(line) => write!(f, "line {line}"),
            GeodeticObject::Circle(circle) => write!(f, "circle {circle}"),
            GeodeticObject::Arc(arc) => write!(f, "arc {arc}"),
        }
    }
}
