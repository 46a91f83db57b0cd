use std::fmt;

use crate::error::{Result, SelectionError};
use crate::geometry::{Line, Point};

/// Identifier of the reference frame a feature's coordinates live in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameId(pub String);

impl From<&str> for FrameId {
    fn from(value: &str) -> Self {
        FrameId(value.to_owned())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geometry carried by a picked feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureGeometry {
    Line(Line),
    Point(Point),
}

impl FeatureGeometry {
    /// Number of points this geometry contributes to a selection.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            FeatureGeometry::Line(_) => 2,
            FeatureGeometry::Point(_) => 1,
        }
    }
}

/// A user-picked feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub geometry: FeatureGeometry,
    pub frame: FrameId,
}

impl Feature {
    /// Creates a line feature.
    #[must_use]
    pub fn line(line: Line, frame: impl Into<FrameId>) -> Self {
        Self {
            geometry: FeatureGeometry::Line(line),
            frame: frame.into(),
        }
    }

    /// Creates a point feature.
    #[must_use]
    pub fn point(point: Point, frame: impl Into<FrameId>) -> Self {
        Self {
            geometry: FeatureGeometry::Point(point),
            frame: frame.into(),
        }
    }

    /// Creates a line feature from a polyline.
    ///
    /// The line runs straight from the first to the last vertex; inner
    /// vertices are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the polyline has fewer than two vertices or its
    /// first and last vertices coincide.
    pub fn from_polyline(vertices: &[Point], frame: impl Into<FrameId>) -> Result<Self> {
        let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
            return Err(SelectionError::ShortPolyline(vertices.len()).into());
        };
        if vertices.len() < 2 {
            return Err(SelectionError::ShortPolyline(vertices.len()).into());
        }
        Ok(Self::line(Line::new(*first, *last)?, frame))
    }
}

/// An ordered set of picked features, all expected to share one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    features: Vec<Feature>,
}

impl Selection {
    /// Creates a selection from features in pick order.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Appends a feature.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Returns the features in pick order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Total implied points: 2 per line feature, 1 per point feature.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.features.iter().map(|f| f.geometry.point_count()).sum()
    }

    /// Line features in pick order.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        self.features
            .iter()
            .filter_map(|f| match f.geometry {
                FeatureGeometry::Line(line) => Some(line),
                FeatureGeometry::Point(_) => None,
            })
            .collect()
    }

    /// Point features in pick order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.features
            .iter()
            .filter_map(|f| match f.geometry {
                FeatureGeometry::Point(point) => Some(point),
                FeatureGeometry::Line(_) => None,
            })
            .collect()
    }

    /// Checks the selection before any solve.
    ///
    /// Returns the frame shared by every feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is empty, mixes frames, or implies a
    /// number of points other than `expected_points`.
    pub fn validate(&self, expected_points: usize) -> Result<&FrameId> {
        let Some(first) = self.features.first() else {
            return Err(SelectionError::Empty.into());
        };
        if let Some(other) = self.features.iter().find(|f| f.frame != first.frame) {
            return Err(SelectionError::MixedFrames {
                expected: first.frame.to_string(),
                found: other.frame.to_string(),
            }
            .into());
        }
        let found = self.point_count();
        if found != expected_points {
            return Err(SelectionError::WrongPointCount {
                expected: expected_points,
                found,
            }
            .into());
        }
        Ok(&first.frame)
    }
}

impl FromIterator<Feature> for Selection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
