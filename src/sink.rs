//! Handing accepted points to the host.

use std::path::Path;

use nalgebra::Point2;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::error::{Result, SinkError};
use crate::geometry::Point;
use crate::math::{Decimal, HOST_PRECISION};

/// An accepted point with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPoint {
    pub label: String,
    pub point: Point,
}

/// One persisted row; the id column holds the label.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    xcoord: Decimal,
    ycoord: Decimal,
}

/// Receiver of accepted points.
pub trait ResultSink {
    /// Takes `points` with one label per point.
    ///
    /// # Errors
    ///
    /// Returns an error if the labels do not match the points one to one, or
    /// the host rejects them.
    fn emit(&mut self, points: &[Point], labels: &[String]) -> Result<()>;
}

/// A sink that keeps everything it receives.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Vec<LabeledPoint>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points received so far, in emit order.
    #[must_use]
    pub fn entries(&self) -> &[LabeledPoint] {
        &self.entries
    }

    /// Received points without labels.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.entries.iter().map(|e| e.point).collect()
    }

    /// Writes the received points as CSV with an `id,xcoord,ycoord` header.
    ///
    /// Coordinates are rounded to three decimals.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Csv`] if the file cannot be created or a row
    /// cannot be written, and [`SinkError::Io`] if the final flush fails.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(path)
            .map_err(SinkError::from)?;
        for entry in &self.entries {
            let p = entry.point.rounded(HOST_PRECISION);
            writer
                .serialize(CsvRow {
                    id: &entry.label,
                    xcoord: p.x,
                    ycoord: p.y,
                })
                .map_err(SinkError::from)?;
        }
        if self.entries.is_empty() {
            writer
                .write_record(["id", "xcoord", "ycoord"])
                .map_err(SinkError::from)?;
        }
        writer.flush().map_err(SinkError::from)?;
        tracing::debug!(path = %path.display(), rows = self.entries.len(), "results persisted");
        Ok(())
    }
}

impl ResultSink for MemorySink {
    fn emit(&mut self, points: &[Point], labels: &[String]) -> Result<()> {
        if points.len() != labels.len() {
            return Err(SinkError::LabelMismatch {
                points: points.len(),
                labels: labels.len(),
            }
            .into());
        }
        self.entries
            .extend(points.iter().zip(labels).map(|(point, label)| LabeledPoint {
                label: label.clone(),
                point: *point,
            }));
        Ok(())
    }
}

/// Converts a point to host floating point, rounded to `precision` decimals.
///
/// # Errors
///
/// Returns [`SinkError::Unrepresentable`] if a coordinate has no `f64` form.
pub fn to_host(point: &Point, precision: u32) -> Result<Point2<f64>> {
    let p = point.rounded(precision);
    Ok(Point2::new(host_value(p.x)?, host_value(p.y)?))
}

fn host_value(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| SinkError::Unrepresentable(value).into())
}
