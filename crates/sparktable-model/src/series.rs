use serde::{Deserialize, Serialize};

use crate::CellValue;

/// One point of a sparkline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Explicit x-axis cell when the feed binds one, otherwise the numeric row position.
    pub x: CellValue,
    /// Always finite once the series has been materialized.
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: impl Into<CellValue>, y: f64) -> Self {
        Self { x: x.into(), y }
    }

    /// Point positioned by a zero-based index.
    pub fn at_index(index: usize, y: f64) -> Self {
        Self {
            x: CellValue::Number(index as f64),
            y,
        }
    }
}

/// Where the points of a [`Series`] came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesOrigin {
    #[default]
    Data,
    /// Synthesized because the feed had no numeric points for this row/column pair.
    Placeholder,
}

/// Finalized point sequence for one (logical row, sparkline column) pair.
///
/// Points are kept in emission order; they are not sorted by `x`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub points: Vec<SeriesPoint>,
    #[serde(default)]
    pub origin: SeriesOrigin,
}

impl Series {
    pub fn from_points(points: Vec<SeriesPoint>) -> Self {
        Self {
            points,
            origin: SeriesOrigin::Data,
        }
    }

    pub fn placeholder(points: Vec<SeriesPoint>) -> Self {
        Self {
            points,
            origin: SeriesOrigin::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == SeriesOrigin::Placeholder
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.y)
    }

    /// `(min, max)` of the y values, or `None` for an empty series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y_values().fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}
