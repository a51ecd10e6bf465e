use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CellValue, ModelError};

pub const DEFAULT_SERIES_COLOR: &str = "#118DFF";
pub const DEFAULT_STROKE_WIDTH: f64 = 1.5;
pub const DEFAULT_CELL_PADDING: u32 = 4;

/// Chart drawn inside a sparkline cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Area,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Area => "area",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            // The formatting panel historically labelled bars as "column".
            "bar" | "column" => Ok(ChartKind::Bar),
            "area" => Ok(ChartKind::Area),
            _ => Err(ModelError::UnknownChartKind(s.to_string())),
        }
    }
}

/// Formatting for one sparkline column.
///
/// Every field has a default so partial payloads from the formatting panel deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SparklineSettings {
    pub chart_kind: ChartKind,
    pub color: String,
    pub stroke_width: f64,
}

impl Default for SparklineSettings {
    fn default() -> Self {
        Self {
            chart_kind: ChartKind::Line,
            color: DEFAULT_SERIES_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Formatting for one value (measure) column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    /// Cell padding in pixels.
    pub padding: u32,
    /// `None` renders numbers as delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u8>,
}

impl Default for ValueSettings {
    fn default() -> Self {
        Self {
            background_color: None,
            font_color: None,
            padding: DEFAULT_CELL_PADDING,
            decimal_places: None,
        }
    }
}

impl ValueSettings {
    /// Formats a value cell for display, applying `decimal_places` to numbers.
    pub fn format_value(&self, value: &CellValue) -> String {
        match (value, self.decimal_places) {
            (CellValue::Number(n), Some(places)) if n.is_finite() => {
                format!("{:.*}", usize::from(places), n)
            }
            _ => value.display_string(),
        }
    }
}
