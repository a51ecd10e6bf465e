use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CellValue, ColumnDescriptor, Series};

/// Opaque host identifier correlating a logical row back to its source rows.
///
/// The core never interprets it; it is only round-tripped for selection state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionId(pub String);

impl SelectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A plain (non-chart) table cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayCell {
    pub value: CellValue,
    pub column: ColumnDescriptor,
}

/// Series for one sparkline column within a [`LogicalRow`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesCell {
    pub column: ColumnDescriptor,
    pub series: Series,
}

/// One rendered table row, after grouping raw rows by category key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalRow {
    /// One cell per display column, category columns first.
    pub cells: Vec<DisplayCell>,
    /// One entry per sparkline column, aligned with [`ViewModel::sparkline_columns`].
    pub series: Vec<SeriesCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_id: Option<SelectionId>,
    /// Indices of the raw rows (or category positions) that produced this row.
    #[serde(default)]
    pub source_rows: Vec<usize>,
}

impl LogicalRow {
    /// Looks up the series for a sparkline column by its settings key.
    pub fn series_for(&self, column_key: &str) -> Option<&Series> {
        self.series
            .iter()
            .find(|cell| cell.column.key() == column_key)
            .map(|cell| &cell.series)
    }

    /// Looks up a display cell by its column key.
    pub fn cell_for(&self, column_key: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|cell| cell.column.key() == column_key)
            .map(|cell| &cell.value)
    }
}

/// Immutable snapshot consumed by rendering; rebuilt wholesale on every update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Category columns followed by value columns.
    pub display_columns: Vec<ColumnDescriptor>,
    pub sparkline_columns: Vec<ColumnDescriptor>,
    pub x_axis_columns: Vec<ColumnDescriptor>,
    pub rows: Vec<LogicalRow>,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Settings keys of the sparkline columns, in column order.
    pub fn series_column_names(&self) -> Vec<String> {
        self.sparkline_columns
            .iter()
            .map(|c| c.key().to_string())
            .collect()
    }

    /// Settings keys of the value-role display columns, in column order, without repeats.
    pub fn value_column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for column in &self.display_columns {
            if column.has_role(crate::ColumnRole::Value) && !names.iter().any(|n| n == column.key())
            {
                names.push(column.key().to_string());
            }
        }
        names
    }
}
