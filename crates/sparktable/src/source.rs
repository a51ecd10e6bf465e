use sparktable_model::{
    CategoryKey, CellValue, ColumnDescriptor, DisplayCell, SelectionId, SeriesPoint,
};

use crate::classify::ColumnRoles;
use crate::host::SelectionIdBuilder;
use crate::options::TransformOptions;

static NULL_CELL: CellValue = CellValue::Null;

/// Inputs shared by every [`RowSource`] while grouping.
#[derive(Clone, Copy)]
pub struct SourceContext<'a> {
    pub options: &'a TransformOptions,
    pub host: Option<&'a dyn SelectionIdBuilder>,
}

impl<'a> SourceContext<'a> {
    pub fn new(options: &'a TransformOptions) -> Self {
        Self {
            options,
            host: None,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: &'a dyn SelectionIdBuilder) -> Self {
        self.host = Some(host);
        self
    }
}

/// A logical row before its series are materialized.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRow {
    pub key: CategoryKey,
    pub cells: Vec<DisplayCell>,
    /// Raw points per sparkline column, aligned with [`ColumnRoles::sparkline_series`].
    pub points: Vec<Vec<SeriesPoint>>,
    pub source_rows: Vec<usize>,
    pub selection_id: Option<SelectionId>,
}

impl PendingRow {
    pub(crate) fn new(key: CategoryKey, cells: Vec<DisplayCell>, series_count: usize) -> Self {
        Self {
            key,
            cells,
            points: vec![Vec::new(); series_count],
            source_rows: Vec::new(),
            selection_id: None,
        }
    }
}

/// A host data shape that can be grouped into logical rows.
///
/// Flat tables and categorical containers both implement this, so classification,
/// materialization and assembly are shared.
pub trait RowSource {
    /// Descriptors for every column the source carries.
    fn columns(&self) -> Vec<ColumnDescriptor>;

    /// Groups the source into logical rows. Rows come back in first-seen order.
    fn group(&self, roles: &ColumnRoles, ctx: &SourceContext<'_>) -> Vec<PendingRow>;
}

/// Cell of `row` for `column`; cells past the end of a short row read as null.
pub(crate) fn cell_at<'r>(row: &'r [CellValue], column: &ColumnDescriptor) -> &'r CellValue {
    row.get(column.index).unwrap_or(&NULL_CELL)
}
