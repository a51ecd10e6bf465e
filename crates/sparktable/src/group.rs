//! Grouping of flat, row-major tables into logical rows.

use sparktable_model::{CategoryKey, CellValue, ColumnDescriptor, DisplayCell, SeriesPoint};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::classify::ColumnRoles;
use crate::source::{cell_at, PendingRow, RowSource, SourceContext};

/// Flat table rows aligned with column descriptors by `index`.
#[derive(Clone, Debug)]
pub struct TableSource<'a> {
    columns: Vec<ColumnDescriptor>,
    rows: &'a [Vec<CellValue>],
}

impl<'a> TableSource<'a> {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: &'a [Vec<CellValue>]) -> Self {
        Self { columns, rows }
    }
}

impl RowSource for TableSource<'_> {
    fn columns(&self) -> Vec<ColumnDescriptor> {
        self.columns.clone()
    }

    fn group(&self, roles: &ColumnRoles, ctx: &SourceContext<'_>) -> Vec<PendingRow> {
        group_table_rows(self.rows, roles, ctx)
    }
}

/// Collapses raw rows sharing a category key into one [`PendingRow`] each.
///
/// * With no category columns every raw row lands in a single group.
/// * Groups appear in the order their key was first seen.
/// * Display cells come from the first raw row of each group.
/// * Every raw row with a finite number in a sparkline column appends a point to that column's
///   sequence. The point's `x` is the paired x-axis cell (see [`ColumnRoles::x_axis_for`]), or
///   the zero-based index of the raw row within the whole input.
pub fn group_table_rows(
    rows: &[Vec<CellValue>],
    roles: &ColumnRoles,
    ctx: &SourceContext<'_>,
) -> Vec<PendingRow> {
    if !has_role_data(rows, roles) {
        return Vec::new();
    }

    let display_columns = roles.display_columns();
    let series_count = roles.sparkline_series.len();

    let mut groups: Vec<PendingRow> = Vec::new();
    let mut slots: HashMap<CategoryKey, usize> = HashMap::new();

    for (row_index, row) in rows.iter().enumerate() {
        let key = CategoryKey::from_values(roles.category.iter().map(|c| cell_at(row, c)));

        let slot = match slots.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let cells = display_columns
                    .iter()
                    .map(|column| DisplayCell {
                        value: cell_at(row, column).clone(),
                        column: column.clone(),
                    })
                    .collect();
                let mut pending = PendingRow::new(entry.key().clone(), cells, series_count);
                pending.selection_id = ctx.host.map(|host| host.table_row(row_index));
                groups.push(pending);
                *entry.insert(groups.len() - 1)
            }
        };

        let group = &mut groups[slot];
        group.source_rows.push(row_index);
        for (position, column) in roles.sparkline_series.iter().enumerate() {
            let Some(y) = cell_at(row, column).as_finite_number() else {
                continue;
            };
            let x = match roles.x_axis_for(position) {
                Some(axis) => cell_at(row, axis).clone(),
                None => CellValue::Number(row_index as f64),
            };
            group.points[position].push(SeriesPoint { x, y });
        }
    }

    log::debug!(
        "grouped {} raw rows into {} logical rows",
        rows.len(),
        groups.len()
    );
    groups
}

fn has_role_data(rows: &[Vec<CellValue>], roles: &ColumnRoles) -> bool {
    let columns = roles.role_bearing_columns();
    rows.iter()
        .any(|row| columns.iter().any(|column| !cell_at(row, column).is_null()))
}
