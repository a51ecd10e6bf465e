use sparktable_model::{LogicalRow, ViewModel};

use crate::classify::ColumnRoles;

/// Combines classified columns and materialized rows into a [`ViewModel`].
///
/// Returns `None` when the feed has nothing renderable (no value and no sparkline columns) or
/// produced no rows; callers show an empty state rather than treating this as an error.
pub fn assemble(roles: &ColumnRoles, rows: Vec<LogicalRow>) -> Option<ViewModel> {
    if !roles.has_renderable_columns() {
        log::debug!("no value or sparkline columns bound; nothing to render");
        return None;
    }
    if rows.is_empty() {
        return None;
    }

    Some(ViewModel {
        display_columns: roles.display_columns(),
        sparkline_columns: roles.sparkline_series.clone(),
        x_axis_columns: roles.x_axis.clone(),
        rows,
    })
}
