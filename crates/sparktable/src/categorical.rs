//! Adapter for categorical sources: one category axis plus value vectors aligned with it.

use sparktable_model::{CategoryKey, CellValue, ColumnDescriptor, DisplayCell, SeriesPoint};
use std::collections::HashMap;
use std::ops::Range;

use crate::classify::ColumnRoles;
use crate::data_view::CategoricalData;
use crate::options::CategoricalSeriesMode;
use crate::source::{PendingRow, RowSource, SourceContext};

pub struct CategoricalSource<'a> {
    data: &'a CategoricalData,
    columns: Vec<ColumnDescriptor>,
}

impl<'a> CategoricalSource<'a> {
    /// Descriptors are indexed by their position in `categories` followed by `values`. Host
    /// metadata indices may repeat (grouped series share a source column) and are not used to
    /// locate vectors.
    pub fn new(data: &'a CategoricalData) -> Self {
        let columns = data
            .categories
            .iter()
            .chain(&data.values)
            .enumerate()
            .map(|(position, column)| ColumnDescriptor {
                index: position,
                ..column.source.to_descriptor(position)
            })
            .collect();
        Self { data, columns }
    }

    /// Cell vectors keyed by descriptor `index`, which is unique per vector.
    fn vectors(&self) -> HashMap<usize, &'a [CellValue]> {
        let data: &'a CategoricalData = self.data;
        self.columns
            .iter()
            .zip(data.categories.iter().chain(&data.values))
            .map(|(descriptor, column)| (descriptor.index, column.values.as_slice()))
            .collect()
    }
}

impl<'a> RowSource for CategoricalSource<'a> {
    fn columns(&self) -> Vec<ColumnDescriptor> {
        self.columns.clone()
    }

    fn group(&self, roles: &ColumnRoles, ctx: &SourceContext<'_>) -> Vec<PendingRow> {
        let vectors = self.vectors();
        let vector_of = |column: &ColumnDescriptor| -> &'a [CellValue] {
            vectors.get(&column.index).copied().unwrap_or(&[])
        };

        let role_data = roles
            .role_bearing_columns()
            .into_iter()
            .any(|column| vector_of(column).iter().any(|cell| !cell.is_null()));
        if !role_data {
            return Vec::new();
        }

        // The category axis drives the row count; without one the source is a single row.
        let row_count = match roles.category.first() {
            Some(axis) => vector_of(axis).len(),
            None => 1,
        };

        let display_columns = roles.display_columns();
        let mut rows = Vec::with_capacity(row_count);
        for index in 0..row_count {
            let cells: Vec<DisplayCell> = display_columns
                .iter()
                .map(|column| DisplayCell {
                    value: vector_of(column).get(index).cloned().unwrap_or_default(),
                    column: column.clone(),
                })
                .collect();
            let key_values: Vec<CellValue> = roles
                .category
                .iter()
                .map(|column| vector_of(column).get(index).cloned().unwrap_or_default())
                .collect();
            let key = CategoryKey::from_values(&key_values);

            let mut pending = PendingRow::new(key, cells, roles.sparkline_series.len());
            pending.source_rows.push(index);
            pending.selection_id = ctx.host.map(|host| host.category_row(index));

            for (position, column) in roles.sparkline_series.iter().enumerate() {
                let values = vector_of(column);
                let axis = roles.x_axis_for(position).map(|axis| vector_of(axis));
                let range = series_range(
                    ctx.options.categorical_series_mode,
                    values.len(),
                    index,
                    row_count,
                );
                pending.points[position] = collect_points(values, axis, range);
            }
            rows.push(pending);
        }
        rows
    }
}

/// Portion of an `len`-element series vector that belongs to row `index` of `row_count`.
fn series_range(
    mode: CategoricalSeriesMode,
    len: usize,
    index: usize,
    row_count: usize,
) -> Range<usize> {
    match mode {
        CategoricalSeriesMode::FullVector => 0..len,
        CategoricalSeriesMode::PerCategorySlice => {
            let rows = row_count.max(1);
            (index * len / rows)..((index + 1) * len / rows)
        }
    }
}

/// Finite values in `range`, positioned by the explicit axis cell when present and by their
/// index within the full vector otherwise.
fn collect_points(
    values: &[CellValue],
    axis: Option<&[CellValue]>,
    range: Range<usize>,
) -> Vec<SeriesPoint> {
    range
        .filter_map(|position| {
            let y = values.get(position)?.as_finite_number()?;
            let x = match axis {
                Some(axis) => axis.get(position).cloned().unwrap_or_default(),
                None => CellValue::Number(position as f64),
            };
            Some(SeriesPoint { x, y })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_partition_the_vector() {
        let mode = CategoricalSeriesMode::PerCategorySlice;
        assert_eq!(series_range(mode, 8, 0, 2), 0..4);
        assert_eq!(series_range(mode, 8, 1, 2), 4..8);
        assert_eq!(series_range(mode, 5, 0, 2), 0..2);
        assert_eq!(series_range(mode, 5, 1, 2), 2..5);
        assert_eq!(
            series_range(CategoricalSeriesMode::FullVector, 5, 1, 2),
            0..5
        );
    }

    #[test]
    fn points_skip_non_finite_values() {
        let values = vec![
            CellValue::Number(1.0),
            CellValue::Null,
            CellValue::Number(f64::NAN),
            CellValue::Number(4.0),
        ];
        let points = collect_points(&values, None, 0..values.len());
        assert_eq!(
            points,
            vec![SeriesPoint::at_index(0, 1.0), SeriesPoint::at_index(3, 4.0)]
        );
    }
}
