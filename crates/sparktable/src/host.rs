use sparktable_model::SelectionId;

/// Host hook that mints correlation identifiers for logical rows.
///
/// Without a host (headless use, tests) rows carry no identifier.
pub trait SelectionIdBuilder {
    /// Identifier for a logical row built from a flat table, keyed by its first raw row.
    fn table_row(&self, row_index: usize) -> SelectionId;

    /// Identifier for the logical row at `category_index` of a categorical source.
    fn category_row(&self, category_index: usize) -> SelectionId;
}
