//! Data transformation and view-model construction for sparkline tables.
//!
//! A host delivers a role-tagged [`DataView`] (either a flat row-major table or a categorical
//! container). The pipeline:
//! - classifies columns by role ([`classify`]),
//! - groups raw rows into logical rows by category key ([`group_table_rows`], or the categorical
//!   adapter [`CategoricalSource`]),
//! - materializes one point series per sparkline column, synthesizing a placeholder when a
//!   series has no numeric data ([`materialize`]),
//! - assembles the immutable [`ViewModel`] consumed by rendering ([`assemble`]).
//!
//! [`SettingsStore`] keeps per-column formatting in step with the view model's column set
//! without resetting user edits on every repaint.
//!
//! Everything runs synchronously; an update always completes before the next one starts.

#![forbid(unsafe_code)]

mod assemble;
mod categorical;
mod classify;
mod data_view;
mod error;
mod group;
mod host;
mod materialize;
mod options;
mod pipeline;
mod settings_store;
mod source;

pub use crate::assemble::assemble;
pub use crate::categorical::CategoricalSource;
pub use crate::classify::{classify, ColumnRoles};
pub use crate::data_view::{
    CategoricalColumn, CategoricalData, ColumnMetadata, DataView, DataViewMetadata, SourceShape,
    TableData,
};
pub use crate::error::{TransformError, TransformResult};
pub use crate::group::{group_table_rows, TableSource};
pub use crate::host::SelectionIdBuilder;
pub use crate::materialize::{materialize, materialize_row, PlaceholderSource, RandomPlaceholder};
pub use crate::options::{
    CategoricalSeriesMode, MultiRolePolicy, SettingsDefaults, TransformOptions,
    DEFAULT_PLACEHOLDER_MAX, DEFAULT_PLACEHOLDER_POINTS,
};
pub use crate::pipeline::{SparklineTable, Transformer};
pub use crate::settings_store::{
    ColumnSetHash, SettingsPatch, SettingsSnapshot, SettingsStore, SyncOutcome, SyncState,
};
pub use crate::source::{PendingRow, RowSource, SourceContext};

pub use sparktable_model::{
    CategoryKey, CellValue, ChartKind, ColumnDescriptor, ColumnRole, DisplayCell, LogicalRow,
    RoleSet, SelectionId, Series, SeriesCell, SeriesOrigin, SeriesPoint, SparklineSettings,
    ValueSettings, ViewModel,
};
