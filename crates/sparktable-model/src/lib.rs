//! `sparktable-model` defines the data structures shared by the sparkline table pipeline and
//! its renderers.
//!
//! Everything here is plain data with a JSON-safe `serde` schema so view models and settings can
//! cross host boundaries unchanged.

#![forbid(unsafe_code)]

mod column;
mod error;
mod role;
pub mod settings;
mod series;
mod value;
mod view_model;

pub use column::ColumnDescriptor;
pub use error::ModelError;
pub use role::{ColumnRole, RoleSet};
pub use series::{Series, SeriesOrigin, SeriesPoint};
pub use settings::{ChartKind, SparklineSettings, ValueSettings};
pub use value::{CategoryKey, CategoryKeyPart, CellValue};
pub use view_model::{DisplayCell, LogicalRow, SelectionId, SeriesCell, ViewModel};
