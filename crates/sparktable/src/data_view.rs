//! Host data-view payloads.
//!
//! The host binds data as JSON with a `metadata.columns` list plus either a row-major `table`
//! container or a `categorical` container. Which one is in use is detected from the payload
//! itself; callers never say.

use serde::{Deserialize, Serialize};
use sparktable_model::{CellValue, ColumnDescriptor, ColumnRole, RoleSet};
use std::collections::BTreeMap;

use crate::categorical::CategoricalSource;
use crate::error::{TransformError, TransformResult};
use crate::group::TableSource;
use crate::source::RowSource;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataView {
    #[serde(default)]
    pub metadata: DataViewMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalData>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMetadata {
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

/// Column metadata as delivered by the host, with roles as a `{name: bool}` map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_name: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub roles: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl ColumnMetadata {
    /// Builds a descriptor; `position` is used when the host omitted `index`.
    pub fn to_descriptor(&self, position: usize) -> ColumnDescriptor {
        let mut roles = RoleSet::empty();
        for (name, enabled) in &self.roles {
            if !*enabled {
                continue;
            }
            match ColumnRole::from_role_name(name) {
                Some(role) => roles.insert(role),
                None => log::debug!(
                    "ignoring unknown role {name:?} on column {:?}",
                    self.display_name
                ),
            }
        }

        ColumnDescriptor {
            query_name: self.query_name.clone(),
            display_name: self.display_name.clone(),
            roles,
            format: self.format.clone(),
            index: self.index.unwrap_or(position),
        }
    }
}

/// Row-major table container. Each row is aligned with the column `index` values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

/// Categorical container: category axes plus value vectors aligned with them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalData {
    #[serde(default)]
    pub categories: Vec<CategoricalColumn>,
    #[serde(default)]
    pub values: Vec<CategoricalColumn>,
}

impl CategoricalData {
    fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.values.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub source: ColumnMetadata,
    #[serde(default)]
    pub values: Vec<CellValue>,
}

/// Source shape detected from a [`DataView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceShape {
    Table,
    Categorical,
}

impl DataView {
    pub fn from_json(json: &str) -> TransformResult<Self> {
        serde_json::from_str(json).map_err(TransformError::InvalidDataView)
    }

    /// A table with rows wins over a categorical container; an empty table is only used when
    /// there is nothing categorical to fall back on.
    pub fn shape(&self) -> Option<SourceShape> {
        let table = self.table.as_ref();
        let categorical = self.categorical.as_ref();
        if table.is_some_and(|t| !t.rows.is_empty()) {
            return Some(SourceShape::Table);
        }
        if categorical.is_some_and(|c| !c.is_empty()) {
            return Some(SourceShape::Categorical);
        }
        if table.is_some() {
            return Some(SourceShape::Table);
        }
        None
    }

    pub fn column_descriptors(&self) -> Vec<ColumnDescriptor> {
        self.metadata
            .columns
            .iter()
            .enumerate()
            .map(|(position, column)| column.to_descriptor(position))
            .collect()
    }

    /// Wraps the detected container in the matching [`RowSource`].
    pub fn row_source(&self) -> Option<Box<dyn RowSource + '_>> {
        match self.shape()? {
            SourceShape::Table => {
                let table = self.table.as_ref()?;
                Some(Box::new(TableSource::new(
                    self.column_descriptors(),
                    &table.rows,
                )))
            }
            SourceShape::Categorical => {
                let categorical = self.categorical.as_ref()?;
                Some(Box::new(CategoricalSource::new(categorical)))
            }
        }
    }
}
