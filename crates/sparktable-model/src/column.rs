use serde::{Deserialize, Serialize};

use crate::{ColumnRole, RoleSet};

/// Description of one column in a host data feed.
///
/// Descriptors are immutable for the duration of one update cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Stable query name, unique within a feed when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_name: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub roles: RoleSet,
    /// Display/number format hint (e.g. `"0.00"`), passed through to rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Position of the column within the feed's column order.
    #[serde(default)]
    pub index: usize,
}

impl ColumnDescriptor {
    pub fn new(query_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            query_name: Some(query_name.into()),
            display_name: display_name.into(),
            roles: RoleSet::empty(),
            format: None,
            index: 0,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: ColumnRole) -> Self {
        self.roles.insert(role);
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Name used to key per-column settings.
    ///
    /// This is the query name, falling back to the display name when the host did not supply
    /// one. Two distinct columns without query names that share a display name therefore share
    /// settings; this is a known limitation of feeds that omit query names.
    pub fn key(&self) -> &str {
        self.query_name.as_deref().unwrap_or(&self.display_name)
    }

    pub fn has_role(&self, role: ColumnRole) -> bool {
        self.roles.contains(role)
    }
}
