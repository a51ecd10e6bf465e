use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role a column plays in a sparkline table.
///
/// The host tags every bound column with zero or more role names; only these four carry meaning
/// for the table. Columns with none of them are inert and never rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    /// Grouping column; distinct key combinations become logical rows.
    Category,
    /// Measure column shown as a plain cell.
    #[serde(alias = "measure")]
    Value,
    /// Column whose grouped cells form the points of an inline chart.
    #[serde(alias = "sparkline", alias = "series")]
    SparklineSeries,
    /// Column supplying explicit x coordinates for sparkline points.
    #[serde(alias = "axis")]
    XAxis,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Category,
        ColumnRole::Value,
        ColumnRole::SparklineSeries,
        ColumnRole::XAxis,
    ];

    /// Parses a host role name. Unknown names return `None` and are ignored by callers.
    pub fn from_role_name(name: &str) -> Option<Self> {
        match name {
            "category" => Some(ColumnRole::Category),
            "value" | "measure" => Some(ColumnRole::Value),
            "sparklineSeries" | "sparkline" | "series" => Some(ColumnRole::SparklineSeries),
            "xAxis" | "axis" => Some(ColumnRole::XAxis),
            _ => None,
        }
    }

    pub fn as_role_name(self) -> &'static str {
        match self {
            ColumnRole::Category => "category",
            ColumnRole::Value => "value",
            ColumnRole::SparklineSeries => "sparklineSeries",
            ColumnRole::XAxis => "xAxis",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            ColumnRole::Category => 1,
            ColumnRole::Value => 1 << 1,
            ColumnRole::SparklineSeries => 1 << 2,
            ColumnRole::XAxis => 1 << 3,
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_role_name())
    }
}

/// Set of [`ColumnRole`]s attached to one column.
///
/// Serialized as a list of role names (e.g. `["category"]`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnRole>", into = "Vec<ColumnRole>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn single(role: ColumnRole) -> Self {
        Self(role.bit())
    }

    pub fn insert(&mut self, role: ColumnRole) {
        self.0 |= role.bit();
    }

    #[must_use]
    pub fn contains(self, role: ColumnRole) -> bool {
        self.0 & role.bit() != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates roles in declaration order (category, value, sparkline series, x axis).
    pub fn iter(self) -> impl Iterator<Item = ColumnRole> {
        ColumnRole::ALL.into_iter().filter(move |role| self.contains(*role))
    }

    /// The first role in declaration order, if any.
    pub fn primary(self) -> Option<ColumnRole> {
        self.iter().next()
    }
}

impl FromIterator<ColumnRole> for RoleSet {
    fn from_iter<T: IntoIterator<Item = ColumnRole>>(iter: T) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<Vec<ColumnRole>> for RoleSet {
    fn from(value: Vec<ColumnRole>) -> Self {
        value.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<ColumnRole> {
    fn from(value: RoleSet) -> Self {
        value.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_accept_host_aliases() {
        assert_eq!(ColumnRole::from_role_name("measure"), Some(ColumnRole::Value));
        assert_eq!(
            ColumnRole::from_role_name("sparkline"),
            Some(ColumnRole::SparklineSeries)
        );
        assert_eq!(ColumnRole::from_role_name("axis"), Some(ColumnRole::XAxis));
        assert_eq!(ColumnRole::from_role_name("tooltips"), None);
    }

    #[test]
    fn role_set_iterates_in_declaration_order() {
        let set: RoleSet = [ColumnRole::XAxis, ColumnRole::Category].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![ColumnRole::Category, ColumnRole::XAxis]
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.primary(), Some(ColumnRole::Category));
    }
}
