use sparktable_model::{ColumnDescriptor, ColumnRole, RoleSet};

use crate::options::MultiRolePolicy;

/// Columns partitioned by role, each list in feed column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnRoles {
    pub category: Vec<ColumnDescriptor>,
    pub value: Vec<ColumnDescriptor>,
    pub sparkline_series: Vec<ColumnDescriptor>,
    pub x_axis: Vec<ColumnDescriptor>,
}

impl ColumnRoles {
    /// `true` when the feed has something to draw besides labels.
    pub fn has_renderable_columns(&self) -> bool {
        !self.value.is_empty() || !self.sparkline_series.is_empty()
    }

    /// Category columns followed by value columns.
    ///
    /// A column that is also a sparkline column is left out so display and sparkline columns
    /// never overlap.
    pub fn display_columns(&self) -> Vec<ColumnDescriptor> {
        self.category
            .iter()
            .chain(self.value.iter())
            .filter(|column| !self.is_sparkline_column(column))
            .cloned()
            .collect()
    }

    /// X-axis column paired with the sparkline column at `series_position`.
    ///
    /// Sparkline column `i` pairs with x-axis column `i`. A single x-axis column applies to every
    /// sparkline column.
    pub fn x_axis_for(&self, series_position: usize) -> Option<&ColumnDescriptor> {
        match self.x_axis.as_slice() {
            [only] => Some(only),
            axes => axes.get(series_position),
        }
    }

    /// Every column carrying at least one role, without repeats.
    pub fn role_bearing_columns(&self) -> Vec<&ColumnDescriptor> {
        let mut seen: Vec<&ColumnDescriptor> = Vec::new();
        for column in self
            .category
            .iter()
            .chain(&self.value)
            .chain(&self.sparkline_series)
            .chain(&self.x_axis)
        {
            if !seen.iter().any(|c| c.index == column.index && c.key() == column.key()) {
                seen.push(column);
            }
        }
        seen
    }

    fn is_sparkline_column(&self, column: &ColumnDescriptor) -> bool {
        self.sparkline_series
            .iter()
            .any(|s| s.index == column.index && s.key() == column.key())
    }
}

/// Partitions `columns` into category, value, sparkline-series and x-axis lists.
///
/// Columns without any role are inert and appear in no list. Columns with several roles are
/// reported with a warning and handled per `policy`; classification itself never fails.
pub fn classify(columns: &[ColumnDescriptor], policy: MultiRolePolicy) -> ColumnRoles {
    let mut ordered: Vec<&ColumnDescriptor> = columns.iter().collect();
    ordered.sort_by_key(|column| column.index);

    let mut roles = ColumnRoles::default();
    for column in ordered {
        if column.roles.is_empty() {
            continue;
        }

        let column = if column.roles.len() > 1 {
            let names: Vec<&str> = column.roles.iter().map(ColumnRole::as_role_name).collect();
            match policy {
                MultiRolePolicy::KeepAll => {
                    log::warn!(
                        "column {:?} carries multiple roles [{}]; classifying it into each",
                        column.key(),
                        names.join(", ")
                    );
                    column.clone()
                }
                MultiRolePolicy::FirstWins => {
                    let Some(primary) = column.roles.primary() else {
                        continue;
                    };
                    log::warn!(
                        "column {:?} carries multiple roles [{}]; keeping {primary}",
                        column.key(),
                        names.join(", ")
                    );
                    ColumnDescriptor {
                        roles: RoleSet::single(primary),
                        ..column.clone()
                    }
                }
            }
        } else {
            column.clone()
        };

        for role in column.roles.iter() {
            let list = match role {
                ColumnRole::Category => &mut roles.category,
                ColumnRole::Value => &mut roles.value,
                ColumnRole::SparklineSeries => &mut roles.sparkline_series,
                ColumnRole::XAxis => &mut roles.x_axis,
            };
            list.push(column.clone());
        }
    }
    roles
}
