use serde::{Deserialize, Serialize};
use sparktable_model::{SparklineSettings, ValueSettings};

use crate::error::{TransformError, TransformResult};

/// Number of points synthesized for a series with no numeric data.
pub const DEFAULT_PLACEHOLDER_POINTS: usize = 8;
/// Exclusive upper bound for synthesized placeholder values.
pub const DEFAULT_PLACEHOLDER_MAX: f64 = 100.0;

/// How columns tagged with more than one role are classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MultiRolePolicy {
    /// The column is placed in every list whose role it carries.
    #[default]
    KeepAll,
    /// Only the first role in precedence order (category, value, sparkline series, x axis) is
    /// kept; the descriptor's role set is narrowed to that role.
    FirstWins,
}

/// How a categorical source assigns sparkline vectors to logical rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoricalSeriesMode {
    /// Every logical row receives the entire series vector, so all rows show the same
    /// sparkline unless the host segmented the vector upstream.
    #[default]
    FullVector,
    /// Row `i` of `c` rows receives the contiguous segment `[i*n/c, (i+1)*n/c)` of an
    /// `n`-element vector.
    PerCategorySlice,
}

/// Pipeline configuration.
///
/// Deserializes from partial camelCase JSON; missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Length of a synthesized placeholder series. Values below 1 are treated as 1.
    pub placeholder_points: usize,
    /// Placeholder y values are drawn from `[0, placeholder_max)`.
    pub placeholder_max: f64,
    pub multi_role_policy: MultiRolePolicy,
    pub categorical_series_mode: CategoricalSeriesMode,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            placeholder_points: DEFAULT_PLACEHOLDER_POINTS,
            placeholder_max: DEFAULT_PLACEHOLDER_MAX,
            multi_role_policy: MultiRolePolicy::default(),
            categorical_series_mode: CategoricalSeriesMode::default(),
        }
    }
}

impl TransformOptions {
    pub fn from_json(json: &str) -> TransformResult<Self> {
        serde_json::from_str(json).map_err(TransformError::InvalidOptions)
    }

    pub(crate) fn placeholder_len(&self) -> usize {
        self.placeholder_points.max(1)
    }

    pub(crate) fn placeholder_upper_bound(&self) -> f64 {
        if self.placeholder_max.is_finite() && self.placeholder_max > 0.0 {
            self.placeholder_max
        } else {
            DEFAULT_PLACEHOLDER_MAX
        }
    }
}

/// Entries created for columns the settings store has not seen before.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsDefaults {
    pub sparkline: SparklineSettings,
    pub value: ValueSettings,
}
