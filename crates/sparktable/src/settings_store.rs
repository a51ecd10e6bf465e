//! Per-column settings kept in sync with the shape of incoming view models.
//!
//! The store lives as long as one visual instance. Each new [`ViewModel`] is reduced to a
//! [`ColumnSetHash`] of its sparkline and value column names; only when that hash changes are
//! entries added (at defaults) for new columns and dropped for vanished ones. Entries for columns
//! that survive are never touched, which is what keeps user edits from the formatting panel alive
//! across repaints.
//!
//! The store is single-writer. Hosts that update from several threads must put it behind a lock.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sparktable_model::{SparklineSettings, ValueSettings, ViewModel};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::error::{TransformError, TransformResult};
use crate::options::SettingsDefaults;

/// Order-independent fingerprint of a view model's sparkline and value column names.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnSetHash([u8; 32]);

impl ColumnSetHash {
    /// Hashes the sorted, de-duplicated names. Each list is tagged and every name is
    /// length-prefixed, so moving a name between lists or splitting one changes the hash.
    pub fn compute<S: AsRef<str>>(series: &[S], values: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for (tag, names) in [(b'S', series), (b'V', values)] {
            let names: BTreeSet<&str> = names.iter().map(AsRef::as_ref).collect();
            hasher.update([tag]);
            hasher.update((names.len() as u64).to_le_bytes());
            for name in names {
                let bytes = name.as_bytes();
                hasher.update((bytes.len() as u64).to_le_bytes());
                hasher.update(bytes);
            }
        }
        Self(hasher.finalize().into())
    }

    pub fn of_view_model(view_model: &ViewModel) -> Self {
        Self::compute(
            &view_model.series_column_names(),
            &view_model.value_column_names(),
        )
    }
}

impl fmt::Debug for ColumnSetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnSetHash({self})")
    }
}

impl fmt::Display for ColumnSetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Uninitialized,
    Synced(ColumnSetHash),
}

/// Read-only settings maps handed to rendering.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub sparkline: BTreeMap<String, SparklineSettings>,
    #[serde(default)]
    pub value: BTreeMap<String, ValueSettings>,
}

/// Column names added to and removed from the store by one rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub added_series: Vec<String>,
    pub removed_series: Vec<String>,
    pub added_values: Vec<String>,
    pub removed_values: Vec<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.added_series.is_empty()
            && self.removed_series.is_empty()
            && self.added_values.is_empty()
            && self.removed_values.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The column set matched the previous one; nothing was touched.
    Unchanged,
    Rebuilt(SettingsPatch),
}

#[derive(Clone, Debug, Default)]
pub struct SettingsStore {
    defaults: SettingsDefaults,
    state: SyncState,
    sparkline: BTreeMap<String, SparklineSettings>,
    value: BTreeMap<String, ValueSettings>,
    snapshot: Arc<SettingsSnapshot>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: SettingsDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn defaults(&self) -> &SettingsDefaults {
        &self.defaults
    }

    /// Syncs against the column set of `view_model`.
    pub fn sync(&mut self, view_model: &ViewModel) -> SyncOutcome {
        self.sync_columns(
            &view_model.series_column_names(),
            &view_model.value_column_names(),
        )
    }

    /// Syncs against explicit sparkline and value column names (any order, repeats ignored).
    pub fn sync_columns<S: AsRef<str>>(&mut self, series: &[S], values: &[S]) -> SyncOutcome {
        let hash = ColumnSetHash::compute(series, values);
        if self.state == SyncState::Synced(hash) {
            return SyncOutcome::Unchanged;
        }

        let series: BTreeSet<&str> = series.iter().map(AsRef::as_ref).collect();
        let values: BTreeSet<&str> = values.iter().map(AsRef::as_ref).collect();

        let (added_series, removed_series) =
            reconcile(&mut self.sparkline, &series, &self.defaults.sparkline);
        let (added_values, removed_values) =
            reconcile(&mut self.value, &values, &self.defaults.value);
        let patch = SettingsPatch {
            added_series,
            removed_series,
            added_values,
            removed_values,
        };

        self.refresh_snapshot();
        self.state = SyncState::Synced(hash);
        log::debug!(
            "column set changed to {hash}; {} series and {} value settings \
             (+{}/-{} series, +{}/-{} values)",
            self.sparkline.len(),
            self.value.len(),
            patch.added_series.len(),
            patch.removed_series.len(),
            patch.added_values.len(),
            patch.removed_values.len(),
        );
        SyncOutcome::Rebuilt(patch)
    }

    /// Settings for a sparkline column, or the defaults when the column is unknown.
    pub fn sparkline_settings(&self, column: &str) -> SparklineSettings {
        self.sparkline
            .get(column)
            .cloned()
            .unwrap_or_else(|| self.defaults.sparkline.clone())
    }

    /// Settings for a value column, or the defaults when the column is unknown.
    pub fn value_settings(&self, column: &str) -> ValueSettings {
        self.value
            .get(column)
            .cloned()
            .unwrap_or_else(|| self.defaults.value.clone())
    }

    pub fn set_sparkline_settings(
        &mut self,
        column: impl Into<String>,
        settings: SparklineSettings,
    ) {
        let column = column.into();
        Arc::make_mut(&mut self.snapshot)
            .sparkline
            .insert(column.clone(), settings.clone());
        self.sparkline.insert(column, settings);
    }

    pub fn set_value_settings(&mut self, column: impl Into<String>, settings: ValueSettings) {
        let column = column.into();
        Arc::make_mut(&mut self.snapshot)
            .value
            .insert(column.clone(), settings.clone());
        self.value.insert(column, settings);
    }

    /// Cached name-to-settings maps for rendering. Cheap to clone and hold across frames.
    pub fn snapshot(&self) -> Arc<SettingsSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Serializes the per-column entries for the host to persist.
    pub fn to_json(&self) -> TransformResult<String> {
        let persisted = SettingsSnapshot {
            sparkline: self.sparkline.clone(),
            value: self.value.clone(),
        };
        serde_json::to_string(&persisted).map_err(TransformError::SerializeSettings)
    }

    /// Restores entries persisted by [`SettingsStore::to_json`].
    ///
    /// The restored store starts unsynced, so the first [`SettingsStore::sync`] reconciles the
    /// restored entries against the live column set.
    pub fn from_json(json: &str, defaults: SettingsDefaults) -> TransformResult<Self> {
        let persisted: SettingsSnapshot =
            serde_json::from_str(json).map_err(TransformError::InvalidSettings)?;
        let mut store = Self {
            defaults,
            state: SyncState::Uninitialized,
            sparkline: persisted.sparkline,
            value: persisted.value,
            snapshot: Arc::default(),
        };
        store.refresh_snapshot();
        Ok(store)
    }

    fn refresh_snapshot(&mut self) {
        self.snapshot = Arc::new(SettingsSnapshot {
            sparkline: self.sparkline.clone(),
            value: self.value.clone(),
        });
    }
}

/// Drops entries not in `present` and adds defaults for names without an entry. Returns the
/// `(added, removed)` names in sorted order.
fn reconcile<T: Clone>(
    entries: &mut BTreeMap<String, T>,
    present: &BTreeSet<&str>,
    default: &T,
) -> (Vec<String>, Vec<String>) {
    let removed: Vec<String> = entries
        .keys()
        .filter(|name| !present.contains(name.as_str()))
        .cloned()
        .collect();
    for name in &removed {
        entries.remove(name);
    }

    let mut added = Vec::new();
    for name in present {
        if !entries.contains_key(*name) {
            entries.insert((*name).to_string(), default.clone());
            added.push((*name).to_string());
        }
    }
    (added, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_ignores_order_and_repeats() {
        let a = ColumnSetHash::compute(&["b", "a"], &["v"]);
        let b = ColumnSetHash::compute(&["a", "b", "a"], &["v"]);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_distinguishes_lists_and_name_boundaries() {
        let series_only = ColumnSetHash::compute(&["a"], &[]);
        let value_only = ColumnSetHash::compute(&[], &["a"]);
        assert_ne!(series_only, value_only);

        let split = ColumnSetHash::compute(&["ab", "c"], &[]);
        let other_split = ColumnSetHash::compute(&["a", "bc"], &[]);
        assert_ne!(split, other_split);
    }

    #[test]
    fn first_sync_leaves_uninitialized_state() {
        let mut store = SettingsStore::new();
        assert_eq!(store.state(), SyncState::Uninitialized);
        let outcome = store.sync_columns(&["trend"], &[]);
        assert!(matches!(outcome, SyncOutcome::Rebuilt(_)));
        assert!(matches!(store.state(), SyncState::Synced(_)));
    }
}
