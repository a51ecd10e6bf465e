use sparktable_model::{LogicalRow, ViewModel};

use crate::assemble::assemble;
use crate::classify::classify;
use crate::data_view::DataView;
use crate::error::TransformResult;
use crate::host::SelectionIdBuilder;
use crate::materialize::{materialize_row, PlaceholderSource, RandomPlaceholder};
use crate::options::{SettingsDefaults, TransformOptions};
use crate::settings_store::{SettingsStore, SyncOutcome};
use crate::source::SourceContext;

/// Runs classify → group → materialize → assemble for one update.
///
/// Every call builds a fresh [`ViewModel`]; nothing carries over between updates except the
/// state of the placeholder source.
pub struct Transformer {
    options: TransformOptions,
    placeholder: Box<dyn PlaceholderSource>,
    host: Option<Box<dyn SelectionIdBuilder>>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            placeholder: Box::new(RandomPlaceholder::from_entropy()),
            host: None,
        }
    }

    #[must_use]
    pub fn with_placeholder_source(mut self, source: impl PlaceholderSource + 'static) -> Self {
        self.placeholder = Box::new(source);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl SelectionIdBuilder + 'static) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Builds the view model for `view`, or `None` when there is nothing to render.
    pub fn transform(&mut self, view: &DataView) -> Option<ViewModel> {
        let Some(source) = view.row_source() else {
            log::debug!("data view has neither table nor categorical data");
            return None;
        };

        let columns = source.columns();
        let roles = classify(&columns, self.options.multi_role_policy);
        if !roles.has_renderable_columns() {
            return assemble(&roles, Vec::new());
        }

        let ctx = SourceContext {
            options: &self.options,
            host: self.host.as_deref(),
        };
        let pending = source.group(&roles, &ctx);

        let placeholder = self.placeholder.as_mut();
        let rows: Vec<LogicalRow> = pending
            .into_iter()
            .map(|row| materialize_row(row, &roles, placeholder, &self.options))
            .collect();
        assemble(&roles, rows)
    }

    /// Transforms the first of the host's data views; `None` when there are none.
    pub fn transform_views(&mut self, views: &[DataView]) -> Option<ViewModel> {
        let view = views.first()?;
        self.transform(view)
    }
}

/// One visual session: a [`Transformer`] plus the [`SettingsStore`] that outlives individual
/// updates.
pub struct SparklineTable {
    transformer: Transformer,
    settings: SettingsStore,
    view_model: Option<ViewModel>,
}

impl SparklineTable {
    pub fn new(transformer: Transformer, settings: SettingsStore) -> Self {
        Self {
            transformer,
            settings,
            view_model: None,
        }
    }

    pub fn with_defaults(options: TransformOptions, defaults: SettingsDefaults) -> Self {
        Self::new(
            Transformer::new(options),
            SettingsStore::with_defaults(defaults),
        )
    }

    /// Replaces the current view model and syncs settings against it.
    ///
    /// An empty update clears the view model but leaves the settings store alone, so a
    /// transient empty feed does not discard per-column formatting.
    pub fn update(&mut self, view: &DataView) -> Option<&ViewModel> {
        self.view_model = self.transformer.transform(view);
        if let Some(view_model) = &self.view_model {
            if let SyncOutcome::Rebuilt(patch) = self.settings.sync(view_model) {
                if !patch.is_empty() {
                    log::debug!("settings rebuilt: {patch:?}");
                }
            }
        }
        self.view_model.as_ref()
    }

    /// Parses a host JSON payload and applies it with [`SparklineTable::update`].
    pub fn update_json(&mut self, json: &str) -> TransformResult<Option<&ViewModel>> {
        let view = DataView::from_json(json)?;
        Ok(self.update(&view))
    }

    pub fn view_model(&self) -> Option<&ViewModel> {
        self.view_model.as_ref()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }
}
