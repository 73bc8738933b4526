use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
use crate::data::model::{AttritionDataset, FieldValue};
use crate::data::view::{self, ChartArtifact, CHART_SPECS};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded exactly once, before the UI starts, and never
/// mutated. Every filter interaction re-derives `visible_indices` and all
/// chart artifacts in one pass; the results are cached here so immediate-
/// mode repaints between interactions stay cheap.
pub struct AppState {
    /// Loaded dataset (immutable for the process lifetime).
    pub dataset: AttritionDataset,

    /// Per-field filter selections.
    pub filters: FilterState,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// One shaped artifact per chart specification (cached).
    pub artifacts: Vec<ChartArtifact>,

    /// Stable colours for the attrition outcome groups.
    pub group_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state: all filter values selected, all views derived.
    pub fn new(dataset: AttritionDataset) -> Self {
        let filters = init_filter_state(&dataset);
        let group_colors = ColorMap::new(
            dataset
                .unique_values
                .get("Attrition")
                .into_iter()
                .flatten()
                .map(|v| v.to_string()),
        );

        let mut state = Self {
            dataset,
            filters,
            visible_indices: Vec::new(),
            artifacts: Vec::new(),
            group_colors,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Recompute the filtered rows and every chart artifact.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.filters);
        self.artifacts = CHART_SPECS
            .iter()
            .map(|spec| view::render(spec, &self.dataset, &self.visible_indices))
            .collect();
    }

    /// Toggle a single value in a field's filter.
    pub fn toggle_filter_value(&mut self, field: &str, value: &FieldValue) {
        let selected = self.filters.entry(field.to_string()).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all offered values for a field.
    pub fn select_all(&mut self, field: &str) {
        if let Some(all_vals) = self.dataset.unique_values.get(field) {
            let all_vals = all_vals.clone();
            self.filters.insert(field.to_string(), all_vals);
            self.refilter();
        }
    }

    /// Deselect all values for a field.
    pub fn select_none(&mut self, field: &str) {
        self.filters.insert(field.to_string(), BTreeSet::new());
        self.refilter();
    }

    /// Serialize the current filter result for download.
    pub fn export_filtered(&self) -> Result<Vec<u8>, csv::Error> {
        view::export_csv(&self.dataset, &self.visible_indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FILTER_FIELDS;
    use crate::data::testutil::tiny_dataset;

    #[test]
    fn initial_state_shows_everything() {
        let state = AppState::new(tiny_dataset());
        assert_eq!(state.visible_indices.len(), state.dataset.len());
        assert_eq!(state.artifacts.len(), CHART_SPECS.len());
        for field in FILTER_FIELDS {
            assert!(!state.filters[field].is_empty());
        }
    }

    #[test]
    fn toggling_a_value_refilters_and_back() {
        let mut state = AppState::new(tiny_dataset());
        let female = FieldValue::Text("Female".into());

        state.toggle_filter_value("Gender", &female);
        assert_eq!(state.visible_indices, vec![1, 2, 4, 5]);

        state.toggle_filter_value("Gender", &female);
        assert_eq!(state.visible_indices.len(), state.dataset.len());
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = AppState::new(tiny_dataset());

        state.select_none("Department");
        assert!(state.visible_indices.is_empty());
        let export = state.export_filtered().unwrap();
        assert_eq!(String::from_utf8(export).unwrap().lines().count(), 1);

        state.select_all("Department");
        assert_eq!(state.visible_indices.len(), state.dataset.len());
    }
}
