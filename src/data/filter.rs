use std::collections::{BTreeMap, BTreeSet};

use super::model::{AttritionDataset, FieldValue, FILTER_FIELDS};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per filter field
// ---------------------------------------------------------------------------

/// Per-field selection state: maps field name → set of selected values.
/// Only the fields in [`FILTER_FIELDS`] are ever keys here.
pub type FilterState = BTreeMap<String, BTreeSet<FieldValue>>;

/// Initialise a [`FilterState`] with every offered value selected, so the
/// initial view is an unfiltered pass-through of the dataset.
pub fn init_filter_state(dataset: &AttritionDataset) -> FilterState {
    FILTER_FIELDS
        .iter()
        .filter_map(|field| {
            dataset
                .unique_values
                .get(*field)
                .map(|vals| ((*field).to_string(), vals.clone()))
        })
        .collect()
}

/// Return indices of rows that pass every field's filter, in source order.
///
/// A row is included iff, for each filter field, its value is a member of
/// that field's selected set (logical AND across fields). An empty set for
/// any field therefore matches nothing, and selection values not present in
/// the dataset simply never match. Single pass, pure function of its inputs.
pub fn filtered_indices(dataset: &AttritionDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            filters.iter().all(|(field, selected)| {
                row.get(field).is_some_and(|val| selected.contains(val))
            })
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::tiny_dataset;

    fn only(field: &str, values: &[&str]) -> impl Fn(&mut FilterState) {
        let field = field.to_string();
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        move |filters: &mut FilterState| {
            filters.insert(
                field.clone(),
                values
                    .iter()
                    .map(|v| FieldValue::Text(v.clone()))
                    .collect(),
            );
        }
    }

    #[test]
    fn default_selection_is_a_pass_through() {
        let ds = tiny_dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn single_department_keeps_rows_in_order() {
        let ds = tiny_dataset();
        let mut filters = init_filter_state(&ds);
        only("Department", &["Sales"])(&mut filters);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 3, 5]);
    }

    #[test]
    fn fields_combine_with_and_semantics() {
        let ds = tiny_dataset();
        let mut filters = init_filter_state(&ds);
        only("Department", &["Sales"])(&mut filters);
        only("Gender", &["Male"])(&mut filters);
        assert_eq!(filtered_indices(&ds, &filters), vec![5]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ds = tiny_dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert("Gender".to_string(), Default::default());
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn stale_selection_values_are_inert() {
        let ds = tiny_dataset();
        let mut filters = init_filter_state(&ds);
        // "Marketing" does not occur in the dataset; it must neither match
        // nor error.
        only("Department", &["Sales", "Marketing"])(&mut filters);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 3, 5]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = tiny_dataset();
        let mut filters = init_filter_state(&ds);
        only("Department", &["Sales"])(&mut filters);

        let once = filtered_indices(&ds, &filters);
        let sub = AttritionDataset::new(
            ds.columns.clone(),
            once.iter().map(|&i| ds.rows[i].clone()).collect(),
        );
        let twice = filtered_indices(&sub, &filters);
        // Re-filtering the already-filtered set keeps every row.
        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }
}
