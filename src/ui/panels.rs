use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::FILTER_FIELDS;
use crate::data::view::EXPORT_FILE_NAME;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one collapsible multi-select per field.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Filter the Data");
    ui.separator();

    // Clone the offered values so we can mutate state inside the loop.
    let unique = state.dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in FILTER_FIELDS {
                let Some(all_values) = unique.get(field) else {
                    continue;
                };

                let n_selected = state.filters.get(field).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{field}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(field);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(field)
                                .is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(field, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                save_filtered_csv(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} employees, {} matching filters",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// CSV download
// ---------------------------------------------------------------------------

/// Ask for a destination and write the filtered table there as CSV.
pub fn save_filtered_csv(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let result = state
        .export_filtered()
        .context("serializing filtered rows")
        .and_then(|bytes| std::fs::write(&path, bytes).context("writing CSV file"));

    match result {
        Ok(()) => {
            log::info!(
                "wrote {} filtered rows to {}",
                state.visible_indices.len(),
                path.display()
            );
            state.status_message = None;
        }
        Err(e) => {
            log::error!("export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
