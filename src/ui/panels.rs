use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::Facet;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the "Filter Players" sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Players");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let age_bounds = dataset.age_bounds();
    // Clone the option lists so we can mutate state inside the loop.
    let facet_values: Vec<(Facet, Vec<String>)> = Facet::ALL
        .iter()
        .map(|&facet| (facet, facet.values(dataset).iter().cloned().collect()))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            age_range_widget(ui, state, age_bounds);
            ui.separator();

            for (facet, values) in &facet_values {
                facet_widget(ui, state, *facet, values);
            }
        });
}

/// Inclusive age range: two sliders bounded by the dataset's observed ages.
fn age_range_widget(ui: &mut Ui, state: &mut AppState, bounds: (u32, u32)) {
    ui.strong("Select Age Range");
    let (lo, hi) = bounds;
    let mut min = state.criteria.age_min;
    let mut max = state.criteria.age_max;

    let changed_min = ui.add(Slider::new(&mut min, lo..=hi).text("min")).changed();
    let changed_max = ui.add(Slider::new(&mut max, lo..=hi).text("max")).changed();

    if changed_min || changed_max {
        state.set_age_range(min, max);
    }
}

/// One collapsible multi-select.  An empty selection means "no constraint",
/// so the header reads "(any)" until something is checked.
fn facet_widget(ui: &mut Ui, state: &mut AppState, facet: Facet, values: &[String]) {
    let n_selected = facet.selection(&state.criteria).len();
    let header = if n_selected == 0 {
        format!("{}  (any)", facet.label())
    } else {
        format!("{}  ({n_selected}/{})", facet.label(), values.len())
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(facet.label())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(facet);
                }
                if ui.small_button("Clear").clicked() {
                    state.clear_selection(facet);
                }
            });

            for value in values {
                let mut checked = facet.selection(&state.criteria).contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    state.toggle_value(facet, value);
                }
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
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} players loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if state.loading {
            ui.separator();
            ui.label("Loading…");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open player dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} players, {} clubs from {}",
                    dataset.len(),
                    dataset.clubs.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
