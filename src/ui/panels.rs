use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Dimension};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter controls.  Each control mutates `state` through its
/// setters, which re-run the pipeline.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    match &state.dataset {
        None => {
            ui.label("No dataset loaded.");
            return;
        }
        Some(ds) if ds.is_empty() => {
            ui.label("The dataset has no rows; filters are disabled.");
        }
        Some(_) => {}
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_range(ui, state);
            ui.separator();
            multi_select(ui, state, Dimension::Brand, "Brand");
            multi_select(ui, state, Dimension::City, "City");
        });
}

fn year_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Year of manufacture");

    let Some((min, max)) = state.dataset.as_ref().and_then(|ds| ds.year_bounds) else {
        ui.add_enabled_ui(false, |ui: &mut Ui| {
            ui.label("No valid years in dataset");
        });
        return;
    };

    let mut lower = state.filters.years.lower();
    let mut upper = state.filters.years.upper();

    ui.add_enabled_ui(min < max, |ui: &mut Ui| {
        ui.add(egui::Slider::new(&mut lower, min..=max).text("from"));
        ui.add(egui::Slider::new(&mut upper, min..=max).text("to"));
    });

    // Dragging one handle past the other pushes it along.
    if lower > state.filters.years.upper() {
        upper = upper.max(lower);
    }
    if upper < state.filters.years.lower() {
        lower = lower.min(upper);
    }
    state.set_years(lower, upper);
}

fn multi_select(ui: &mut Ui, state: &mut AppState, dim: Dimension, title: &str) {
    let options = state.options(dim).to_vec();
    let n_selected = state.selection(dim).len();
    let header_text = if n_selected == 0 {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({n_selected}/{})", options.len())
    };

    ui.add_enabled_ui(!options.is_empty(), |ui: &mut Ui| {
        egui::CollapsingHeader::new(RichText::new(header_text).strong())
            .id_salt(title)
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all(dim);
                    }
                    if ui.small_button("None").clicked() {
                        state.select_none(dim);
                    }
                });

                for value in &options {
                    let mut checked = state.selection(dim).contains(value);
                    if ui.checkbox(&mut checked, value.as_str()).changed() {
                        state.toggle(dim, value);
                    }
                }
            });
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

        if let Some(path) = &state.source_path {
            ui.monospace(path.display().to_string());
        }

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} listings loaded, {} shown",
                ds.len(),
                state.views.rows.len()
            ));
            if ds.skipped_rows > 0 {
                ui.label(
                    RichText::new(format!("{} malformed rows skipped", ds.skipped_rows))
                        .color(Color32::YELLOW),
                );
            }
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
        .set_title("Open listings")
        .add_filter("Delimited text", &["csv", "tsv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
