use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Fatal load error replaces the dashboard ----
        if let Some(err) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                error_screen(ui, err);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dataset) = &self.state.dataset else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to explore listings  (File → Open…)");
                });
                return;
            };
            let views = &self.state.views;

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading(RichText::new("Used-car listings").size(24.0));
                    ui.add_space(8.0);
                    charts::price_histogram(ui, views);
                    ui.separator();
                    charts::mileage_chart(ui, views);
                    ui.separator();
                    tables::top_models_table(ui, views);
                    ui.separator();
                    tables::detail_table(ui, dataset, views);
                });
        });
    }
}

fn error_screen(ui: &mut Ui, err: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(RichText::new("Cannot show the dashboard").color(Color32::RED));
            ui.add_space(8.0);
            ui.label(err);
            ui.add_space(8.0);
            ui.label("Use File → Open… to pick another file.");
        });
    });
}
