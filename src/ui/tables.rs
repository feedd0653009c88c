use eframe::egui::{Label, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Listing, ListingDataset};
use crate::data::views::DashboardViews;
use crate::ui::{format_days, format_number};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Top models by listing count
// ---------------------------------------------------------------------------

const SUMMARY_COLUMNS: [&str; 7] = [
    "Model",
    "Listings",
    "Mean price",
    "Min price",
    "Max price",
    "Mean days listed",
    "Mean mileage",
];

/// The top-models summary table.
pub fn top_models_table(ui: &mut Ui, views: &DashboardViews) {
    ui.heading("Top 10 models by listing count");

    ui.push_id("top_models", |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(140.0));
        for _ in 1..SUMMARY_COLUMNS.len() {
            table = table.column(Column::auto().at_least(80.0));
        }

        table
            .header(HEADER_HEIGHT, |mut header| {
                for title in SUMMARY_COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row_data in &views.top_models {
                    body.row(ROW_HEIGHT, |mut row| {
                        let cells = [
                            row_data.model_full.clone(),
                            row_data.count.to_string(),
                            format_number(row_data.mean_price),
                            format_number(row_data.min_price),
                            format_number(row_data.max_price),
                            format_number(row_data.mean_days_listed),
                            format_number(row_data.mean_mileage),
                        ];
                        for text in cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(text);
                            });
                        }
                    });
                }
            });
    });

    if views.top_models.is_empty() {
        ui.weak("No listings match the current filters.");
    }
}

// ---------------------------------------------------------------------------
// Detail table
// ---------------------------------------------------------------------------

/// Derived columns appended after the source columns.
const DERIVED_COLUMNS: [&str; 4] = ["model_full", "Mileage (num)", "Price (num)", "Days listed"];

fn derived_cells(listing: &Listing, now: chrono::NaiveDateTime) -> [String; 4] {
    [
        listing.model_full.clone(),
        format_number(listing.mileage),
        format_number(listing.price),
        format_days(listing.published, now),
    ]
}

/// Every filtered listing in source order, with a positional index from 0.
pub fn detail_table(ui: &mut Ui, dataset: &ListingDataset, views: &DashboardViews) {
    ui.heading("Details");

    let n_cols = 1 + dataset.headers.len() + DERIVED_COLUMNS.len();

    ui.push_id("details", |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(400.0)
            .column(Column::auto().at_least(40.0));
        for _ in 1..n_cols {
            table = table.column(Column::auto().at_least(70.0).clip(true));
        }

        table
            .header(HEADER_HEIGHT, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for title in dataset
                    .headers
                    .iter()
                    .map(String::as_str)
                    .chain(DERIVED_COLUMNS)
                {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, views.rows.len(), |mut row| {
                    let pos = row.index();
                    let listing = &dataset.listings[views.rows[pos]];

                    row.col(|ui: &mut Ui| {
                        ui.label(pos.to_string());
                    });
                    for i in 0..dataset.headers.len() {
                        let text = listing.cells.get(i).map(String::as_str).unwrap_or("");
                        row.col(|ui: &mut Ui| {
                            ui.add(Label::new(text).truncate());
                        });
                    }
                    for text in derived_cells(listing, views.computed_at) {
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });

    if views.is_empty() {
        ui.weak("No listings match the current filters.");
    }
}
