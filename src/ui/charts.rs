use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{mileage_ramp, HISTOGRAM_FILL};
use crate::data::aggregate::MileageBucket;
use crate::data::views::DashboardViews;
use crate::ui::format_number;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Price distribution
// ---------------------------------------------------------------------------

/// Histogram of prices over the filtered listings.
pub fn price_histogram(ui: &mut Ui, views: &DashboardViews) {
    ui.heading("Price distribution");
    if let Some(h) = &views.histogram {
        ui.weak(format!("{} priced listings", h.total()));
    }

    let bars: Vec<Bar> = views
        .histogram
        .iter()
        .flat_map(|h| {
            h.counts.iter().enumerate().map(move |(i, &count)| {
                let lo = h.start + i as f64 * h.bin_width;
                Bar::new(h.bin_center(i), count as f64)
                    .width(h.bin_width)
                    .name(format!(
                        "{} – {}",
                        format_number(Some(lo)),
                        format_number(Some(lo + h.bin_width))
                    ))
            })
        })
        .collect();

    Plot::new("price_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Price")
        .y_axis_label("Listings")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_FILL));
        });
}

// ---------------------------------------------------------------------------
// Average price by mileage bucket
// ---------------------------------------------------------------------------

/// Bar chart of mean price per raw-mileage bucket, in ascending mileage order.
pub fn mileage_chart(ui: &mut Ui, views: &DashboardViews) {
    ui.heading("Average price by mileage");

    let colors = mileage_ramp(views.buckets.len());
    let bars: Vec<Bar> = views
        .buckets
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (bucket, color))| {
            Bar::new(i as f64, bucket.mean_price.unwrap_or(0.0))
                .width(0.8)
                .fill(color)
                .name(bucket_hover(bucket))
        })
        .collect();

    let labels: Vec<String> = views.buckets.iter().map(|b| b.label.clone()).collect();

    Plot::new("mileage_buckets")
        .height(CHART_HEIGHT)
        .x_axis_label("Mileage")
        .y_axis_label("Mean price")
        .allow_scroll(false)
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Hover text of a bucket bar; a bar without any priced listing says so.
fn bucket_hover(bucket: &MileageBucket) -> String {
    match bucket.mean_price {
        Some(_) => format!("{} ({} listings)", bucket.label, bucket.count),
        None => format!("{} ({} listings, no prices)", bucket.label, bucket.count),
    }
}

/// Axis text for a category axis: the label at integer positions, blank elsewhere.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
