pub mod charts;
pub mod panels;
pub mod tables;

use chrono::NaiveDateTime;

use crate::data::coerce::days_between;

/// Whole numbers with space-grouped thousands, `n/a` for missing values.
pub fn format_number(v: Option<f64>) -> String {
    let Some(v) = v else {
        return "n/a".to_string();
    };
    let rounded = v.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Days between publication and `now`, or `n/a` if the date was unparseable.
pub fn format_days(published: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
    published
        .map(|p| days_between(p, now).to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use eframe::egui;

    use super::*;
    use crate::data::filter::{FilterState, YearRange};
    use crate::data::model::{Listing, ListingDataset};
    use crate::data::views::DashboardViews;

    fn dataset() -> ListingDataset {
        let headers: Vec<String> = ["Марка", "Модель", "Город", "Год выпуска", "Пробег", "Цена"]
            .map(String::from)
            .to_vec();
        let rows = [
            ("Toyota", "Camry", "Almaty", 2018, "90 000 км", "9 000 000 ₸"),
            ("Lada", "Vesta", "Astana", 2021, "20 000 км", "N/A"),
            ("Toyota", "Camry", "Astana", 2020, "40 000 км", "12 500 000 ₸"),
        ];
        let listings = rows
            .iter()
            .map(|&(b, m, c, y, km, price)| {
                Listing::new(b, m, c, Some(y), km, price, "2024-07-01").with_cells(
                    [b, m, c, y.to_string().as_str(), km, price].map(String::from).to_vec(),
                )
            })
            .collect();
        ListingDataset::from_listings(headers, listings)
    }

    /// Draw all four display regions headlessly, over a couple of frames.
    fn render_dashboard(dataset: &ListingDataset, views: &DashboardViews) {
        let ctx = egui::Context::default();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    charts::price_histogram(ui, views);
                    charts::mileage_chart(ui, views);
                    tables::top_models_table(ui, views);
                    tables::detail_table(ui, dataset, views);
                });
            });
        }
    }

    fn views_for(dataset: &ListingDataset, years: YearRange) -> DashboardViews {
        let filters = FilterState {
            brands: BTreeSet::new(),
            cities: BTreeSet::new(),
            years,
        };
        let now = NaiveDate::from_ymd_opt(2024, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        DashboardViews::compute(dataset, &filters, now)
    }

    #[test]
    fn renders_empty_filter_result() {
        let ds = dataset();
        let views = views_for(&ds, YearRange::new(1990, 1995));
        assert!(views.is_empty());
        render_dashboard(&ds, &views);
    }

    #[test]
    fn renders_populated_views() {
        let ds = dataset();
        let views = views_for(&ds, YearRange::new(2015, 2023));
        assert_eq!(views.rows.len(), 3);
        assert!(views.buckets.iter().any(|b| b.mean_price.is_none()));
        render_dashboard(&ds, &views);
    }

    #[test]
    fn renders_before_any_load() {
        render_dashboard(&ListingDataset::default(), &DashboardViews::default());
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(Some(3_500_000.0)), "3 500 000");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(1000.4)), "1 000");
        assert_eq!(format_number(Some(-12_345.0)), "-12 345");
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(None), "n/a");
    }
}
