use chrono::NaiveDateTime;

use super::aggregate::{
    mileage_buckets, price_histogram, top_models, Histogram, MileageBucket, ModelSummary,
    HISTOGRAM_BINS, TOP_MODELS,
};
use super::filter::{filtered_indices, FilterState};
use super::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Derived views: everything the dashboard renders for one filter state
// ---------------------------------------------------------------------------

/// The four display regions, computed from one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    /// Source indices of the matching listings; the detail table's
    /// positional index is the position in this list.
    pub rows: Vec<usize>,
    pub histogram: Option<Histogram>,
    pub buckets: Vec<MileageBucket>,
    pub top_models: Vec<ModelSummary>,
    /// Reference instant used for days listed.
    pub computed_at: NaiveDateTime,
}

impl DashboardViews {
    /// Run filter and aggregation over `dataset`.  Pure: the dataset is
    /// only read, and identical inputs give identical views.
    pub fn compute(dataset: &ListingDataset, filters: &FilterState, now: NaiveDateTime) -> Self {
        let rows = filtered_indices(dataset, filters);
        let selected: Vec<&Listing> = rows.iter().map(|&i| &dataset.listings[i]).collect();

        log::debug!("Recomputed views: {} of {} listings", rows.len(), dataset.len());

        DashboardViews {
            histogram: price_histogram(&selected, HISTOGRAM_BINS),
            buckets: mileage_buckets(&selected),
            top_models: top_models(&selected, now, TOP_MODELS),
            rows,
            computed_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::YearRange;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn dataset() -> ListingDataset {
        let listings = vec![
            Listing::new("Toyota", "Camry", "Almaty", Some(2018), "90 000 км", "9 000 000 ₸", "2024-07-01"),
            Listing::new("Lada", "Vesta", "Astana", Some(2021), "20 000 км", "5 500 000 ₸", "2024-07-20"),
            Listing::new("Toyota", "RAV4", "Astana", Some(2016), "150 000 км", "11 000 000 ₸", ""),
            Listing::new("Toyota", "Camry", "Astana", Some(2020), "40 000 км", "12 500 000 ₸", "bad"),
        ];
        ListingDataset::from_listings(Vec::new(), listings)
    }

    #[test]
    fn views_follow_the_filter() {
        let ds = dataset();
        let filters = FilterState {
            brands: ["Toyota".to_string()].into_iter().collect(),
            cities: BTreeSet::new(),
            years: YearRange::new(2016, 2020),
        };
        let views = DashboardViews::compute(&ds, &filters, now());

        assert_eq!(views.rows, vec![0, 2, 3]);
        assert_eq!(views.histogram.as_ref().map(Histogram::total), Some(3));
        let labels: Vec<&str> = views.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["40 000 км", "90 000 км", "150 000 км"]);
        assert_eq!(views.top_models[0].model_full, "Toyota Camry");
        assert_eq!(views.top_models[0].count, 2);
        assert_eq!(views.top_models[0].mean_days_listed, Some(31.0));
    }

    #[test]
    fn out_of_range_years_render_empty() {
        let ds = dataset();
        let filters = FilterState {
            brands: BTreeSet::new(),
            cities: BTreeSet::new(),
            years: YearRange::new(1990, 1999),
        };
        let views = DashboardViews::compute(&ds, &filters, now());
        assert!(views.is_empty());
        assert_eq!(views.histogram, None);
        assert!(views.buckets.is_empty());
        assert!(views.top_models.is_empty());
    }

    #[test]
    fn source_dataset_is_untouched() {
        let ds = dataset();
        let before = ds.listings.clone();
        let filters = FilterState::for_dataset(&ds, (2015, 2023));
        let first = DashboardViews::compute(&ds, &filters, now());
        let second = DashboardViews::compute(&ds, &filters, now());
        assert_eq!(first, second);
        assert_eq!(ds.listings, before);
    }
}
