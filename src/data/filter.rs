use std::collections::BTreeSet;

use super::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Filter selections
// ---------------------------------------------------------------------------

/// Inclusive year range; constructors keep `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    lower: i32,
    upper: i32,
}

impl YearRange {
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.lower..=self.upper).contains(&year)
    }

    /// Clamp `self` into `bounds`; falls back to `bounds` when they don't overlap.
    pub fn clamped_to(self, bounds: YearRange) -> Self {
        if self.upper < bounds.lower || self.lower > bounds.upper {
            return bounds;
        }
        Self::new(self.lower.max(bounds.lower), self.upper.min(bounds.upper))
    }
}

/// The current selections of the three filter controls.
///
/// An empty brand or city set means "no filter" on that dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub brands: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub years: YearRange,
}

impl FilterState {
    /// Initial selections for a freshly loaded dataset: nothing selected,
    /// year range set to `default_years` clamped into the dataset's bounds.
    ///
    /// A dataset without any valid year gets the collapsed range `(0, 0)`.
    pub fn for_dataset(dataset: &ListingDataset, default_years: (i32, i32)) -> Self {
        let years = match dataset.year_bounds {
            Some((lo, hi)) => YearRange::new(default_years.0, default_years.1)
                .clamped_to(YearRange::new(lo, hi)),
            None => YearRange::new(0, 0),
        };
        Self {
            brands: BTreeSet::new(),
            cities: BTreeSet::new(),
            years,
        }
    }

    /// Whether a single listing passes all three filters.
    pub fn matches(&self, listing: &Listing) -> bool {
        (self.brands.is_empty() || self.brands.contains(&listing.brand))
            && (self.cities.is_empty() || self.cities.contains(&listing.city))
            && listing.year.is_some_and(|y| self.years.contains(y))
    }
}

/// Return indices of listings that pass the filters, in source order.
pub fn filtered_indices(dataset: &ListingDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, l)| filters.matches(l))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> ListingDataset {
        let rows = [
            ("A", "Almaty", 2017),
            ("A", "Astana", 2018),
            ("B", "Almaty", 2019),
            ("C", "Astana", 2020),
            ("A", "Shymkent", 2020),
            ("B", "Astana", 2021),
        ];
        let listings = rows
            .iter()
            .map(|&(b, c, y)| Listing::new(b, "M", c, Some(y), "1 км", "1 ₸", ""))
            .collect();
        ListingDataset::from_listings(Vec::new(), listings)
    }

    fn select(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn brand_and_year_conjunction_ignores_city() {
        let ds = dataset();
        let filters = FilterState {
            brands: select(&["A"]),
            cities: BTreeSet::new(),
            years: YearRange::new(2018, 2020),
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![1, 4]);
    }

    #[test]
    fn empty_selections_do_not_filter() {
        let ds = dataset();
        let filters = FilterState {
            brands: BTreeSet::new(),
            cities: BTreeSet::new(),
            years: YearRange::new(2000, 2030),
        };
        assert_eq!(filtered_indices(&ds, &filters), (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn city_filter_with_inclusive_bounds() {
        let ds = dataset();
        let filters = FilterState {
            brands: BTreeSet::new(),
            cities: select(&["Astana", "Almaty"]),
            years: YearRange::new(2017, 2019),
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn out_of_range_years_yield_nothing() {
        let ds = dataset();
        let filters = FilterState {
            brands: BTreeSet::new(),
            cities: BTreeSet::new(),
            years: YearRange::new(1990, 1995),
        };
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn missing_year_never_matches() {
        let l = Listing::new("A", "M", "X", None, "", "", "");
        let filters = FilterState {
            brands: BTreeSet::new(),
            cities: BTreeSet::new(),
            years: YearRange::new(i32::MIN, i32::MAX),
        };
        assert!(!filters.matches(&l));
    }

    #[test]
    fn initial_range_is_clamped() {
        let ds = dataset();
        let f = FilterState::for_dataset(&ds, (2015, 2023));
        assert_eq!(f.years, YearRange::new(2017, 2021));

        let f = FilterState::for_dataset(&ds, (1980, 1990));
        assert_eq!(f.years, YearRange::new(2017, 2021));

        let f = FilterState::for_dataset(&ds, (2019, 2019));
        assert_eq!(f.years, YearRange::new(2019, 2019));

        let empty = ListingDataset::default();
        assert_eq!(FilterState::for_dataset(&empty, (2015, 2023)).years, YearRange::new(0, 0));
    }

    #[test]
    fn same_inputs_same_output() {
        let ds = dataset();
        let filters = FilterState::for_dataset(&ds, (2018, 2021));
        assert_eq!(filtered_indices(&ds, &filters), filtered_indices(&ds, &filters));
    }
}
