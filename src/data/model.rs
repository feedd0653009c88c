use std::collections::HashSet;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Listing – one row of the source table
// ---------------------------------------------------------------------------

/// A single car advertisement with its raw cells and coerced fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub brand: String,
    pub model: String,
    pub city: String,
    /// Year of manufacture; `None` when the cell is not an integer.
    pub year: Option<i32>,
    /// Mileage exactly as written in the source, used as the bucket key.
    pub mileage_raw: String,
    /// `"<brand> <model>"`.
    pub model_full: String,
    pub mileage: Option<f64>,
    pub price: Option<f64>,
    pub published: Option<NaiveDateTime>,
    /// Every source cell in header order, for the detail table.
    pub cells: Vec<String>,
}

impl Listing {
    /// Build a listing from its logical fields, deriving the coerced values.
    pub fn new(
        brand: &str,
        model: &str,
        city: &str,
        year: Option<i32>,
        mileage_raw: &str,
        price_raw: &str,
        published_raw: &str,
    ) -> Self {
        use super::coerce::{coerce_mileage, coerce_price, parse_published};

        Listing {
            brand: brand.to_string(),
            model: model.to_string(),
            city: city.to_string(),
            year,
            mileage_raw: mileage_raw.to_string(),
            model_full: format!("{brand} {model}"),
            mileage: coerce_mileage(mileage_raw),
            price: coerce_price(price_raw),
            published: parse_published(published_raw),
            cells: Vec::new(),
        }
    }

    /// Attach the full row of source cells.
    pub fn with_cells(mut self, cells: Vec<String>) -> Self {
        self.cells = cells;
        self
    }
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed filter options.
///
/// Immutable once built; sessions derive filtered index lists from it.
#[derive(Debug, Clone, Default)]
pub struct ListingDataset {
    /// Trimmed header names in source order.
    pub headers: Vec<String>,
    pub listings: Vec<Listing>,
    /// Distinct non-empty brands, first-encounter order.
    pub brands: Vec<String>,
    /// Distinct non-empty cities, first-encounter order.
    pub cities: Vec<String>,
    /// Inclusive `(min, max)` over valid years; `None` if there are none.
    pub year_bounds: Option<(i32, i32)>,
    /// Source rows dropped because the CSV reader could not parse them.
    pub skipped_rows: usize,
}

impl ListingDataset {
    /// Build option lists and year bounds from the loaded listings.
    pub fn from_listings(headers: Vec<String>, listings: Vec<Listing>) -> Self {
        let brands = distinct_in_order(listings.iter().map(|l| l.brand.as_str()));
        let cities = distinct_in_order(listings.iter().map(|l| l.city.as_str()));

        let year_bounds = listings
            .iter()
            .filter_map(|l| l.year)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });

        ListingDataset {
            headers,
            listings,
            brands,
            cities,
            year_bounds,
            skipped_rows: 0,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
