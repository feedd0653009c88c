/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  listings .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, coerce cells → ListingDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ListingDataset │  Vec<Listing>, filter options (read-only)
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  brand / city / year predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  histogram, mileage buckets, top models → DashboardViews
///   └───────────┘
/// ```

pub mod aggregate;
pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
