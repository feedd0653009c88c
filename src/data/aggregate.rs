use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::coerce::days_between;
use super::model::Listing;

/// Fixed bin count of the price histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Number of rows kept in the model summary.
pub const TOP_MODELS: usize = 10;

// ---------------------------------------------------------------------------
// Small numeric helpers
// ---------------------------------------------------------------------------

/// Running mean that ignores missing values.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.n += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

/// Round to a whole unit, ties to even.
pub fn round_whole(v: Option<f64>) -> Option<f64> {
    v.map(f64::round_ties_even)
}

// ---------------------------------------------------------------------------
// Price histogram
// ---------------------------------------------------------------------------

/// Equal-width bins over the non-missing prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Centre of bin `i`, for plotting.
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin prices into `bins` equal-width buckets spanning `[min, max]`; the
/// last bin is closed on the right.  `None` when no price is present.
pub fn price_histogram(listings: &[&Listing], bins: usize) -> Option<Histogram> {
    let prices: Vec<f64> = listings.iter().filter_map(|l| l.price).collect();
    if prices.is_empty() {
        return None;
    }
    let bins = bins.max(1);

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let span = max - min;
    let (start, bin_width) = if span > 0.0 {
        (min, span / bins as f64)
    } else {
        (min - 0.5 * bins as f64, 1.0)
    };

    let mut counts = vec![0usize; bins];
    for p in prices {
        let i = ((p - start) / bin_width).floor() as usize;
        counts[i.min(bins - 1)] += 1;
    }

    Some(Histogram {
        start,
        bin_width,
        counts,
    })
}

// ---------------------------------------------------------------------------
// Average price by mileage bucket
// ---------------------------------------------------------------------------

/// Listings sharing one raw mileage text.
#[derive(Debug, Clone, PartialEq)]
pub struct MileageBucket {
    /// The raw mileage text, used as the category label.
    pub label: String,
    /// First non-missing numeric mileage in encounter order.
    pub mileage: Option<f64>,
    pub mean_price: Option<f64>,
    pub count: usize,
}

/// Group by raw mileage text, ordered by ascending numeric mileage.
///
/// Buckets without a numeric mileage go last; ties keep encounter order.
/// Listings with an empty mileage cell are not bucketed.
pub fn mileage_buckets(listings: &[&Listing]) -> Vec<MileageBucket> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (Option<f64>, Mean, usize)> = HashMap::new();

    for l in listings {
        let key = l.mileage_raw.as_str();
        if key.is_empty() {
            continue;
        }
        let entry = groups.entry(key).or_insert_with(|| {
            order.push(key);
            (None, Mean::default(), 0)
        });
        if entry.0.is_none() {
            entry.0 = l.mileage;
        }
        entry.1.push(l.price);
        entry.2 += 1;
    }

    let mut buckets: Vec<MileageBucket> = order
        .into_iter()
        .map(|key| {
            let (mileage, mean, count) = groups[key];
            MileageBucket {
                label: key.to_string(),
                mileage,
                mean_price: mean.get(),
                count,
            }
        })
        .collect();

    buckets.sort_by(|a, b| match (a.mileage, b.mileage) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    buckets
}

// ---------------------------------------------------------------------------
// Top models by listing count
// ---------------------------------------------------------------------------

/// One row of the top-models table.  Statistics are rounded to whole units.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub model_full: String,
    pub count: usize,
    pub mean_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub mean_days_listed: Option<f64>,
    pub mean_mileage: Option<f64>,
}

#[derive(Default)]
struct ModelAcc {
    count: usize,
    price: Mean,
    min_price: Option<f64>,
    max_price: Option<f64>,
    days: Mean,
    mileage: Mean,
}

/// Summarise listings per `model_full`, keep the `limit` most listed.
///
/// Ties on count keep group-discovery order.  `now` is the reference
/// instant for days listed; listings without a publication date are left
/// out of that mean only.
pub fn top_models(listings: &[&Listing], now: NaiveDateTime, limit: usize) -> Vec<ModelSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, ModelAcc> = HashMap::new();

    for l in listings {
        let key = l.model_full.as_str();
        let acc = groups.entry(key).or_insert_with(|| {
            order.push(key);
            ModelAcc::default()
        });
        acc.count += 1;
        acc.price.push(l.price);
        if let Some(p) = l.price {
            acc.min_price = Some(acc.min_price.map_or(p, |m| m.min(p)));
            acc.max_price = Some(acc.max_price.map_or(p, |m| m.max(p)));
        }
        acc.days
            .push(l.published.map(|d| days_between(d, now) as f64));
        acc.mileage.push(l.mileage);
    }

    let mut rows: Vec<ModelSummary> = order
        .into_iter()
        .map(|key| {
            let acc = &groups[key];
            ModelSummary {
                model_full: key.to_string(),
                count: acc.count,
                mean_price: round_whole(acc.price.get()),
                min_price: round_whole(acc.min_price),
                max_price: round_whole(acc.max_price),
                mean_days_listed: round_whole(acc.days.get()),
                mean_mileage: round_whole(acc.mileage.get()),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(limit);
    rows
}
