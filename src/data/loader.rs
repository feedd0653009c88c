use std::path::{Path, PathBuf};

use thiserror::Error;

use super::coerce::coerce_year;
use super::model::{Listing, ListingDataset};
use crate::config::{ColumnMap, DashboardConfig};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal problems loading the source table.  Anything smaller than these
/// (a bad row, a bad cell) is absorbed by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not readable as delimited text", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load listings from the delimited file at `path`.
pub fn load_listings(path: &Path, config: &DashboardConfig) -> Result<ListingDataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let delimiter = config
        .delimiter_byte()
        .unwrap_or_else(|| sniff_delimiter(&bytes));

    let dataset = parse_listings(&bytes, delimiter, &config.columns).map_err(|e| match e {
        ParseError::Csv(source) => LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
        ParseError::MissingColumn(column) => LoadError::MissingColumn { column },
    })?;

    log::info!(
        "Loaded {} listings from {} ({} rows skipped), columns {:?}",
        dataset.len(),
        path.display(),
        dataset.skipped_rows,
        dataset.headers
    );
    Ok(dataset)
}

/// Pick the most frequent candidate delimiter on the header line.
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    [b',', b';', b'\t', b'|']
        .into_iter()
        .map(|d| (d, header.iter().filter(|&&b| b == d).count()))
        .filter(|&(_, n)| n > 0)
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub(crate) enum ParseError {
    Csv(csv::Error),
    MissingColumn(String),
}

/// Column positions of the logical fields, resolved against the header row.
struct ColumnIndex {
    brand: usize,
    model: usize,
    city: usize,
    year: usize,
    mileage: usize,
    price: usize,
    published: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String], columns: &ColumnMap) -> Result<Self, ParseError> {
        let mut found = [0usize; 7];
        for (slot, (name, alias)) in found.iter_mut().zip(columns.candidates()) {
            *slot = headers
                .iter()
                .position(|h| h == name.trim() || h.to_lowercase() == alias)
                .ok_or_else(|| ParseError::MissingColumn(name.to_string()))?;
        }
        let [brand, model, city, year, mileage, price, published] = found;
        Ok(ColumnIndex {
            brand,
            model,
            city,
            year,
            mileage,
            price,
            published,
        })
    }
}

/// Parse the raw file contents.  Rows the CSV reader rejects are skipped
/// and counted; short rows read their absent cells as empty.
pub(crate) fn parse_listings(
    bytes: &[u8],
    delimiter: u8,
    columns: &ColumnMap,
) -> Result<ListingDataset, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(ParseError::Csv)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let idx = ColumnIndex::resolve(&headers, columns)?;

    let mut listings = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {row_no}: {e}");
                skipped += 1;
                continue;
            }
        };

        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let listing = Listing::new(
            cell(idx.brand),
            cell(idx.model),
            cell(idx.city),
            coerce_year(cell(idx.year)),
            cell(idx.mileage),
            cell(idx.price),
            cell(idx.published),
        )
        .with_cells(
            (0..headers.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );

        listings.push(listing);
    }

    let mut dataset = ListingDataset::from_listings(headers, listings);
    dataset.skipped_rows = skipped;
    Ok(dataset)
}
