use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Start-up settings.  Every field is optional in the JSON file.
///
/// ```json
/// {
///   "data_path": "listings.csv",
///   "delimiter": ";",
///   "default_years": [2010, 2024],
///   "columns": { "price": "Price, KZT" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Delimited file loaded when the window opens.
    pub data_path: PathBuf,
    /// Field delimiter; sniffed from the header line when absent.
    pub delimiter: Option<char>,
    /// Initial year-slider selection, clamped to the dataset's bounds.
    pub default_years: (i32, i32),
    pub columns: ColumnMap,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("jul-07_17-55-24.csv"),
            delimiter: None,
            default_years: (2015, 2023),
            columns: ColumnMap::default(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Like [`DashboardConfig::load`], but logs problems and keeps defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    /// Delimiter as the byte the CSV reader expects (ASCII only).
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter
            .filter(char::is_ascii)
            .map(|c| c as u8)
    }
}

// ---------------------------------------------------------------------------
// Column mapping: logical field → header name
// ---------------------------------------------------------------------------

/// Header names for the seven logical columns of a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub brand: String,
    pub model: String,
    pub city: String,
    pub year: String,
    pub mileage: String,
    pub price: String,
    pub published: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            brand: "Марка".into(),
            model: "Модель".into(),
            city: "Город".into(),
            year: "Год выпуска".into(),
            mileage: "Пробег".into(),
            price: "Цена".into(),
            published: "Дата публикации".into(),
        }
    }
}

impl ColumnMap {
    /// `(configured header, english alias)` for each logical column, in the
    /// order the loader resolves them.
    pub fn candidates(&self) -> [(&str, &'static str); 7] {
        [
            (self.brand.as_str(), "brand"),
            (self.model.as_str(), "model"),
            (self.city.as_str(), "city"),
            (self.year.as_str(), "year"),
            (self.mileage.as_str(), "mileage"),
            (self.price.as_str(), "price"),
            (self.published.as_str(), "published"),
        ]
    }
}
