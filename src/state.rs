use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::DashboardConfig;
use crate::data::filter::{FilterState, YearRange};
use crate::data::loader::load_listings;
use crate::data::model::ListingDataset;
use crate::data::views::DashboardViews;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The two multi-select filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Brand,
    City,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset, shared read-only (None until a load succeeds).
    pub dataset: Option<Arc<ListingDataset>>,

    /// File the current dataset came from.
    pub source_path: Option<PathBuf>,

    /// Current filter selections.
    pub filters: FilterState,

    /// Views derived from `dataset` and `filters` (cached).
    pub views: DashboardViews,

    /// Fatal load error; shown instead of the dashboard while no dataset is loaded.
    pub load_error: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            source_path: None,
            filters: FilterState {
                brands: BTreeSet::new(),
                cities: BTreeSet::new(),
                years: YearRange::new(0, 0),
            },
            views: DashboardViews::default(),
            load_error: None,
            status_message: None,
        }
    }

    /// Load `path` with the current config.  On failure an already loaded
    /// dataset stays on screen and the error goes to the status line;
    /// without one the error replaces the dashboard.
    pub fn load(&mut self, path: &Path) {
        match load_listings(path, &self.config) {
            Ok(dataset) => self.set_dataset(dataset, path),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                let msg = format!("Error: {}", error_chain(&e));
                if self.dataset.is_some() {
                    self.status_message = Some(msg);
                } else {
                    self.load_error = Some(msg);
                }
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and views.
    pub fn set_dataset(&mut self, dataset: ListingDataset, path: &Path) {
        self.filters = FilterState::for_dataset(&dataset, self.config.default_years);
        self.dataset = Some(Arc::new(dataset));
        self.source_path = Some(path.to_path_buf());
        self.load_error = None;
        self.status_message = None;
        self.recompute();
    }

    /// Re-run the whole pipeline against the local wall clock.
    pub fn recompute(&mut self) {
        self.recompute_at(chrono::Local::now().naive_local());
    }

    /// Re-run filter and aggregation with an explicit reference instant.
    pub fn recompute_at(&mut self, now: NaiveDateTime) {
        self.views = match &self.dataset {
            Some(ds) => DashboardViews::compute(ds, &self.filters, now),
            None => DashboardViews::default(),
        };
    }

    /// All options of a multi-select control, in display order.
    pub fn options(&self, dim: Dimension) -> &[String] {
        match (&self.dataset, dim) {
            (Some(ds), Dimension::Brand) => &ds.brands,
            (Some(ds), Dimension::City) => &ds.cities,
            (None, _) => &[],
        }
    }

    /// Selected values of a multi-select control.
    pub fn selection(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Brand => &self.filters.brands,
            Dimension::City => &self.filters.cities,
        }
    }

    fn selection_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Brand => &mut self.filters.brands,
            Dimension::City => &mut self.filters.cities,
        }
    }

    /// Toggle a single value in a multi-select control.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let selected = self.selection_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.recompute();
    }

    /// Select every option of a control.
    pub fn select_all(&mut self, dim: Dimension) {
        let all: BTreeSet<String> = self.options(dim).iter().cloned().collect();
        *self.selection_mut(dim) = all;
        self.recompute();
    }

    /// Clear a control's selection, which disables that filter.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection_mut(dim).clear();
        self.recompute();
    }

    /// Set the year range; bounds are reordered if given reversed.
    pub fn set_years(&mut self, lower: i32, upper: i32) {
        let years = YearRange::new(lower, upper);
        if years != self.filters.years {
            self.filters.years = years;
            self.recompute();
        }
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}
