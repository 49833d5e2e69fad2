use std::sync::Arc;

use housing_explorer::data::error::EmptyViewError;
use housing_explorer::data::filter::{self, FilterCriteria, FilteredView, IncomeBracket, PriceRange};
use housing_explorer::data::loader::{DataOrigin, LoadedTable};
use housing_explorer::data::model::HousingTable;
use housing_explorer::data::summary::{self, Summary};

use crate::color::LocationColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Immutable snapshot loaded once at start-up.
    pub table: Arc<HousingTable>,

    pub origin: DataOrigin,

    /// Current sidebar selections.
    pub criteria: FilterCriteria,

    /// Rows passing the current criteria (cached).
    pub view: FilteredView,

    /// Statistics for `view`, or the reason there are none.
    pub summary: Result<Summary, EmptyViewError>,

    pub colors: LocationColors,

    /// Set when the view changes so the map can jump to the new centroid.
    pub recenter_map: bool,
}

impl AppState {
    pub fn new(loaded: LoadedTable) -> Self {
        let LoadedTable { table, origin } = loaded;
        let criteria = FilterCriteria::for_table(&table);
        let view = filter::apply(&table, &criteria);
        let summary = summary::summarize(&view);
        let colors = LocationColors::new(table.locations());

        Self {
            table,
            origin,
            criteria,
            view,
            summary,
            colors,
            recenter_map: true,
        }
    }

    /// Observed price range of the whole table; the slider limits.
    pub fn price_bounds(&self) -> (f64, f64) {
        self.table.price_bounds().unwrap_or((0.0, 0.0))
    }

    /// Recompute the view and summary from scratch.
    pub fn refilter(&mut self) {
        self.view = filter::apply(&self.table, &self.criteria);
        self.summary = summary::summarize(&self.view);
        self.recenter_map = true;
        log::debug!(
            "Filter matched {} of {} records",
            self.view.len(),
            self.table.len()
        );
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        let range = range.clamped_to(self.price_bounds());
        if range != self.criteria.price_range {
            self.criteria.price_range = range;
            self.refilter();
        }
    }

    pub fn set_income_bracket(&mut self, bracket: IncomeBracket) {
        if bracket != self.criteria.income_bracket {
            self.criteria.income_bracket = bracket;
            self.refilter();
        }
    }

    /// Toggle a single location label in the multi-select.
    pub fn toggle_location(&mut self, location: &str) {
        let selected = &mut self.criteria.allowed_locations;
        if !selected.remove(location) {
            selected.insert(location.to_string());
        }
        self.refilter();
    }

    /// Select all location labels.
    pub fn select_all_locations(&mut self) {
        self.criteria.allowed_locations = self.table.locations().clone();
        self.refilter();
    }

    /// Deselect all location labels (which disables the location filter).
    pub fn select_no_locations(&mut self) {
        self.criteria.allowed_locations.clear();
        self.refilter();
    }

    /// Restore the "show everything" criteria.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::for_table(&self.table);
        self.refilter();
    }
}
