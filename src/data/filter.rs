use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::model::{HousingRecord, HousingTable};

/// Upper bound of the low income bracket (inclusive).
pub const LOW_INCOME_MAX: f64 = 2.5;
/// Lower bound of the high income bracket (inclusive).
pub const HIGH_INCOME_MIN: f64 = 4.5;

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Inclusive bounds on `median_house_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Clamp both ends into `bounds` and keep `min <= max`.
    pub fn clamped_to(self, bounds: (f64, f64)) -> Self {
        let (lo, hi) = bounds;
        let min = self.min.clamp(lo, hi);
        let max = self.max.clamp(lo, hi);
        PriceRange {
            min: min.min(max),
            max: max.max(min),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomeBracket {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl IncomeBracket {
    pub const ALL: [IncomeBracket; 4] = [
        IncomeBracket::All,
        IncomeBracket::Low,
        IncomeBracket::Medium,
        IncomeBracket::High,
    ];

    pub fn contains(self, income: f64) -> bool {
        match self {
            IncomeBracket::All => true,
            IncomeBracket::Low => income <= LOW_INCOME_MAX,
            IncomeBracket::Medium => LOW_INCOME_MAX < income && income < HIGH_INCOME_MIN,
            IncomeBracket::High => income >= HIGH_INCOME_MIN,
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeBracket::All => write!(f, "All"),
            IncomeBracket::Low => write!(f, "Low (≤{LOW_INCOME_MAX})"),
            IncomeBracket::Medium => write!(f, "Medium (>{LOW_INCOME_MAX} & <{HIGH_INCOME_MIN})"),
            IncomeBracket::High => write!(f, "High (≥{HIGH_INCOME_MIN})"),
        }
    }
}

/// Everything the sidebar lets the user constrain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub price_range: PriceRange,
    /// Selected `ocean_proximity` labels. Empty means "no location filter".
    pub allowed_locations: BTreeSet<String>,
    pub income_bracket: IncomeBracket,
}

impl FilterCriteria {
    /// Criteria that keep every record: full observed price range, all
    /// locations selected, any income.
    pub fn for_table(table: &HousingTable) -> Self {
        let (min, max) = table.price_bounds().unwrap_or((0.0, 0.0));
        FilterCriteria {
            price_range: PriceRange { min, max },
            allowed_locations: table.locations().clone(),
            income_bracket: IncomeBracket::All,
        }
    }

    /// Whether a single record passes all three predicates.
    ///
    /// An empty location selection skips the location predicate instead of
    /// rejecting everything. This mirrors the dashboard's long-standing
    /// behaviour and is kept until product decides otherwise.
    pub fn matches(&self, record: &HousingRecord) -> bool {
        self.price_range.contains(record.median_house_value)
            && (self.allowed_locations.is_empty()
                || self.allowed_locations.contains(&record.ocean_proximity))
            && self.income_bracket.contains(record.median_income)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a shared table that passed a set of criteria, in table order.
#[derive(Debug, Clone)]
pub struct FilteredView {
    table: Arc<HousingTable>,
    rows: Vec<usize>,
}

impl FilteredView {
    /// A view over every row of `table`.
    pub fn all(table: &Arc<HousingTable>) -> Self {
        FilteredView {
            table: Arc::clone(table),
            rows: (0..table.len()).collect(),
        }
    }

    /// Apply `criteria` to the rows of this view.
    pub fn refine(&self, criteria: &FilterCriteria) -> Self {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&row| {
                self.table
                    .get(row)
                    .is_some_and(|record| criteria.matches(record))
            })
            .collect();
        FilteredView {
            table: Arc::clone(&self.table),
            rows,
        }
    }

    pub fn table(&self) -> &HousingTable {
        &self.table
    }

    /// Row indices into the underlying table, ascending.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &HousingRecord> + '_ {
        self.rows.iter().filter_map(|&row| self.table.get(row))
    }

    /// The first `n` records, for the raw data table.
    pub fn head(&self, n: usize) -> impl Iterator<Item = &HousingRecord> + '_ {
        self.records().take(n)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Return the rows of `table` that satisfy `criteria`, preserving order.
pub fn apply(table: &Arc<HousingTable>, criteria: &FilterCriteria) -> FilteredView {
    FilteredView::all(table).refine(criteria)
}
