use std::collections::BTreeSet;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Columns every source must provide. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_house_value",
    "ocean_proximity",
];

// ---------------------------------------------------------------------------
// HousingRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single census block observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(deserialize_with = "de_count")]
    pub housing_median_age: u32,
    #[serde(deserialize_with = "de_count")]
    pub total_rooms: u32,
    /// Blank in a couple of hundred rows of the published dataset.
    #[serde(deserialize_with = "de_opt_count")]
    pub total_bedrooms: Option<u32>,
    #[serde(deserialize_with = "de_count")]
    pub population: u32,
    #[serde(deserialize_with = "de_count")]
    pub households: u32,
    /// Tens of thousands of dollars.
    pub median_income: f64,
    pub median_house_value: f64,
    pub ocean_proximity: String,
}

// The published CSV writes integer columns as `880.0`.
fn count_from_f64<E: serde::de::Error>(v: f64) -> Result<u32, E> {
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return Err(E::custom(format!("expected a non-negative integer, got {v}")));
    }
    Ok(v as u32)
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let v = f64::deserialize(deserializer)?;
    count_from_f64(v)
}

fn de_opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        Some(v) => count_from_f64(v).map(Some),
        None => Ok(None),
    }
}

impl HousingRecord {
    /// Reject values the schema forbids but the type system lets through.
    pub(crate) fn check(&self) -> Result<(), String> {
        if !self.longitude.is_finite() || !self.latitude.is_finite() {
            return Err("non-finite coordinates".to_string());
        }
        if !(self.median_income >= 0.0 && self.median_income.is_finite()) {
            return Err(format!(
                "median_income must be non-negative, got {}",
                self.median_income
            ));
        }
        if !(self.median_house_value >= 0.0 && self.median_house_value.is_finite()) {
            return Err(format!(
                "median_house_value must be non-negative, got {}",
                self.median_house_value
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HousingTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset in source row order, with pre-computed column indices.
///
/// Never mutated after construction; shared as `Arc<HousingTable>`.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingTable {
    records: Vec<HousingRecord>,
    /// Sorted distinct `ocean_proximity` labels.
    locations: BTreeSet<String>,
    /// Observed `(min, max)` of `median_house_value`; `None` when empty.
    price_bounds: Option<(f64, f64)>,
}

impl HousingTable {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<HousingRecord>) -> Self {
        let locations = records
            .iter()
            .map(|r| r.ocean_proximity.clone())
            .collect();

        let price_bounds = records.iter().map(|r| r.median_house_value).fold(
            None,
            |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            },
        );

        HousingTable {
            records,
            locations,
            price_bounds,
        }
    }

    pub fn records(&self) -> &[HousingRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&HousingRecord> {
        self.records.get(row)
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.price_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
