use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::model::{HousingRecord, HousingTable};

/// Labels drawn for `ocean_proximity` in generated rows.
pub const SYNTHETIC_LOCATIONS: [&str; 4] = ["INLAND", "NEAR BAY", "NEAR OCEAN", "ISLAND"];

// ---------------------------------------------------------------------------
// Synthetic dataset – last resort when no real source is reachable
// ---------------------------------------------------------------------------

/// Generate `n` uniformly distributed records over plausible California ranges.
///
/// The same `seed` always yields the same table. Integer ranges are half-open,
/// income is closed on both ends.
pub fn generate(n: usize, seed: u64) -> HousingTable {
    let mut rng = StdRng::seed_from_u64(seed);

    let records = (0..n)
        .map(|_| HousingRecord {
            longitude: rng.gen_range(-124.3..=-114.3),
            latitude: rng.gen_range(32.5..=42.0),
            housing_median_age: rng.gen_range(1..52),
            total_rooms: rng.gen_range(2..40_000),
            total_bedrooms: Some(rng.gen_range(1..6_500)),
            population: rng.gen_range(3..15_000),
            households: rng.gen_range(1..5_000),
            median_income: rng.gen_range(0.5..=15.0),
            median_house_value: f64::from(rng.gen_range(15_000u32..500_001)),
            ocean_proximity: SYNTHETIC_LOCATIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or(SYNTHETIC_LOCATIONS[0])
                .to_string(),
        })
        .collect();

    HousingTable::from_records(records)
}
