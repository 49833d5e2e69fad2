/// Data layer: core types, loading, filtering and summaries.
///
/// Architecture:
/// ```text
///  housing.csv ──► remote CSV ──► synthetic
///        │   (first source that parses wins)
///        ▼
///   ┌──────────┐
///   │  loader   │  fallback chain → Arc<HousingTable>, loaded once
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  price ∧ location ∧ income → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  count, means, centroid, histogram bins
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
pub mod synthetic;
