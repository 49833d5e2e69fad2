use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types for the data layer
// ---------------------------------------------------------------------------

/// A data source could not produce a usable table.
///
/// The loader recovers from every variant by moving on to the next source.
#[derive(Debug, Error)]
pub enum SourceUnavailable {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetching {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed CSV from {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("{origin}, row {row}: {message}")]
    InvalidRecord {
        origin: String,
        row: usize,
        message: String,
    },

    #[error("{origin} is missing required columns: {}", .missing.join(", "))]
    MissingColumns { origin: String, missing: Vec<String> },

    #[error("{origin} contains no records")]
    Empty { origin: String },
}

/// No records satisfy the current filter criteria, so averages are undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no records match the selected filters")]
pub struct EmptyViewError;
