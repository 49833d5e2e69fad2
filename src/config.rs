use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Loader configuration
// ---------------------------------------------------------------------------

/// Relative path tried first when loading the dataset.
pub const DEFAULT_LOCAL_PATH: &str = "housing.csv";

/// Public copy of the 1990 California housing dataset.
pub const DEFAULT_REMOTE_URL: &str =
    "https://raw.githubusercontent.com/ageron/handson-ml2/master/datasets/housing/housing.csv";

/// Environment variable overriding [`LoaderConfig::local_path`].
pub const LOCAL_PATH_ENV: &str = "HOUSING_CSV_PATH";

/// Environment variable overriding [`LoaderConfig::remote_url`].
pub const REMOTE_URL_ENV: &str = "HOUSING_CSV_URL";

/// Where the loader looks for data and how it builds the synthetic fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub local_path: PathBuf,
    pub remote_url: String,
    pub request_timeout: Duration,
    /// Number of rows generated when every real source fails.
    pub synthetic_rows: usize,
    pub synthetic_seed: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            local_path: PathBuf::from(DEFAULT_LOCAL_PATH),
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            synthetic_rows: 1000,
            synthetic_seed: 42,
        }
    }
}

impl LoaderConfig {
    /// Defaults, with the local path and remote URL optionally overridden
    /// through `HOUSING_CSV_PATH` / `HOUSING_CSV_URL`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(LOCAL_PATH_ENV).ok(),
            std::env::var(REMOTE_URL_ENV).ok(),
        )
    }

    fn with_overrides(mut self, local: Option<String>, remote: Option<String>) -> Self {
        if let Some(path) = local.filter(|p| !p.trim().is_empty()) {
            self.local_path = PathBuf::from(path);
        }
        if let Some(url) = remote.filter(|u| !u.trim().is_empty()) {
            self.remote_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.local_path, PathBuf::from("housing.csv"));
        assert_eq!(config.remote_url, DEFAULT_REMOTE_URL);
        assert_eq!(config.synthetic_rows, 1000);
        assert_eq!(config.synthetic_seed, 42);
    }

    #[test]
    fn test_overrides_applied() {
        let config = LoaderConfig::default().with_overrides(
            Some("data/other.csv".to_string()),
            Some("http://localhost/housing.csv".to_string()),
        );
        assert_eq!(config.local_path, PathBuf::from("data/other.csv"));
        assert_eq!(config.remote_url, "http://localhost/housing.csv");
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let config = LoaderConfig::default().with_overrides(Some("  ".to_string()), None);
        assert_eq!(config, LoaderConfig::default());
    }
}
