use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::blocking::Client;

use super::error::SourceUnavailable;
use super::model::{HousingRecord, HousingTable, REQUIRED_COLUMNS};
use super::synthetic;
use crate::config::LoaderConfig;

// ---------------------------------------------------------------------------
// Where the working table came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    LocalFile(PathBuf),
    Remote(String),
    Synthetic,
}

impl DataOrigin {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataOrigin::Synthetic)
    }
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::LocalFile(path) => write!(f, "{}", path.display()),
            DataOrigin::Remote(url) => write!(f, "{url}"),
            DataOrigin::Synthetic => write!(f, "synthetic sample"),
        }
    }
}

/// The loaded snapshot plus its provenance. Cloning shares the table.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Arc<HousingTable>,
    pub origin: DataOrigin,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// One attempt in the loader's fallback chain.
pub trait TableSource: Send + Sync {
    fn origin(&self) -> DataOrigin;

    fn fetch(&self) -> Result<HousingTable, SourceUnavailable>;
}

/// CSV file on the local filesystem.
pub struct LocalCsv {
    path: PathBuf,
}

impl LocalCsv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for LocalCsv {
    fn origin(&self) -> DataOrigin {
        DataOrigin::LocalFile(self.path.clone())
    }

    fn fetch(&self) -> Result<HousingTable, SourceUnavailable> {
        let file = std::fs::File::open(&self.path).map_err(|source| SourceUnavailable::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_csv(file, &self.path.display().to_string())
    }
}

/// CSV served over HTTP(S). Non-success status codes count as unavailable.
pub struct RemoteCsv {
    url: String,
    timeout: Duration,
}

impl RemoteCsv {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    fn http_error(&self, source: reqwest::Error) -> SourceUnavailable {
        SourceUnavailable::Http {
            url: self.url.clone(),
            source,
        }
    }
}

impl TableSource for RemoteCsv {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Remote(self.url.clone())
    }

    fn fetch(&self) -> Result<HousingTable, SourceUnavailable> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.http_error(e))?;

        let body = client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| self.http_error(e))?;

        parse_csv(body.as_ref(), &self.url)
    }
}

// ---------------------------------------------------------------------------
// CSV parsing + schema validation
// ---------------------------------------------------------------------------

/// Parse a housing CSV, validating the header before reading any row.
///
/// Columns are matched by name, so order does not matter and extra columns are
/// ignored. `origin` is only used in error messages.
pub fn parse_csv<R: Read>(reader: R, origin: &str) -> Result<HousingTable, SourceUnavailable> {
    let csv_error = |source| SourceUnavailable::Csv {
        origin: origin.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SourceUnavailable::MissingColumns {
            origin: origin.to_string(),
            missing,
        });
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<HousingRecord>().enumerate() {
        let record = result.map_err(csv_error)?;
        record
            .check()
            .map_err(|message| SourceUnavailable::InvalidRecord {
                origin: origin.to_string(),
                row: row_no + 1,
                message,
            })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(SourceUnavailable::Empty {
            origin: origin.to_string(),
        });
    }

    Ok(HousingTable::from_records(records))
}

/// Convenience wrapper used by tooling: parse a CSV file at `path`.
pub fn load_file(path: &Path) -> Result<HousingTable, SourceUnavailable> {
    LocalCsv::new(path).fetch()
}

// ---------------------------------------------------------------------------
// Loader: ordered fallback chain with a load-once cache
// ---------------------------------------------------------------------------

/// Produces the working table. Always succeeds: when every source fails the
/// synthetic generator supplies the data.
pub struct DataLoader {
    sources: Vec<Box<dyn TableSource>>,
    synthetic_rows: usize,
    synthetic_seed: u64,
    cache: OnceLock<LoadedTable>,
}

impl DataLoader {
    /// Local file first, then the remote URL.
    pub fn new(config: &LoaderConfig) -> Self {
        let sources: Vec<Box<dyn TableSource>> = vec![
            Box::new(LocalCsv::new(config.local_path.clone())),
            Box::new(RemoteCsv::new(
                config.remote_url.clone(),
                config.request_timeout,
            )),
        ];
        Self::with_sources(sources, config.synthetic_rows, config.synthetic_seed)
    }

    pub fn with_sources(
        sources: Vec<Box<dyn TableSource>>,
        synthetic_rows: usize,
        synthetic_seed: u64,
    ) -> Self {
        Self {
            sources,
            // An empty synthetic table would break the non-empty guarantee.
            synthetic_rows: synthetic_rows.max(1),
            synthetic_seed,
            cache: OnceLock::new(),
        }
    }

    /// Return the working table, reading sources only on the first call.
    pub fn load(&self) -> LoadedTable {
        self.cache.get_or_init(|| self.load_uncached()).clone()
    }

    fn load_uncached(&self) -> LoadedTable {
        for source in &self.sources {
            let origin = source.origin();
            match source.fetch() {
                Ok(table) => {
                    log::info!("Loaded {} housing records from {origin}", table.len());
                    return LoadedTable {
                        table: Arc::new(table),
                        origin,
                    };
                }
                Err(e) => {
                    log::warn!("Data source {origin} unavailable: {e}");
                }
            }
        }

        log::warn!(
            "Using {} synthetic records because no housing data source could be loaded",
            self.synthetic_rows
        );
        LoadedTable {
            table: Arc::new(synthetic::generate(self.synthetic_rows, self.synthetic_seed)),
            origin: DataOrigin::Synthetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const HEADER: &str = "longitude,latitude,housing_median_age,total_rooms,total_bedrooms,\
population,households,median_income,median_house_value,ocean_proximity";

    fn sample_csv() -> String {
        format!(
            "{HEADER}\n\
             -122.23,37.88,41.0,880.0,129.0,322.0,126.0,8.3252,452600.0,NEAR BAY\n\
             -122.22,37.86,21.0,7099.0,1106.0,2401.0,1138.0,8.3014,358500.0,NEAR BAY\n\
             -121.97,37.44,18.0,1000.0,,500.0,200.0,2.1,150000.0,<1H OCEAN\n"
        )
    }

    /// Nothing listens on the discard port, so connections are refused at once.
    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/housing.csv";

    /// Serve exactly one HTTP response on a random loopback port.
    fn serve_once(status: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                while reader.read_line(&mut line).unwrap_or(0) > 0 {
                    if line == "\r\n" {
                        break;
                    }
                    line.clear();
                }
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/housing.csv")
    }

    fn config_for(local: &Path, remote: &str) -> LoaderConfig {
        LoaderConfig {
            local_path: local.to_path_buf(),
            remote_url: remote.to_string(),
            request_timeout: Duration::from_secs(5),
            ..LoaderConfig::default()
        }
    }

    #[test]
    fn test_parse_published_format() {
        let table = parse_csv(sample_csv().as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.records()[0];
        assert_eq!(first.total_rooms, 880);
        assert_eq!(first.total_bedrooms, Some(129));
        assert_eq!(first.median_house_value, 452_600.0);
        assert_eq!(first.ocean_proximity, "NEAR BAY");

        // Blank bedrooms cell is missing, not malformed.
        assert_eq!(table.records()[2].total_bedrooms, None);
        assert!(table.locations().contains("<1H OCEAN"));
    }

    #[test]
    fn test_extra_and_reordered_columns_tolerated() {
        let csv = "id,ocean_proximity,median_house_value,median_income,households,population,\
total_bedrooms,total_rooms,housing_median_age,latitude,longitude\n\
7,INLAND,90000,1.5,10,30,5,20,3,36.0,-119.0\n";
        let table = parse_csv(csv.as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].ocean_proximity, "INLAND");
        assert_eq!(table.records()[0].longitude, -119.0);
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "longitude,latitude,median_house_value\n-122.0,37.0,100000\n";
        match parse_csv(csv.as_bytes(), "test") {
            Err(SourceUnavailable::MissingColumns { missing, .. }) => {
                assert!(missing.contains(&"ocean_proximity".to_string()));
                assert!(missing.contains(&"median_income".to_string()));
                assert!(!missing.contains(&"longitude".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let csv = format!("{HEADER}\n");
        assert!(matches!(
            parse_csv(csv.as_bytes(), "test"),
            Err(SourceUnavailable::Empty { .. })
        ));
    }

    #[test]
    fn test_malformed_rows_rejected() {
        let fractional_rooms = format!("{HEADER}\n-122.0,37.0,10,12.5,1,1,1,2.0,100000,INLAND\n");
        assert!(matches!(
            parse_csv(fractional_rooms.as_bytes(), "test"),
            Err(SourceUnavailable::Csv { .. })
        ));

        let not_a_number = format!("{HEADER}\n-122.0,37.0,10,12,1,1,1,abc,100000,INLAND\n");
        assert!(matches!(
            parse_csv(not_a_number.as_bytes(), "test"),
            Err(SourceUnavailable::Csv { .. })
        ));

        let negative_value = format!("{HEADER}\n-122.0,37.0,10,12,1,1,1,2.0,-5,INLAND\n");
        assert!(matches!(
            parse_csv(negative_value.as_bytes(), "test"),
            Err(SourceUnavailable::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_local_file_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_csv().as_bytes()).unwrap();

        let loader = DataLoader::new(&config_for(file.path(), UNREACHABLE_URL));
        let loaded = loader.load();
        assert_eq!(loaded.origin, DataOrigin::LocalFile(file.path().to_path_buf()));
        assert_eq!(loaded.table.len(), 3);
    }

    #[test]
    fn test_remote_used_when_local_missing() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_once("200 OK", sample_csv());

        let loader = DataLoader::new(&config_for(&dir.path().join("absent.csv"), &url));
        let loaded = loader.load();
        assert_eq!(loaded.origin, DataOrigin::Remote(url));
        assert_eq!(loaded.table.len(), 3);
    }

    #[test]
    fn test_remote_error_status_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_once("404 Not Found", "not here".to_string());

        let loaded = DataLoader::new(&config_for(&dir.path().join("absent.csv"), &url)).load();
        assert!(loaded.origin.is_synthetic());
    }

    #[test]
    fn test_synthetic_when_everything_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(&config_for(&dir.path().join("absent.csv"), UNREACHABLE_URL));

        let loaded = loader.load();
        assert!(loaded.origin.is_synthetic());
        assert_eq!(loaded.table.len(), 1000);
        assert_eq!(*loaded.table, synthetic::generate(1000, 42));
    }

    #[test]
    fn test_malformed_local_file_falls_through() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"longitude,latitude\n1,2\n").unwrap();

        let loaded = DataLoader::new(&config_for(file.path(), UNREACHABLE_URL)).load();
        assert!(loaded.origin.is_synthetic());
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        result: Option<String>,
    }

    impl TableSource for CountingSource {
        fn origin(&self) -> DataOrigin {
            DataOrigin::Remote("counting".to_string())
        }

        fn fetch(&self) -> Result<HousingTable, SourceUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Some(csv) => parse_csv(csv.as_bytes(), "counting"),
                None => Err(SourceUnavailable::Empty {
                    origin: "counting".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_load_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = DataLoader::with_sources(
            vec![Box::new(CountingSource {
                calls: Arc::clone(&calls),
                result: Some(sample_csv()),
            })],
            10,
            1,
        );

        let first = loader.load();
        let second = loader.load();
        assert!(Arc::ptr_eq(&first.table, &second.table));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_first_success_wins() {
        let failing = Arc::new(AtomicUsize::new(0));
        let winning = Arc::new(AtomicUsize::new(0));
        let never = Arc::new(AtomicUsize::new(0));

        let loader = DataLoader::with_sources(
            vec![
                Box::new(CountingSource {
                    calls: Arc::clone(&failing),
                    result: None,
                }),
                Box::new(CountingSource {
                    calls: Arc::clone(&winning),
                    result: Some(sample_csv()),
                }),
                Box::new(CountingSource {
                    calls: Arc::clone(&never),
                    result: Some(sample_csv()),
                }),
            ],
            10,
            1,
        );

        let loaded = loader.load();
        assert!(!loaded.origin.is_synthetic());
        assert_eq!(loaded.table.len(), 3);
        assert_eq!(failing.load(Ordering::SeqCst), 1);
        assert_eq!(winning.load(Ordering::SeqCst), 1);
        assert_eq!(never.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_sources_still_yields_rows() {
        let loaded = DataLoader::with_sources(Vec::new(), 0, 3).load();
        assert!(loaded.origin.is_synthetic());
        assert_eq!(loaded.table.len(), 1);
    }
}
