use std::path::PathBuf;

use anyhow::{Context, Result};
use housing_explorer::config::{LoaderConfig, DEFAULT_LOCAL_PATH};
use housing_explorer::data::loader::load_file;
use housing_explorer::data::synthetic;

/// Write the synthetic fallback dataset as a CSV the explorer can load.
///
/// Usage: `generate_sample [OUTPUT]` (defaults to `housing.csv`).
fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_PATH));

    let config = LoaderConfig::default();
    let table = synthetic::generate(config.synthetic_rows, config.synthetic_seed);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for record in table.records() {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    // Read it back through the same path the explorer uses.
    let reloaded = load_file(&output_path)
        .with_context(|| format!("re-reading {}", output_path.display()))?;
    anyhow::ensure!(
        reloaded.len() == table.len(),
        "expected {} rows after re-reading, found {}",
        table.len(),
        reloaded.len()
    );

    println!(
        "Wrote {} synthetic housing records ({} locations) to {}",
        reloaded.len(),
        reloaded.locations().len(),
        output_path.display()
    );
    Ok(())
}
