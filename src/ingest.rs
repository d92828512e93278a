//! Ingestion pipeline orchestration.
//!
//! Coordinates the full flow: input path check → CSV parse + sanitize →
//! sanitary insert. The input file is validated and fully parsed before the
//! store is opened, so a bad path never touches the database.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::models::Sample;
use crate::parse::{open_input, parse_csv_file, parse_csv_reader};
use crate::sqlite_store::SqliteStore;
use crate::store::SampleStore;
use crate::writer::store_samples;

/// Counts reported at the end of an ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub extracted: usize,
    pub stored: usize,
    pub ids: Vec<String>,
}

impl IngestSummary {
    pub fn skipped(&self) -> usize {
        self.extracted - self.stored
    }
}

/// Parses `csv_path` and stores its samples through `store`.
pub async fn ingest_file(store: &dyn SampleStore, csv_path: &Path) -> Result<IngestSummary> {
    let samples = parse_csv_file(csv_path)
        .with_context(|| format!("Failed to parse CSV file: {}", csv_path.display()))?;
    log_samples(&samples);
    store_parsed(store, &samples).await
}

fn log_samples(samples: &[Sample]) {
    for (index, sample) in samples.iter().enumerate() {
        debug!(
            row = index + 1,
            sample = %serde_json::to_string(sample).unwrap_or_default(),
            "sanitized sample"
        );
    }
}

async fn store_parsed(store: &dyn SampleStore, samples: &[Sample]) -> Result<IngestSummary> {
    let ids = store_samples(store, samples).await?;
    Ok(IngestSummary {
        extracted: samples.len(),
        stored: ids.len(),
        ids,
    })
}

/// CLI entry point for `sediment ingest`.
pub async fn run_ingest(config: &Config, csv_path: &Path) -> Result<IngestSummary> {
    let (csv_path, file) = open_input(csv_path)?;
    debug!(path = %csv_path.display(), "CSV file");

    let samples = parse_csv_reader(file)
        .with_context(|| format!("Failed to parse CSV file: {}", csv_path.display()))?;
    log_samples(&samples);
    println!("Extracted {} samples from the CSV file.", samples.len());

    let store = SqliteStore::open(config).await?;
    let result = store_parsed(&store, &samples).await;
    store.close().await;
    let summary = result?;

    println!("Stored {} samples in the database.", summary.stored);
    if summary.skipped() > 0 {
        println!("Skipped {} duplicate samples.", summary.skipped());
    }
    debug!(ids = ?summary.ids, "generated identifiers");

    Ok(summary)
}
