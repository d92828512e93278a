//! Sample retrieval by `Sample_ID`.
//!
//! Used by both the `sediment get` CLI command and the
//! `GET /samples/{sample_id}` HTTP endpoint.

use anyhow::Result;

use crate::config::Config;
use crate::models::Record;
use crate::sqlite_store::SqliteStore;
use crate::store::SampleStore;

/// Message used for a lookup miss, on the CLI and over HTTP.
pub fn not_found_message(sample_id: &str) -> String {
    format!("Failed to find a sample having Sample_ID: '{}'", sample_id)
}

/// Core get function returning the record, or `None` when no sample has
/// this `Sample_ID`.
pub async fn get_sample(store: &dyn SampleStore, sample_id: &str) -> Result<Option<Record>> {
    store.find_by_sample_id(sample_id).await
}

/// CLI entry point: prints the record as JSON.
pub async fn run_get(config: &Config, sample_id: &str) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    store.ensure_indexes().await?;
    let result = get_sample(&store, sample_id).await;
    store.close().await;

    match result? {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => {
            eprintln!("Error: {}", not_found_message(sample_id));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn test_get_returns_record_without_identity() {
        let store = InMemoryStore::new();
        let sample: Sample = [
            ("Study_Code", Some("some_study_code")),
            ("Sample_ID", Some("sample_b")),
            ("C", Some("22")),
            ("D", None),
        ]
        .into_iter()
        .collect();
        store.insert_sample(&sample).await.unwrap();

        let record = get_sample(&store, "sample_b").await.unwrap().unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Study_Code", "Sample_ID", "C", "D"]);
        assert!(record["D"].is_null());
        assert!(!record.contains_key("id") && !record.contains_key("_id"));
    }

    #[tokio::test]
    async fn test_get_miss_is_none() {
        let store = InMemoryStore::new();
        assert!(get_sample(&store, "sample_d").await.unwrap().is_none());
        assert_eq!(
            not_found_message("sample_d"),
            "Failed to find a sample having Sample_ID: 'sample_d'"
        );
    }
}
