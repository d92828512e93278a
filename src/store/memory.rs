//! In-memory [`SampleStore`] implementation for testing and embedding.
//!
//! Records live in a `Vec` behind `std::sync::RwLock`, in insertion order.
//! Uniqueness follows the SQLite backend: two samples collide when their
//! (`Study_Code`, `Sample_ID`) pairs are equal, a missing value matching only
//! another missing value.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Record, Sample};

use super::{InsertOutcome, SampleStore};

struct StoredSample {
    _id: String,
    study_code: Option<String>,
    sample_id: Option<String>,
    record: Record,
}

/// In-memory store for tests and embedders without a database file.
pub struct InMemoryStore {
    samples: RwLock<Vec<StoredSample>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn same_key(stored: &StoredSample, study_code: Option<&str>, sample_id: Option<&str>) -> bool {
    stored.study_code.as_deref() == study_code && stored.sample_id.as_deref() == sample_id
}

#[async_trait]
impl SampleStore for InMemoryStore {
    async fn ensure_indexes(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_sample(&self, sample: &Sample) -> Result<InsertOutcome> {
        let mut samples = self
            .samples
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;

        let study_code = sample.study_code();
        let sample_id = sample.sample_id();
        if samples.iter().any(|s| same_key(s, study_code, sample_id)) {
            return Ok(InsertOutcome::Duplicate);
        }

        let id = Uuid::new_v4().to_string();
        samples.push(StoredSample {
            _id: id.clone(),
            study_code: study_code.map(str::to_string),
            sample_id: sample_id.map(str::to_string),
            record: sample.to_record(),
        });
        Ok(InsertOutcome::Inserted(id))
    }

    async fn find_by_sample_id(&self, sample_id: &str) -> Result<Option<Record>> {
        let samples = self
            .samples
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(samples
            .iter()
            .find(|s| s.sample_id.as_deref() == Some(sample_id))
            .map(|s| s.record.clone()))
    }

    async fn count(&self) -> Result<u64> {
        let samples = self
            .samples
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(samples.len() as u64)
    }
}
