//! Storage abstraction for sample records.
//!
//! The [`SampleStore`] trait is the narrow interface the ingestion pipeline
//! and the read API drive: ensure indexes, insert one sample, look one up by
//! `Sample_ID`. Backends must enforce uniqueness of the
//! (`Study_Code`, `Sample_ID`) pair themselves; callers never lock.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Record, Sample};

/// Result of a single insert attempt that reached the store.
///
/// Failures other than a uniqueness conflict are returned as `Err` from
/// [`SampleStore::insert_sample`] and are fatal to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored; carries the generated identifier.
    Inserted(String),
    /// Rejected by the unique (`Sample_ID`, `Study_Code`) index.
    Duplicate,
}

/// Abstract storage backend for samples.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`ensure_indexes`](SampleStore::ensure_indexes) | Create the lookup and uniqueness indexes (idempotent) |
/// | [`insert_sample`](SampleStore::insert_sample) | Insert one sample |
/// | [`find_by_sample_id`](SampleStore::find_by_sample_id) | First record with a given `Sample_ID` |
/// | [`count`](SampleStore::count) | Number of stored records |
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Creates the non-unique `Sample_ID` index and the unique
    /// (`Sample_ID`, `Study_Code`) index. Safe to call on every run.
    async fn ensure_indexes(&self) -> Result<()>;

    /// Attempts to insert one sample.
    async fn insert_sample(&self, sample: &Sample) -> Result<InsertOutcome>;

    /// Returns the earliest-stored record whose `Sample_ID` equals
    /// `sample_id`, without the store identity.
    async fn find_by_sample_id(&self, sample_id: &str) -> Result<Option<Record>>;

    async fn count(&self) -> Result<u64>;
}
