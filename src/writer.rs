//! Sanitary insert of sanitized samples.
//!
//! Samples are inserted one at a time, in order. A sample rejected by the
//! unique (`Sample_ID`, `Study_Code`) index is logged and skipped; any other
//! store failure aborts the run and is returned to the caller.

use anyhow::Result;
use tracing::{debug, warn};

use crate::models::Sample;
use crate::store::{InsertOutcome, SampleStore};

/// Ensures the indexes exist, then stores `samples` in order.
///
/// Returns the generated identifiers of the samples that were stored, in
/// input order. The result is shorter than `samples` by the number of
/// duplicates skipped.
pub async fn store_samples(store: &dyn SampleStore, samples: &[Sample]) -> Result<Vec<String>> {
    store.ensure_indexes().await?;

    let mut ids = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        match store.insert_sample(sample).await? {
            InsertOutcome::Inserted(id) => {
                debug!(row = index + 1, id = %id, "stored sample");
                ids.push(id);
            }
            InsertOutcome::Duplicate => {
                let content = serde_json::to_string(sample).unwrap_or_default();
                warn!(
                    row = index + 1,
                    study_code = sample.study_code().unwrap_or_default(),
                    sample_id = sample.sample_id().unwrap_or_default(),
                    sample = %content,
                    "skipping sample: (Sample_ID, Study_Code) already stored"
                );
            }
        }
    }

    Ok(ids)
}
