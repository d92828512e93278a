use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;
use crate::store::SampleStore;

/// Creates the database file, the sample table and its indexes. Idempotent.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    store.ensure_indexes().await?;
    info!(
        db = %config.db.path.display(),
        collection = %config.db.collection,
        "schema ready"
    );
    store.close().await;
    Ok(())
}
