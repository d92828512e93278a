//! SQLite implementation of [`SampleStore`].
//!
//! Each sample is one row of the configured collection table: a generated
//! UUID identity, the two key columns copied out of the sample for lookup,
//! the encoded (`Sample_ID`, `Study_Code`) pair, and the full sanitized
//! sample as a JSON object in header order.
//!
//! ```text
//! <collection>(id TEXT PRIMARY KEY, study_code TEXT, sample_id TEXT, pair_key TEXT NOT NULL, document TEXT)
//!   idx_<collection>_sample_id               (sample_id)
//!   uq_<collection>_sample_id_study_code     UNIQUE (pair_key)
//! ```
//!
//! SQLite treats NULLs as distinct in unique indexes, so the pair is encoded
//! as a JSON array (`["a",null]`) instead. A missing key value then collides
//! with another missing value, and stays distinct from an empty string.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::Config;
use crate::db;
use crate::models::{Record, Sample};
use crate::store::{InsertOutcome, SampleStore};

/// SQLite-backed sample store. Opened once per run; call
/// [`close`](SqliteStore::close) when done.
pub struct SqliteStore {
    pool: SqlitePool,
    collection: String,
}

impl SqliteStore {
    /// Opens (creating if missing) the database named by `[db].path`.
    pub async fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let pool = db::connect(config)
            .await
            .with_context(|| format!("Failed to open database: {}", config.db.path.display()))?;
        Ok(Self {
            pool,
            collection: config.db.collection.clone(),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Encodes the uniqueness key so that absent values compare equal.
fn pair_key(sample: &Sample) -> Result<String> {
    Ok(serde_json::to_string(&(sample.sample_id(), sample.study_code()))?)
}

#[async_trait]
impl SampleStore for SqliteStore {
    async fn ensure_indexes(&self) -> Result<()> {
        let table = &self.collection;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                study_code TEXT,
                sample_id TEXT,
                pair_key TEXT NOT NULL,
                document TEXT NOT NULL
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_sample_id ON {table}(sample_id)"
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_{table}_sample_id_study_code ON {table}(pair_key)"
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_sample(&self, sample: &Sample) -> Result<InsertOutcome> {
        let id = Uuid::new_v4().to_string();
        let document = serde_json::to_string(sample)?;
        let key = pair_key(sample)?;

        let result = sqlx::query(&format!(
            "INSERT INTO {} (id, study_code, sample_id, pair_key, document) VALUES (?, ?, ?, ?, ?)",
            self.collection
        ))
        .bind(&id)
        .bind(sample.study_code())
        .bind(sample.sample_id())
        .bind(&key)
        .bind(&document)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted(id)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_sample_id(&self, sample_id: &str) -> Result<Option<Record>> {
        let document: Option<String> = sqlx::query_scalar(&format!(
            "SELECT document FROM {} WHERE sample_id = ? ORDER BY rowid ASC LIMIT 1",
            self.collection
        ))
        .bind(sample_id)
        .fetch_optional(&self.pool)
        .await?;

        match document {
            Some(json) => {
                let record: Record = serde_json::from_str(&json)
                    .with_context(|| format!("Corrupt document for Sample_ID '{}'", sample_id))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<u64> {
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.collection))
            .fetch_one(&self.pool)
            .await?;
        Ok(n as u64)
    }
}
