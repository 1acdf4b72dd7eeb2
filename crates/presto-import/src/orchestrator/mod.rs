//! Import orchestrator - main workflow coordinator.
//!
//! Runs strictly in sequence: resolve the target, optionally drop and
//! recreate it, read its columns, then stream the input file through the
//! batch loader. There are no retries. Batches already written stay written
//! when a later one fails.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::ImportOptions;
use crate::core::{ColumnSchema, QualifiedTableName, RawRecord};
use crate::error::Result;
use crate::source::DelimitedReader;
use crate::target::{drop_create_table, resolve_columns, QueryClient};
use crate::transfer::BatchLoader;

/// Import orchestrator.
///
/// Owns the client session for the duration of one run and closes it on
/// every exit path.
pub struct Orchestrator<C: QueryClient> {
    options: ImportOptions,
    client: C,
}

/// Result of an import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    /// Target table.
    pub table: String,

    /// Final status.
    pub status: String,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// When the import started.
    pub started_at: DateTime<Utc>,

    /// When the import completed.
    pub completed_at: DateTime<Utc>,

    /// Records read from the input file.
    pub rows_read: u64,

    /// Rows written to the table.
    pub rows_inserted: u64,

    /// Rows in batches skipped because of errors.
    pub rows_skipped: u64,

    /// Batches flushed, including failed ones.
    pub batches_total: u64,

    /// Batches that failed and were skipped.
    pub batches_failed: u64,

    /// Average throughput (rows/second).
    pub rows_per_second: u64,
}

impl ImportResult {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Running totals for one import.
#[derive(Debug, Default)]
struct ImportStats {
    rows_read: u64,
    rows_inserted: u64,
    rows_skipped: u64,
    batches_total: u64,
    batches_failed: u64,
}

impl<C: QueryClient> Orchestrator<C> {
    /// Create a new orchestrator.
    pub fn new(options: ImportOptions, client: C) -> Self {
        Self { options, client }
    }

    /// Import the configured file.
    pub async fn run(self) -> Result<ImportResult> {
        let outcome = self.open_and_import().await;
        self.client.close().await;
        outcome
    }

    /// Import records from any source instead of the configured file.
    pub async fn run_records<I>(self, records: I) -> Result<ImportResult>
    where
        I: IntoIterator<Item = Result<RawRecord>>,
    {
        let outcome = match self.options.target() {
            Ok(table) => self.import(&table, records).await,
            Err(e) => Err(e),
        };
        self.client.close().await;
        outcome
    }

    async fn open_and_import(&self) -> Result<ImportResult> {
        let table = self.options.target()?;
        // Open the input before any destructive step so a bad path fails early.
        let reader = DelimitedReader::open(&self.options.file, self.options.input_format)?;
        info!(
            "Importing {:?} ({}) into {}",
            self.options.file, self.options.input_format, table
        );
        self.import(&table, reader).await
    }

    async fn import<I>(&self, table: &QualifiedTableName, records: I) -> Result<ImportResult>
    where
        I: IntoIterator<Item = Result<RawRecord>>,
    {
        let started_at = Utc::now();
        let start = Instant::now();

        if self.options.drop_create {
            drop_create_table(&self.client, table).await?;
        }

        let columns = resolve_columns(&self.client, table).await?;

        let loader = BatchLoader::new(&self.client);
        let batch_size = self.options.batch_size.max(1);
        let mut stats = ImportStats::default();
        let mut batch: Vec<RawRecord> = Vec::with_capacity(batch_size);

        for record in records {
            batch.push(record?);
            stats.rows_read += 1;
            if batch.len() == batch_size {
                self.flush(&loader, table, &columns, &mut batch, &mut stats)
                    .await?;
            }
        }
        if !batch.is_empty() {
            self.flush(&loader, table, &columns, &mut batch, &mut stats)
                .await?;
        }

        let completed_at = Utc::now();
        let duration = start.elapsed().as_secs_f64();
        let rows_per_second = if duration > 0.0 {
            (stats.rows_inserted as f64 / duration) as u64
        } else {
            0
        };
        let status = if stats.batches_failed > 0 {
            "completed_with_errors"
        } else {
            "completed"
        };

        let result = ImportResult {
            table: table.to_string(),
            status: status.to_string(),
            duration_seconds: duration,
            started_at,
            completed_at,
            rows_read: stats.rows_read,
            rows_inserted: stats.rows_inserted,
            rows_skipped: stats.rows_skipped,
            batches_total: stats.batches_total,
            batches_failed: stats.batches_failed,
            rows_per_second,
        };

        info!(
            "Import {}: {} rows into {} in {:.1}s ({} rows/s)",
            result.status,
            result.rows_inserted,
            result.table,
            result.duration_seconds,
            result.rows_per_second
        );
        if result.batches_failed > 0 {
            warn!(
                "{} of {} batches failed, {} rows skipped",
                result.batches_failed, result.batches_total, result.rows_skipped
            );
        }

        Ok(result)
    }

    /// Write the pending batch and clear it.
    async fn flush(
        &self,
        loader: &BatchLoader<'_>,
        table: &QualifiedTableName,
        columns: &ColumnSchema,
        batch: &mut Vec<RawRecord>,
        stats: &mut ImportStats,
    ) -> Result<()> {
        stats.batches_total += 1;
        let number = stats.batches_total;
        let first_row = stats.rows_read - batch.len() as u64 + 1;

        let outcome = loader.load_batch(table, columns, batch).await;
        let rows = batch.len() as u64;
        batch.clear();

        match outcome {
            Ok(inserted) => {
                stats.rows_inserted += inserted;
                Ok(())
            }
            Err(e) if self.options.ignore_errors => {
                warn!(
                    "Skipping batch {} (rows {}-{}): {}",
                    number,
                    first_row,
                    first_row + rows - 1,
                    e
                );
                stats.batches_failed += 1;
                stats.rows_skipped += rows;
                Ok(())
            }
            Err(e) => {
                error!(
                    "Batch {} (rows {}-{}) failed: {}",
                    number,
                    first_row,
                    first_row + rows - 1,
                    e
                );
                Err(e)
            }
        }
    }
}
