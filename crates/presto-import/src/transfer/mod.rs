//! Batch loader: coerces raw records and writes them with one multi-row INSERT.

use tracing::{debug, info};

use crate::core::{ColumnSchema, QualifiedTableName, RawRecord, SqlValue};
use crate::error::{ImportError, Result};
use crate::target::QueryClient;
use crate::typemap::ColumnType;

/// Build `INSERT INTO table VALUES (?, ?), (?, ?)` for `num_rows` tuples.
pub fn insert_sql(table: &QualifiedTableName, num_cols: usize, num_rows: usize) -> String {
    let placeholders_per_row = format!("({})", vec!["?"; num_cols].join(", "));
    let all_placeholders: Vec<String> =
        std::iter::repeat_n(placeholders_per_row, num_rows).collect();
    format!("INSERT INTO {} VALUES {}", table, all_placeholders.join(", "))
}

/// Coerce every field of every record, row-major in column order.
///
/// Nothing is returned unless the whole batch converts.
pub fn coerce_rows(columns: &ColumnSchema, rows: &[RawRecord]) -> Result<Vec<SqlValue>> {
    let types: Vec<ColumnType> = columns
        .iter()
        .map(|c| ColumnType::parse(&c.data_type))
        .collect::<Result<_>>()?;

    let mut params = Vec::with_capacity(rows.len() * types.len());
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != types.len() {
            return Err(ImportError::FieldCountMismatch {
                row: idx + 1,
                expected: types.len(),
                actual: row.len(),
            });
        }
        for (raw, column_type) in row.iter().zip(&types) {
            params.push(column_type.coerce(raw)?);
        }
    }
    Ok(params)
}

/// Writes batches of records through a [`QueryClient`].
pub struct BatchLoader<'a> {
    client: &'a dyn QueryClient,
}

impl<'a> BatchLoader<'a> {
    pub fn new(client: &'a dyn QueryClient) -> Self {
        Self { client }
    }

    /// Insert `rows` as a single statement.
    ///
    /// All fields are coerced before anything is sent, so a bad value fails
    /// the batch without touching the table. Returns the number of rows
    /// inserted.
    pub async fn load_batch(
        &self,
        table: &QualifiedTableName,
        columns: &ColumnSchema,
        rows: &[RawRecord],
    ) -> Result<u64> {
        if columns.is_empty() {
            return Err(ImportError::InvalidSchema(format!(
                "at least one column should exist in {}",
                table
            )));
        }
        if rows.is_empty() {
            return Ok(0);
        }

        let params = coerce_rows(columns, rows)?;
        let sql = insert_sql(table, columns.len(), rows.len());
        let statement = self.client.prepare(&sql).await?;

        info!("Insert {} rows", rows.len());
        let update_count = self.client.execute_prepared(&statement, &params).await?;
        debug!(
            "Wrote {} rows to {} (engine reported {})",
            rows.len(),
            table,
            update_count
        );
        Ok(rows.len() as u64)
    }
}
