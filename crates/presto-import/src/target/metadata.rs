//! Table metadata lookups and drop/recreate.

use tracing::info;

use super::QueryClient;
use crate::core::{quote_literal, ColumnSchema, QualifiedTableName};
use crate::error::{ImportError, Result};

/// Build the metadata query for a table's columns in declaration order.
fn columns_sql(table: &QualifiedTableName) -> String {
    format!(
        "SELECT column_name, data_type \
         FROM {}.information_schema.columns \
         WHERE table_schema = {} AND table_name = {} \
         ORDER BY ordinal_position",
        table.catalog(),
        quote_literal(table.schema()),
        quote_literal(table.table())
    )
}

/// Look up the columns of a table in the order the engine reports them.
///
/// # Errors
///
/// Returns `ImportError::TableNotFound` when no columns come back; a table
/// without columns cannot be told apart from a missing table.
pub async fn resolve_columns(
    client: &dyn QueryClient,
    table: &QualifiedTableName,
) -> Result<ColumnSchema> {
    let results = client.query(&columns_sql(table)).await?;

    let mut columns = ColumnSchema::default();
    for row in &results.rows {
        let name = row.first().and_then(|v| v.as_str());
        let data_type = row.get(1).and_then(|v| v.as_str());
        match (name, data_type) {
            (Some(name), Some(data_type)) => columns.push(name, data_type),
            _ => {
                return Err(ImportError::statement(format!(
                    "unexpected column metadata row for {}: {:?}",
                    table, row
                )))
            }
        }
    }

    if columns.is_empty() {
        return Err(ImportError::TableNotFound(table.to_string()));
    }
    info!("Table {} has {} columns", table, columns.len());
    Ok(columns)
}

/// Drop a table and recreate it from its own DDL.
///
/// The two steps are not atomic: if the create fails the table is left
/// dropped.
pub async fn drop_create_table(client: &dyn QueryClient, table: &QualifiedTableName) -> Result<()> {
    let results = client.query(&format!("SHOW CREATE TABLE {}", table)).await?;
    let ddl: String = results.column_str(0).flatten().collect();
    if ddl.is_empty() {
        return Err(ImportError::TableNotFound(table.to_string()));
    }

    info!("Drop table {}", table);
    client
        .execute(&format!("DROP TABLE IF EXISTS {}", table))
        .await?;

    info!("Create table {}", table);
    client.execute(&ddl).await?;
    Ok(())
}
