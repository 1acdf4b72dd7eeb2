//! Query engine operations.
//!
//! [`QueryClient`] is the seam between the import pipeline and the engine's
//! client protocol. [`PrestoClient`] implements it over HTTP; the metadata
//! helpers in [`metadata`] are written against the trait only.

pub mod metadata;
mod presto;

#[cfg(test)]
pub(crate) mod mock;

pub use metadata::{drop_create_table, resolve_columns};
pub use presto::PrestoClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::SqlValue;
use crate::error::Result;

/// Rows returned by a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResults {
    /// Column names in result order.
    pub columns: Vec<String>,

    /// Row data, one JSON value per column.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResults {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate one column of every row as strings. Non-string cells yield `None`.
    pub fn column_str(&self, idx: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).and_then(Value::as_str))
    }
}

/// A statement registered for parameterized execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedStatement {
    /// Name the statement is executed under.
    pub name: String,

    /// Statement text with `?` placeholders.
    pub sql: String,
}

impl PreparedStatement {
    /// Number of `?` placeholders outside string literals.
    pub fn parameter_count(&self) -> usize {
        let mut in_literal = false;
        let mut count = 0;
        for c in self.sql.chars() {
            match c {
                '\'' => in_literal = !in_literal,
                '?' if !in_literal => count += 1,
                _ => {}
            }
        }
        count
    }
}

/// Trait for query engine operations.
///
/// One statement is in flight at a time; callers await each call before
/// issuing the next.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Execute a statement and collect every row it returns.
    async fn query(&self, sql: &str) -> Result<QueryResults>;

    /// Execute a statement, discarding any rows.
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Register a statement with `?` placeholders.
    async fn prepare(&self, sql: &str) -> Result<PreparedStatement>;

    /// Bind values positionally and execute. Returns the engine's update count.
    async fn execute_prepared(
        &self,
        statement: &PreparedStatement,
        params: &[SqlValue],
    ) -> Result<u64>;

    /// Release the session.
    async fn close(&self);
}

#[async_trait]
impl<T: QueryClient + ?Sized> QueryClient for &T {
    async fn query(&self, sql: &str) -> Result<QueryResults> {
        (**self).query(sql).await
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        (**self).execute(sql).await
    }

    async fn prepare(&self, sql: &str) -> Result<PreparedStatement> {
        (**self).prepare(sql).await
    }

    async fn execute_prepared(
        &self,
        statement: &PreparedStatement,
        params: &[SqlValue],
    ) -> Result<u64> {
        (**self).execute_prepared(statement, params).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
