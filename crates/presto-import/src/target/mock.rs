//! Recording `QueryClient` for unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::{PreparedStatement, QueryClient, QueryResults};
use crate::core::SqlValue;
use crate::error::{ImportError, Result};

/// One `execute_prepared` call.
#[derive(Debug, Clone)]
pub struct InsertCall {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// In-memory engine stand-in.
///
/// Answers the column metadata query and `SHOW CREATE TABLE`, records every
/// other statement, and fails selected prepared executions (1-based).
#[derive(Default)]
pub struct MockClient {
    columns: Vec<(String, String)>,
    ddl: Option<String>,
    failing_inserts: HashSet<usize>,
    executed: Mutex<Vec<String>>,
    inserts: Mutex<Vec<InsertCall>>,
    insert_attempts: AtomicU64,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl MockClient {
    pub fn with_columns(columns: &[(&str, &str)]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_ddl(mut self, ddl: &str) -> Self {
        self.ddl = Some(ddl.to_string());
        self
    }

    pub fn failing_insert(mut self, attempt: usize) -> Self {
        self.failing_inserts.insert(attempt);
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Successful prepared executions.
    pub fn inserts(&self) -> Vec<InsertCall> {
        self.inserts.lock().unwrap().clone()
    }

    /// Prepared executions including failed ones.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst) as usize
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryClient for MockClient {
    async fn query(&self, sql: &str) -> Result<QueryResults> {
        if sql.starts_with("SHOW CREATE TABLE") {
            let rows = self
                .ddl
                .iter()
                .map(|ddl| vec![json!(ddl)])
                .collect();
            return Ok(QueryResults {
                columns: vec!["Create Table".into()],
                rows,
            });
        }
        if sql.contains("information_schema.columns") {
            let rows = self
                .columns
                .iter()
                .map(|(name, data_type)| vec![json!(name), json!(data_type)])
                .collect();
            return Ok(QueryResults {
                columns: vec!["column_name".into(), "data_type".into()],
                rows,
            });
        }
        Err(ImportError::statement(format!("unexpected query: {}", sql)))
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(())
    }

    async fn prepare(&self, sql: &str) -> Result<PreparedStatement> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PreparedStatement {
            name: format!("statement{}", id),
            sql: sql.to_string(),
        })
    }

    async fn execute_prepared(
        &self,
        statement: &PreparedStatement,
        params: &[SqlValue],
    ) -> Result<u64> {
        let attempt = self.insert_attempts.fetch_add(1, Ordering::SeqCst) as usize + 1;
        if self.failing_inserts.contains(&attempt) {
            return Err(ImportError::statement(format!("insert {} rejected", attempt)));
        }
        let columns = self.columns.len().max(1);
        self.inserts.lock().unwrap().push(InsertCall {
            sql: statement.sql.clone(),
            params: params.to_vec(),
        });
        Ok((params.len() / columns) as u64)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
