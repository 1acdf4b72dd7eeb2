//! Presto HTTP statement protocol client.
//!
//! A statement is POSTed to `/v1/statement`; results are paged by following
//! `nextUri` until the server stops returning one. Prepared statements are
//! client-side state: the statement text travels in the
//! `X-Presto-Prepared-Statement` header next to an `EXECUTE ... USING` call.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{PreparedStatement, QueryClient, QueryResults};
use crate::auth::PasswordProvider;
use crate::config::ClientConfig;
use crate::core::SqlValue;
use crate::error::{ImportError, Result};

const USER_HEADER: &str = "x-presto-user";
const SOURCE_HEADER: &str = "x-presto-source";
const PREPARED_HEADER: &str = "x-presto-prepared-statement";

/// One page of the statement protocol.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    id: String,
    next_uri: Option<String>,
    columns: Option<Vec<ColumnInfo>>,
    data: Option<Vec<Vec<serde_json::Value>>>,
    error: Option<QueryError>,
    update_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ColumnInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryError {
    message: String,
    error_name: Option<String>,
}

/// Collected outcome of one statement.
#[derive(Debug, Default)]
struct StatementOutcome {
    results: QueryResults,
    update_count: Option<u64>,
}

/// Presto client over HTTP.
pub struct PrestoClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    password: Option<String>,
    next_statement_id: AtomicU64,
    closed: AtomicBool,
}

impl PrestoClient {
    /// Build a client session from connection settings.
    ///
    /// The password, if any, is taken from `credentials`. No request is made
    /// until the first statement runs.
    pub fn connect(config: &ClientConfig, credentials: &dyn PasswordProvider) -> Result<Self> {
        let password = credentials.password(&config.user)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_HEADER,
            HeaderValue::from_str(&config.user)
                .map_err(|e| ImportError::Config(format!("invalid user name: {}", e)))?,
        );
        headers.insert(
            SOURCE_HEADER,
            HeaderValue::from_str(&config.source)
                .map_err(|e| ImportError::Config(format!("invalid source name: {}", e)))?,
        );

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("presto-import/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        let base_url = config.base_url();
        debug!("Presto client for {} as user {}", base_url, config.user);

        Ok(Self {
            http,
            base_url,
            user: config.user.clone(),
            password,
            next_statement_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        })
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.password {
            Some(password) => request.basic_auth(&self.user, Some(password)),
            None => request,
        }
    }

    async fn run(&self, sql: &str, prepared: Option<&PreparedStatement>) -> Result<StatementOutcome> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ImportError::statement("client session is closed"));
        }

        let sql_preview = if sql.chars().count() > 120 {
            format!("{}...", sql.chars().take(120).collect::<String>())
        } else {
            sql.to_string()
        };
        debug!("Submitting statement: {}", sql_preview.replace('\n', " "));
        let started = Instant::now();

        let url = format!("{}/v1/statement", self.base_url);
        let mut request = self.authorize(self.http.post(&url)).body(sql.to_string());
        if let Some(stmt) = prepared {
            request = request.header(
                PREPARED_HEADER,
                format!("{}={}", stmt.name, urlencoding::encode(&stmt.sql)),
            );
        }

        let mut page = Self::read_page(request.send().await?).await?;
        let mut outcome = StatementOutcome::default();
        let query_id = page.id.clone();

        loop {
            if let Some(error) = page.error {
                warn!("Query {} failed: {}", query_id, error.message);
                let message = match error.error_name {
                    Some(name) => format!("{} ({})", error.message, name),
                    None => error.message,
                };
                return Err(ImportError::statement(message));
            }
            if outcome.results.columns.is_empty() {
                if let Some(columns) = page.columns {
                    outcome.results.columns = columns.into_iter().map(|c| c.name).collect();
                }
            }
            if let Some(data) = page.data {
                outcome.results.rows.extend(data);
            }
            if page.update_count.is_some() {
                outcome.update_count = page.update_count;
            }

            match page.next_uri {
                Some(next) => {
                    let request = self.authorize(self.http.get(&next));
                    page = Self::read_page(request.send().await?).await?;
                }
                None => break,
            }
        }

        debug!(
            "Query {} finished: {} rows in {}ms",
            query_id,
            outcome.results.rows.len(),
            started.elapsed().as_millis()
        );
        Ok(outcome)
    }

    async fn read_page(response: reqwest::Response) -> Result<QueryResponse> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImportError::statement(format!(
                "server returned {}: {}",
                status,
                body.trim()
            )));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl QueryClient for PrestoClient {
    async fn query(&self, sql: &str) -> Result<QueryResults> {
        Ok(self.run(sql, None).await?.results)
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        self.run(sql, None).await?;
        Ok(())
    }

    async fn prepare(&self, sql: &str) -> Result<PreparedStatement> {
        let id = self.next_statement_id.fetch_add(1, Ordering::SeqCst);
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
        let expected = statement.parameter_count();
        if expected != params.len() {
            return Err(ImportError::statement(format!(
                "statement {} expects {} parameters, got {}",
                statement.name,
                expected,
                params.len()
            )));
        }

        let sql = execute_sql(&statement.name, params);
        let outcome = self.run(&sql, Some(statement)).await?;
        Ok(outcome.update_count.unwrap_or(0))
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("Closed Presto client for {}", self.base_url);
        }
    }
}

/// Build the `EXECUTE` call that binds `params` to a prepared statement.
fn execute_sql(name: &str, params: &[SqlValue]) -> String {
    if params.is_empty() {
        return format!("EXECUTE {}", name);
    }
    let literals: Vec<String> = params.iter().map(SqlValue::to_literal).collect();
    format!("EXECUTE {} USING {}", name, literals.join(", "))
}
