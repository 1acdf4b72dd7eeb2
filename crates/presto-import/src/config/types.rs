//! Configuration type definitions.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::QualifiedTableName;
use crate::error::Result;
use crate::source::InputFormat;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Query engine connection settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Import behavior.
    #[serde(default)]
    pub import: ImportOptions,
}

/// Query engine connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server location as `host:port` or a full URL (default: localhost:8080).
    #[serde(default = "default_server")]
    pub server: String,

    /// Username sent with every request.
    #[serde(default)]
    pub user: String,

    /// Password. Usually left unset and prompted for instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Client source name reported to the engine (default: presto-import).
    #[serde(default = "default_source")]
    pub source: String,

    /// Per-request HTTP timeout in seconds. No timeout if not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server", &self.server)
            .field("user", &self.user)
            .field(
                "password",
                &self.password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("source", &self.source)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            user: String::new(),
            password: None,
            source: default_source(),
            request_timeout_secs: None,
        }
    }
}

/// Import behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Target table as `catalog.schema.table`.
    #[serde(default)]
    pub table: String,

    /// Delimited input file.
    #[serde(default)]
    pub file: PathBuf,

    /// Rows per INSERT statement (default: 1000).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Drop and recreate the table before loading (default: true).
    #[serde(default = "default_true")]
    pub drop_create: bool,

    /// Input file format (default: csv_unquoted).
    #[serde(default)]
    pub input_format: InputFormat,

    /// Skip failing batches instead of aborting (default: false).
    #[serde(default)]
    pub ignore_errors: bool,
}

impl ImportOptions {
    /// Parse the configured target table name.
    pub fn target(&self) -> Result<QualifiedTableName> {
        QualifiedTableName::parse(&self.table)
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            table: String::new(),
            file: PathBuf::new(),
            batch_size: default_batch_size(),
            drop_create: true,
            input_format: InputFormat::default(),
            ignore_errors: false,
        }
    }
}

fn default_server() -> String {
    "localhost:8080".to_string()
}

fn default_source() -> String {
    "presto-import".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_true() -> bool {
    true
}
