//! # presto-import
//!
//! Bulk-load delimited text files into Presto tables.
//!
//! The import pipeline:
//!
//! - **Schema discovery** from the engine's `information_schema`
//! - **Type-directed coercion** of text fields into typed bind values
//! - **Batched insertion** with one multi-row parameterized INSERT per batch
//! - **Drop/recreate** of the target table from its own DDL, on request
//!
//! ## Example
//!
//! ```rust,no_run
//! use presto_import::{Config, NoPassword, Orchestrator, PrestoClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> presto_import::Result<()> {
//!     let config = Config::load("import.yaml")?;
//!     config.validate()?;
//!     let client = PrestoClient::connect(&config.client, &NoPassword)?;
//!     let result = Orchestrator::new(config.import, client).run().await?;
//!     println!("Inserted {} rows", result.rows_inserted);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod target;
pub mod transfer;
pub mod typemap;

// Re-exports for convenient access
pub use auth::{NoPassword, PasswordProvider, StaticPassword, PASSWORD_ENV_VAR};
pub use config::{ClientConfig, Config, ImportOptions};
pub use crate::core::{Column, ColumnSchema, QualifiedTableName, RawRecord, SqlValue};
pub use error::{ImportError, Result};
pub use orchestrator::{ImportResult, Orchestrator};
pub use source::{DelimitedReader, InputFormat};
pub use target::{PrestoClient, QueryClient};
pub use transfer::BatchLoader;
pub use typemap::{coerce, ColumnType};
