//! Core data model shared by the import pipeline.
//!
//! - [`identifier`]: three-part table names and literal quoting
//! - [`schema`]: ordered column metadata
//! - [`value`]: typed bind values

pub mod identifier;
pub mod schema;
pub mod value;

pub use identifier::{quote_literal, QualifiedTableName};
pub use schema::{Column, ColumnSchema};
pub use value::SqlValue;

/// One source row as ordered string fields.
pub type RawRecord = Vec<String>;
