//! Three-part table identifiers and SQL literal helpers.
//!
//! Identifiers are embedded verbatim in generated SQL. No quoting or
//! escaping is applied, so callers must supply names that are already safe
//! for the target engine. Only data values are escaped, through
//! [`quote_literal`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

/// A `catalog.schema.table` name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedTableName {
    catalog: String,
    schema: String,
    table: String,
}

impl QualifiedTableName {
    /// Parse a dotted name.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MalformedIdentifier` unless the input splits into
    /// exactly three non-empty segments.
    pub fn parse(name: &str) -> Result<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        match parts.as_slice() {
            [catalog, schema, table]
                if !catalog.is_empty() && !schema.is_empty() && !table.is_empty() =>
            {
                Ok(Self {
                    catalog: (*catalog).to_string(),
                    schema: (*schema).to_string(),
                    table: (*table).to_string(),
                })
            }
            _ => Err(ImportError::MalformedIdentifier(name.to_string())),
        }
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.catalog, self.schema, self.table)
    }
}

impl FromStr for QualifiedTableName {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QualifiedTableName {
    type Error = ImportError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<QualifiedTableName> for String {
    fn from(value: QualifiedTableName) -> Self {
        value.to_string()
    }
}

/// Quote a string as a SQL character literal.
///
/// Escapes single quotes by doubling them and wraps in single quotes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_literal("users"), "'users'");
/// assert_eq!(quote_literal("it's"), "'it''s'");
/// ```
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
